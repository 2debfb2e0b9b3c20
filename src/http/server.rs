use super::handlers;
use super::AppState;
use crate::app::App;
use crate::errors::ActionError;
use crate::services::config;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/pipedrive",
            post(handlers::action_endpoint).fallback(handlers::action_method_not_allowed),
        )
        .route(
            "/api/crm-backend",
            post(handlers::intent_endpoint).fallback(handlers::intent_method_not_allowed),
        )
        .with_state(state)
}

pub async fn run() -> Result<(), ActionError> {
    let app = App::initialize()?;
    let state = AppState {
        dispatcher: app.dispatcher,
        intents: app.intents,
        logger: app.logger.clone(),
    };

    let addr = config::bind_addr_from_env();
    let listener = TcpListener::bind(&addr).await?;
    app.logger.info(
        "Listening",
        Some(&serde_json::json!({"addr": addr})),
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
