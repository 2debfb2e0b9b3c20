use super::AppState;
use crate::errors::ActionError;
use crate::intents::envelope;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

/// POST /api/pipedrive. Body: `{"action": "...", "params": {...}}`.
pub async fn action_endpoint(State(state): State<AppState>, raw: Bytes) -> Response {
    let body = parse_body(&raw);
    let Some(action) = body.get("action").and_then(|v| v.as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "status": "error",
                "message": "action is required",
            })),
        )
            .into_response();
    };
    let action = action.to_string();
    let params = body.get("params").cloned().unwrap_or(serde_json::json!({}));

    match state.dispatcher.dispatch(&action, params).await {
        Ok(data) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "action": action,
                "data": data,
            })),
        )
            .into_response(),
        Err(err) => {
            state.logger.warn(
                "Action failed",
                Some(&serde_json::json!({"action": action, "code": err.code})),
            );
            (
                error_status(&err),
                Json(serde_json::json!({
                    "status": "error",
                    "action": action,
                    "message": err.message,
                    "error": err,
                })),
            )
                .into_response()
        }
    }
}

/// POST /api/crm-backend. Body:
/// `{"intent": "...", "contexto_usuario": {...}, "parametros": {...}}`.
pub async fn intent_endpoint(State(state): State<AppState>, raw: Bytes) -> Response {
    let body = parse_body(&raw);
    let Some(intent) = body.get("intent").and_then(|v| v.as_str()) else {
        let err = ActionError::new(
            crate::errors::ActionErrorKind::InvalidParams,
            "ERR_CRM_INTENT_FALTANTE",
            "intent is required",
        );
        return (
            StatusCode::BAD_REQUEST,
            Json(envelope::build_error(None, &err)),
        )
            .into_response();
    };
    let intent = intent.to_string();
    let contexto = body
        .get("contexto_usuario")
        .cloned()
        .unwrap_or(serde_json::json!({}));
    let parametros = body
        .get("parametros")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    match state.intents.handle(&intent, &contexto, &parametros).await {
        Ok(datos) => (StatusCode::OK, Json(envelope::build_ok(&intent, datos))).into_response(),
        Err(err) => {
            state.logger.warn(
                "Intent failed",
                Some(&serde_json::json!({"intent": intent, "code": err.code})),
            );
            (
                error_status(&err),
                Json(envelope::build_error(Some(&intent), &err)),
            )
                .into_response()
        }
    }
}

pub async fn action_method_not_allowed() -> Response {
    method_not_allowed(serde_json::json!({
        "status": "error",
        "message": "Method not allowed. Use POST.",
    }))
}

pub async fn intent_method_not_allowed() -> Response {
    let err = ActionError::new(
        crate::errors::ActionErrorKind::InvalidParams,
        "ERR_CRM_METODO_NO_PERMITIDO",
        "Method not allowed. Use POST.",
    );
    method_not_allowed(envelope::build_error(None, &err))
}

fn method_not_allowed(body: Value) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(body),
    )
        .into_response()
}

fn error_status(err: &ActionError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Missing or undecodable bodies read as an empty object; the endpoint
/// rejects them with its own missing-field message instead of a 415.
fn parse_body(raw: &Bytes) -> Value {
    if raw.is_empty() {
        return serde_json::json!({});
    }
    serde_json::from_slice(raw).unwrap_or_else(|_| serde_json::json!({}))
}
