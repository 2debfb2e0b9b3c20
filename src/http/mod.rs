pub mod handlers;
pub mod server;

use crate::actions::ActionDispatcher;
use crate::intents::IntentBackend;
use crate::services::logger::Logger;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ActionDispatcher>,
    pub intents: Arc<IntentBackend>,
    pub logger: Logger,
}
