use crate::actions::ActionDispatcher;
use crate::errors::ActionError;
use crate::intents::IntentBackend;
use crate::services::config::{self, VendorConfig};
use crate::services::logger::Logger;
use crate::services::validation::Validation;
use crate::vendor::VendorClient;
use std::sync::Arc;

/// Wires the dispatcher and intent backend together. Vendor credentials are
/// optional at startup; every call fails with a configuration error until
/// they are present.
pub struct App {
    pub logger: Logger,
    pub dispatcher: Arc<ActionDispatcher>,
    pub intents: Arc<IntentBackend>,
}

impl App {
    pub fn initialize() -> Result<Self, ActionError> {
        let logger = Logger::new("crmgate");

        let vendor_config = match VendorConfig::from_env() {
            Ok(config) => Some(config),
            Err(err) => {
                logger.warn(
                    "Vendor credentials not configured",
                    Some(&serde_json::json!({"detail": err.message})),
                );
                None
            }
        };

        let client = Arc::new(VendorClient::new(logger.clone(), vendor_config)?);
        let dispatcher = Arc::new(ActionDispatcher::new(
            logger.clone(),
            Validation::new(),
            client,
        ));
        let intents = Arc::new(IntentBackend::new(
            logger.clone(),
            dispatcher.clone(),
            config::confirm_mutations_from_env(),
        ));

        Ok(Self {
            logger,
            dispatcher,
            intents,
        })
    }
}
