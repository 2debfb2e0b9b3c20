mod activities;
mod deals;
mod pipelines;

use crate::errors::ActionError;
use crate::services::logger::Logger;
use crate::services::validation::Validation;
use crate::utils::dispatch_errors::unknown_action_error;
use crate::vendor::VendorClient;
use serde_json::Value;
use std::sync::Arc;

pub const ACTIONS: &[&str] = &[
    "listDeals",
    "getDeal",
    "createDeal",
    "updateDeal",
    "moveDeal",
    "addNote",
    "listActivities",
    "listPipelines",
    "searchDeals",
    "analyzePipeline",
];

/// Maps inbound action names onto vendor endpoints. Every action validates
/// its parameters before the first vendor call.
pub struct ActionDispatcher {
    pub(crate) logger: Logger,
    pub(crate) validation: Validation,
    pub(crate) client: Arc<VendorClient>,
}

impl ActionDispatcher {
    pub fn new(logger: Logger, validation: Validation, client: Arc<VendorClient>) -> Self {
        Self {
            logger: logger.child("actions"),
            validation,
            client,
        }
    }

    pub async fn dispatch(&self, action: &str, params: Value) -> Result<Value, ActionError> {
        self.logger
            .debug("Dispatch", Some(&serde_json::json!({"action": action})));
        match action {
            "listDeals" => self.list_deals(&params).await,
            "getDeal" => self.get_deal(&params).await,
            "createDeal" => self.create_deal(&params).await,
            "updateDeal" => self.update_deal(&params).await,
            "moveDeal" => self.move_deal(&params).await,
            "addNote" => self.add_note(&params).await,
            "listActivities" => self.list_activities(&params).await,
            "listPipelines" => self.list_pipelines().await,
            "searchDeals" => self.search_deals(&params).await,
            "analyzePipeline" => self.analyze_pipeline(&params).await,
            _ => Err(unknown_action_error(action, ACTIONS)),
        }
    }
}

/// Keeps only the requested keys, skipping ones the record does not carry.
pub(crate) fn project_record(record: &Value, keys: &[String]) -> Value {
    let mut out = serde_json::Map::new();
    if let Some(obj) = record.as_object() {
        for key in keys {
            if let Some(value) = obj.get(key) {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}
