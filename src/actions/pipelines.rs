use super::{project_record, ActionDispatcher};
use crate::errors::ActionError;
use crate::vendor::CallOptions;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;

pub(crate) struct StageInfo {
    pub(crate) name: String,
    pub(crate) pipeline_name: Value,
}

const PIPELINE_PROJECTION: &[&str] = &["id", "name", "url_title", "active", "order_nr"];

impl ActionDispatcher {
    pub(crate) async fn list_pipelines(&self) -> Result<Value, ActionError> {
        let response = self
            .client
            .call(Method::GET, "/pipelines", CallOptions::default())
            .await
            .into_result()?;

        let keys: Vec<String> = PIPELINE_PROJECTION.iter().map(|s| s.to_string()).collect();
        let items: Vec<Value> = response
            .data
            .as_array()
            .cloned()
            .unwrap_or_default()
            .iter()
            .map(|pipeline| project_record(pipeline, &keys))
            .collect();

        Ok(serde_json::json!({ "items": items }))
    }

    /// Stage id to name/pipeline-name map, resolved from the stages
    /// endpoint. Used to enrich projected deal listings.
    pub(crate) async fn stage_lookup(&self) -> Result<HashMap<i64, StageInfo>, ActionError> {
        let response = self
            .client
            .call(Method::GET, "/stages", CallOptions::default())
            .await
            .into_result()?;

        let mut map = HashMap::new();
        if let Some(stages) = response.data.as_array() {
            for stage in stages {
                let Some(id) = stage.get("id").and_then(|v| v.as_i64()) else {
                    continue;
                };
                let name = stage
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                let pipeline_name = stage
                    .get("pipeline_name")
                    .cloned()
                    .unwrap_or(Value::Null);
                map.insert(
                    id,
                    StageInfo {
                        name,
                        pipeline_name,
                    },
                );
            }
        }
        Ok(map)
    }
}
