use super::{project_record, ActionDispatcher};
use crate::constants::{deals, pagination};
use crate::errors::{ActionError, ActionErrorKind};
use crate::vendor::CallOptions;
use reqwest::Method;
use serde_json::Value;

impl ActionDispatcher {
    /// One page of deals, optionally projected to a caller-specified key
    /// set. When the projection retains `stage_id`, stage and pipeline names
    /// are resolved separately and injected.
    pub(crate) async fn list_deals(&self, params: &Value) -> Result<Value, ActionError> {
        let status = self
            .validation
            .ensure_optional_string(params.get("status"), "status")?
            .unwrap_or_else(|| deals::DEFAULT_LIST_STATUS.to_string());
        let limit = self.validation.ensure_positive_int(
            params.get("limit"),
            "limit",
            deals::DEFAULT_LIST_LIMIT,
        )?;
        let start = self
            .validation
            .ensure_offset(params.get("start"), "start", 0)?;
        let filter_id = params
            .get("filter_id")
            .filter(|v| !v.is_null())
            .map(|v| self.validation.ensure_id(Some(v), "filter_id"))
            .transpose()?;

        let mut query = serde_json::Map::new();
        query.insert("status".to_string(), Value::String(status));
        query.insert("limit".to_string(), limit.into());
        query.insert("start".to_string(), start.into());
        if let Some(filter_id) = filter_id {
            query.insert("filter_id".to_string(), filter_id.into());
        }

        let response = self
            .client
            .call(Method::GET, "/deals", CallOptions::with_query(query))
            .await
            .into_result()?;

        let mut items = response
            .data
            .as_array()
            .cloned()
            .unwrap_or_default();

        if let Some(fields) = read_field_list(params.get("fields"))? {
            let wants_stage = fields.iter().any(|f| f == "stage_id");
            let stage_map = if wants_stage {
                Some(self.stage_lookup().await?)
            } else {
                None
            };
            items = items
                .iter()
                .map(|item| {
                    let mut projected = project_record(item, &fields);
                    if let Some(stages) = stage_map.as_ref() {
                        let stage_id = projected.get("stage_id").and_then(|v| v.as_i64());
                        if let Some(stage) = stage_id.and_then(|id| stages.get(&id)) {
                            if let Some(obj) = projected.as_object_mut() {
                                obj.insert(
                                    "stage_name".to_string(),
                                    Value::String(stage.name.clone()),
                                );
                                obj.insert(
                                    "pipeline_name".to_string(),
                                    stage.pipeline_name.clone(),
                                );
                            }
                        }
                    }
                    projected
                })
                .collect();
        }

        Ok(serde_json::json!({
            "items": items,
            "pagination": response.pagination,
        }))
    }

    pub(crate) async fn get_deal(&self, params: &Value) -> Result<Value, ActionError> {
        let id = self.validation.ensure_id(params.get("id"), "id")?;
        let response = self
            .client
            .call(
                Method::GET,
                &format!("/deals/{}", id),
                CallOptions::default(),
            )
            .await
            .into_result()?;
        Ok(response.data)
    }

    pub(crate) async fn create_deal(&self, params: &Value) -> Result<Value, ActionError> {
        let body = self.validation.ensure_data_object(params, "params")?;
        let response = self
            .client
            .call(
                Method::POST,
                "/deals",
                CallOptions::with_body(Value::Object(body)),
            )
            .await
            .into_result()?;
        Ok(response.data)
    }

    pub(crate) async fn update_deal(&self, params: &Value) -> Result<Value, ActionError> {
        let id = self.validation.ensure_id(params.get("id"), "id")?;
        let mut fields = self.validation.ensure_object(params, "params")?;
        fields.remove("id");
        if fields.is_empty() {
            return Err(ActionError::invalid_params(
                "updateDeal requires at least one field besides id",
            ));
        }
        let response = self
            .client
            .call(
                Method::PUT,
                &format!("/deals/{}", id),
                CallOptions::with_body(Value::Object(fields)),
            )
            .await
            .into_result()?;
        Ok(response.data)
    }

    pub(crate) async fn move_deal(&self, params: &Value) -> Result<Value, ActionError> {
        let id = self.validation.ensure_id(params.get("id"), "id")?;
        let stage_id = self.validation.ensure_id(params.get("stage_id"), "stage_id")?;
        let mut body = self.validation.ensure_object(params, "params")?;
        body.remove("id");
        body.insert("stage_id".to_string(), stage_id.into());
        let response = self
            .client
            .call(
                Method::PUT,
                &format!("/deals/{}", id),
                CallOptions::with_body(Value::Object(body)),
            )
            .await
            .into_result()?;
        Ok(response.data)
    }

    pub(crate) async fn search_deals(&self, params: &Value) -> Result<Value, ActionError> {
        let term = self.validation.ensure_string(
            params.get("term").unwrap_or(&Value::Null),
            "term",
        )?;
        let mut query = serde_json::Map::new();
        query.insert("term".to_string(), Value::String(term));

        let response = self
            .client
            .call(Method::GET, "/deals/search", CallOptions::with_query(query))
            .await
            .into_result()?;

        let hits = response
            .data
            .get("items")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        let keys: Vec<String> = SEARCH_PROJECTION.iter().map(|s| s.to_string()).collect();
        let items: Vec<Value> = hits
            .iter()
            .map(|hit| {
                let record = hit.get("item").unwrap_or(hit);
                project_record(record, &keys)
            })
            .collect();

        Ok(serde_json::json!({
            "items": items,
            "pagination": response.pagination,
        }))
    }

    /// Deterministic per-status deal counts read from the vendor's
    /// pagination totals. One limit=1 request per status; records are never
    /// transferred or counted client-side.
    pub(crate) async fn analyze_pipeline(&self, params: &Value) -> Result<Value, ActionError> {
        let statuses = read_status_set(params.get("statuses"))?;

        let mut totals = serde_json::Map::new();
        let mut all: u64 = 0;
        for status in &statuses {
            let mut query = serde_json::Map::new();
            query.insert("status".to_string(), Value::String(status.clone()));
            query.insert("limit".to_string(), 1.into());
            query.insert("start".to_string(), 0.into());

            let response = self
                .client
                .call(Method::GET, "/deals", CallOptions::with_query(query))
                .await
                .into_result()?;

            let count = response
                .pagination
                .get("total_items")
                .and_then(|v| v.as_u64())
                .unwrap_or(0);
            totals.insert(status.clone(), count.into());
            all += count;
        }
        totals.insert("all".to_string(), all.into());

        Ok(serde_json::json!({
            "totals": totals,
            "meta": {
                "source": "deals.pagination.total_items",
                "deterministic": true,
                "statuses": statuses,
            },
        }))
    }

    /// Drains every page of deals for the given status into one collection,
    /// in vendor order. Follows the vendor's more-items flag, advancing by
    /// its next offset (falling back to start + page size), and fails safe
    /// once the page cap is hit.
    pub async fn drain_deals(
        &self,
        status: &str,
        page_size: u64,
    ) -> Result<Vec<Value>, ActionError> {
        let mut items: Vec<Value> = Vec::new();
        let mut start: u64 = 0;

        for _ in 0..pagination::MAX_DRAIN_PAGES {
            let page = self
                .list_deals(&serde_json::json!({
                    "status": status,
                    "limit": page_size,
                    "start": start,
                }))
                .await?;

            if let Some(page_items) = page.get("items").and_then(|v| v.as_array()) {
                items.extend(page_items.iter().cloned());
            }

            let page_info = page.get("pagination").cloned().unwrap_or(Value::Null);
            let more = page_info
                .get("more_items_in_collection")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            if !more {
                return Ok(items);
            }
            start = page_info
                .get("next_start")
                .and_then(|v| v.as_u64())
                .unwrap_or(start + page_size);
        }

        Err(ActionError::new(
            ActionErrorKind::Internal,
            "ERR_PAGINATION_CAP",
            format!(
                "Deal drain did not terminate after {} pages",
                pagination::MAX_DRAIN_PAGES
            ),
        )
        .with_hint("The vendor kept reporting more items; raise the cap or narrow the status."))
    }
}

const SEARCH_PROJECTION: &[&str] = &[
    "id",
    "title",
    "value",
    "currency",
    "status",
    "pipeline_id",
    "stage_id",
];

fn read_field_list(value: Option<&Value>) -> Result<Option<Vec<String>>, ActionError> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    let entries = value
        .as_array()
        .ok_or_else(|| ActionError::invalid_params("fields must be an array of strings"))?;
    let mut keys = Vec::new();
    for entry in entries {
        let key = entry
            .as_str()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ActionError::invalid_params("fields must be an array of strings"))?;
        keys.push(key.to_string());
    }
    if keys.is_empty() {
        return Ok(None);
    }
    Ok(Some(keys))
}

fn read_status_set(value: Option<&Value>) -> Result<Vec<String>, ActionError> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(crate::constants::deals::COUNT_STATUSES
            .iter()
            .map(|s| s.to_string())
            .collect());
    };
    let entries = value
        .as_array()
        .ok_or_else(|| ActionError::invalid_params("statuses must be an array of strings"))?;
    let mut statuses = Vec::new();
    for entry in entries {
        let status = entry
            .as_str()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ActionError::invalid_params("statuses must be an array of strings"))?;
        statuses.push(status.to_string());
    }
    if statuses.is_empty() {
        return Err(ActionError::invalid_params(
            "statuses must not be empty when provided",
        ));
    }
    Ok(statuses)
}
