use super::ActionDispatcher;
use crate::constants::activities;
use crate::errors::ActionError;
use crate::vendor::CallOptions;
use reqwest::Method;
use serde_json::Value;

impl ActionDispatcher {
    pub(crate) async fn list_activities(&self, params: &Value) -> Result<Value, ActionError> {
        let limit = self.validation.ensure_positive_int(
            params.get("limit"),
            "limit",
            activities::DEFAULT_LIST_LIMIT,
        )?;
        let start = self
            .validation
            .ensure_offset(params.get("start"), "start", 0)?;
        let deal_id = params
            .get("deal_id")
            .filter(|v| !v.is_null())
            .map(|v| self.validation.ensure_id(Some(v), "deal_id"))
            .transpose()?;
        let user_id = params
            .get("user_id")
            .filter(|v| !v.is_null())
            .map(|v| self.validation.ensure_id(Some(v), "user_id"))
            .transpose()?;

        let mut query = serde_json::Map::new();
        query.insert("limit".to_string(), limit.into());
        query.insert("start".to_string(), start.into());
        if let Some(deal_id) = deal_id {
            query.insert("deal_id".to_string(), deal_id.into());
        }
        if let Some(user_id) = user_id {
            query.insert("user_id".to_string(), user_id.into());
        }

        let response = self
            .client
            .call(Method::GET, "/activities", CallOptions::with_query(query))
            .await
            .into_result()?;

        Ok(serde_json::json!({
            "items": response.data.as_array().cloned().unwrap_or_default(),
            "pagination": response.pagination,
        }))
    }

    pub(crate) async fn add_note(&self, params: &Value) -> Result<Value, ActionError> {
        let deal_id = self.validation.ensure_id(params.get("deal_id"), "deal_id")?;
        let content = self.validation.ensure_string(
            params.get("content").unwrap_or(&Value::Null),
            "content",
        )?;

        let mut body = self.validation.ensure_object(params, "params")?;
        body.insert("deal_id".to_string(), deal_id.into());
        body.insert("content".to_string(), Value::String(content));

        let response = self
            .client
            .call(
                Method::POST,
                "/notes",
                CallOptions::with_body(Value::Object(body)),
            )
            .await
            .into_result()?;
        Ok(response.data)
    }
}
