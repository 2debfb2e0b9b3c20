use crate::errors::ActionError;
use serde_json::Value;

#[derive(Clone)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_string(&self, value: &Value, label: &str) -> Result<String, ActionError> {
        let text = value.as_str().ok_or_else(|| {
            ActionError::invalid_params(format!("{} must be a non-empty string", label))
        })?;
        let normalized = text.trim();
        if normalized.is_empty() {
            return Err(ActionError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(normalized.to_string())
    }

    pub fn ensure_optional_string(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<String>, ActionError> {
        match value {
            None => Ok(None),
            Some(val) if val.is_null() => Ok(None),
            Some(val) => self.ensure_string(val, label).map(Some),
        }
    }

    /// Accepts vendor record ids as integers or numeric strings.
    pub fn ensure_id(&self, value: Option<&Value>, label: &str) -> Result<i64, ActionError> {
        let value = value.filter(|v| !v.is_null()).ok_or_else(|| {
            ActionError::invalid_params(format!("{} is required", label))
        })?;
        value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                ActionError::invalid_params(format!("{} must be a positive integer", label))
            })
    }

    pub fn ensure_positive_int(
        &self,
        value: Option<&Value>,
        label: &str,
        fallback: u64,
    ) -> Result<u64, ActionError> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(fallback);
        };
        value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse::<u64>().ok()))
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ActionError::invalid_params(format!("{} must be a positive integer", label))
            })
    }

    pub fn ensure_offset(
        &self,
        value: Option<&Value>,
        label: &str,
        fallback: u64,
    ) -> Result<u64, ActionError> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(fallback);
        };
        value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse::<u64>().ok()))
            .ok_or_else(|| {
                ActionError::invalid_params(format!("{} must be a non-negative integer", label))
            })
    }

    pub fn ensure_object(
        &self,
        value: &Value,
        label: &str,
    ) -> Result<serde_json::Map<String, Value>, ActionError> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| ActionError::invalid_params(format!("{} must be an object", label)))
    }

    pub fn ensure_data_object(
        &self,
        value: &Value,
        label: &str,
    ) -> Result<serde_json::Map<String, Value>, ActionError> {
        let obj = self.ensure_object(value, label)?;
        if obj.is_empty() {
            return Err(ActionError::invalid_params(format!(
                "{} must not be empty",
                label
            )));
        }
        Ok(obj)
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}
