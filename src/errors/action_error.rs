use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionErrorKind {
    InvalidParams,
    UnsupportedAction,
    UnsupportedIntent,
    Config,
    Vendor,
    Transport,
    Timeout,
    ConfirmationRequired,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionError {
    pub kind: ActionErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ActionError {
    pub fn new(
        kind: ActionErrorKind,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::InvalidParams, "INVALID_PARAMS", message)
    }

    pub fn unsupported_action(message: impl Into<String>) -> Self {
        Self::new(
            ActionErrorKind::UnsupportedAction,
            "UNSUPPORTED_ACTION",
            message,
        )
    }

    pub fn unsupported_intent(message: impl Into<String>) -> Self {
        Self::new(
            ActionErrorKind::UnsupportedIntent,
            "ERR_CRM_INTENT_NO_SOPORTADO",
            message,
        )
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::Config, "ERR_CRM_CONFIG", message)
    }

    pub fn vendor(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::Vendor, "VENDOR_ERROR", message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::Transport, "TRANSPORT_ERROR", message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::Timeout, "ERR_CRM_TIMEOUT", message)
    }

    pub fn confirmation_required(message: impl Into<String>) -> Self {
        Self::new(
            ActionErrorKind::ConfirmationRequired,
            "ERR_CRM_CONFIRMACION_REQUERIDA",
            message,
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::Internal, "INTERNAL", message)
    }

    /// True for errors the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind,
            ActionErrorKind::InvalidParams
                | ActionErrorKind::UnsupportedAction
                | ActionErrorKind::UnsupportedIntent
                | ActionErrorKind::ConfirmationRequired
        )
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ActionError {}

impl From<std::io::Error> for ActionError {
    fn from(err: std::io::Error) -> Self {
        ActionError::internal(err.to_string())
    }
}
