use crate::errors::ActionError;
use url::Url;

pub const ENV_BASE_URL: &str = "PIPEDRIVE_BASE_URL";
pub const ENV_API_TOKEN: &str = "PIPEDRIVE_API_TOKEN";
pub const ENV_CONFIRM_MUTATIONS: &str = "CRMGATE_CONFIRM_MUTATIONS";
pub const ENV_BIND: &str = "CRMGATE_BIND";

/// Credentials for the vendor API, read from the environment. Absence is a
/// per-request configuration error, never a startup crash.
#[derive(Debug, Clone)]
pub struct VendorConfig {
    pub base_url: Url,
    pub api_token: String,
}

impl VendorConfig {
    pub fn from_env() -> Result<Self, ActionError> {
        let base_url = read_env(ENV_BASE_URL);
        let api_token = read_env(ENV_API_TOKEN);
        let (Some(base_url), Some(api_token)) = (base_url, api_token) else {
            return Err(ActionError::config(format!(
                "Vendor env vars missing ({} / {})",
                ENV_BASE_URL, ENV_API_TOKEN
            )));
        };
        let base_url = Url::parse(&base_url).map_err(|_| {
            ActionError::config(format!("{} is not a valid URL", ENV_BASE_URL))
        })?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ActionError::config(format!(
                "{} must use http or https",
                ENV_BASE_URL
            )));
        }
        Ok(Self {
            base_url,
            api_token,
        })
    }

    pub fn new(base_url: Url, api_token: impl Into<String>) -> Self {
        Self {
            base_url,
            api_token: api_token.into(),
        }
    }
}

/// Whether mutating intents require an explicit confirmado=true flag.
/// Defaults to required; set the env var to 0/false to relax.
pub fn confirm_mutations_from_env() -> bool {
    match std::env::var(ENV_CONFIRM_MUTATIONS) {
        Ok(raw) => {
            let normalized = raw.trim().to_lowercase();
            !(normalized == "0" || normalized == "false" || normalized == "no")
        }
        Err(_) => true,
    }
}

pub fn bind_addr_from_env() -> String {
    std::env::var(ENV_BIND).unwrap_or_else(|_| crate::constants::server::DEFAULT_BIND.to_string())
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
