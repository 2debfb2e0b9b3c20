mod common;

use common::ENV_LOCK;
use crmgate::errors::ActionErrorKind;
use crmgate::services::config::{
    self, VendorConfig, ENV_API_TOKEN, ENV_BASE_URL, ENV_BIND, ENV_CONFIRM_MUTATIONS,
};

fn clear_vendor_env() {
    std::env::remove_var(ENV_BASE_URL);
    std::env::remove_var(ENV_API_TOKEN);
}

#[tokio::test]
async fn missing_credentials_are_a_config_error() {
    let _guard = ENV_LOCK.lock().await;
    clear_vendor_env();

    let err = VendorConfig::from_env().unwrap_err();
    assert_eq!(err.kind, ActionErrorKind::Config);
    assert_eq!(err.code, "ERR_CRM_CONFIG");
}

#[tokio::test]
async fn blank_credentials_count_as_missing() {
    let _guard = ENV_LOCK.lock().await;
    std::env::set_var(ENV_BASE_URL, "   ");
    std::env::set_var(ENV_API_TOKEN, "");

    assert!(VendorConfig::from_env().is_err());
    clear_vendor_env();
}

#[tokio::test]
async fn valid_credentials_parse() {
    let _guard = ENV_LOCK.lock().await;
    std::env::set_var(ENV_BASE_URL, "https://api.pipedrive.com/v1");
    std::env::set_var(ENV_API_TOKEN, "tok");

    let config = VendorConfig::from_env().unwrap();
    assert_eq!(config.base_url.as_str(), "https://api.pipedrive.com/v1");
    assert_eq!(config.api_token, "tok");
    clear_vendor_env();
}

#[tokio::test]
async fn non_http_base_url_is_rejected() {
    let _guard = ENV_LOCK.lock().await;
    std::env::set_var(ENV_BASE_URL, "ftp://api.pipedrive.com/v1");
    std::env::set_var(ENV_API_TOKEN, "tok");

    let err = VendorConfig::from_env().unwrap_err();
    assert_eq!(err.kind, ActionErrorKind::Config);
    clear_vendor_env();
}

#[tokio::test]
async fn confirmation_defaults_to_required() {
    let _guard = ENV_LOCK.lock().await;
    std::env::remove_var(ENV_CONFIRM_MUTATIONS);
    assert!(config::confirm_mutations_from_env());

    std::env::set_var(ENV_CONFIRM_MUTATIONS, "false");
    assert!(!config::confirm_mutations_from_env());
    std::env::set_var(ENV_CONFIRM_MUTATIONS, "0");
    assert!(!config::confirm_mutations_from_env());
    std::env::set_var(ENV_CONFIRM_MUTATIONS, "yes");
    assert!(config::confirm_mutations_from_env());
    std::env::remove_var(ENV_CONFIRM_MUTATIONS);
}

#[tokio::test]
async fn bind_addr_falls_back_to_default() {
    let _guard = ENV_LOCK.lock().await;
    std::env::remove_var(ENV_BIND);
    assert_eq!(config::bind_addr_from_env(), "0.0.0.0:3000");

    std::env::set_var(ENV_BIND, "127.0.0.1:8088");
    assert_eq!(config::bind_addr_from_env(), "127.0.0.1:8088");
    std::env::remove_var(ENV_BIND);
}
