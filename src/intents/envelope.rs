use crate::errors::{ActionError, ActionErrorKind};
use serde_json::Value;

/// Successful intent envelope. `red_flags` and `alertas` are always present
/// so downstream consumers can iterate them without null checks.
pub fn build_ok(intent: &str, datos: Value) -> Value {
    serde_json::json!({
        "ok": true,
        "intent": intent,
        "datos": datos,
        "red_flags": [],
        "alertas": [],
        "metadata": metadata(),
    })
}

pub fn build_error(intent: Option<&str>, err: &ActionError) -> Value {
    serde_json::json!({
        "ok": false,
        "intent": intent,
        "codigo": error_codigo(err),
        "mensaje_usuario": mensaje_usuario(err),
        "detalle_tecnico": err.message,
        "metadata": metadata(),
    })
}

fn metadata() -> Value {
    serde_json::json!({
        "fuente": "pipedrive",
        "generado_en": chrono::Utc::now().to_rfc3339(),
        "request_id": uuid::Uuid::new_v4().to_string(),
    })
}

fn error_codigo(err: &ActionError) -> String {
    match err.kind {
        ActionErrorKind::Config
        | ActionErrorKind::Timeout
        | ActionErrorKind::UnsupportedIntent
        | ActionErrorKind::ConfirmationRequired => err.code.clone(),
        ActionErrorKind::InvalidParams | ActionErrorKind::UnsupportedAction => {
            // Codes already in the Spanish taxonomy pass through unchanged.
            if err.code.starts_with("ERR_CRM_") {
                err.code.clone()
            } else {
                "ERR_CRM_PARAMETROS_INVALIDOS".to_string()
            }
        }
        _ => "ERROR_BACKEND_CRM".to_string(),
    }
}

fn mensaje_usuario(err: &ActionError) -> &'static str {
    match err.kind {
        ActionErrorKind::Config => "El CRM no está configurado correctamente.",
        ActionErrorKind::Timeout => "El CRM tardó demasiado en responder. Intenta de nuevo.",
        ActionErrorKind::ConfirmationRequired => {
            "Esta operación modifica datos y requiere confirmación explícita."
        }
        ActionErrorKind::UnsupportedIntent => "No reconozco esa consulta sobre el CRM.",
        ActionErrorKind::InvalidParams | ActionErrorKind::UnsupportedAction => {
            "La consulta tiene parámetros inválidos."
        }
        _ => "No pude consultar el CRM en este momento.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_carries_empty_alert_lists() {
        let envelope = build_ok("conteo_simple", serde_json::json!({"totals": {}}));
        assert_eq!(envelope["ok"], true);
        assert_eq!(envelope["intent"], "conteo_simple");
        assert_eq!(envelope["red_flags"], serde_json::json!([]));
        assert_eq!(envelope["alertas"], serde_json::json!([]));
        assert_eq!(envelope["metadata"]["fuente"], "pipedrive");
        assert!(envelope["metadata"]["request_id"].is_string());
    }

    #[test]
    fn config_error_keeps_its_code() {
        let err = ActionError::config("missing env");
        let envelope = build_error(Some("riesgo"), &err);
        assert_eq!(envelope["ok"], false);
        assert_eq!(envelope["codigo"], "ERR_CRM_CONFIG");
        assert_eq!(envelope["detalle_tecnico"], "missing env");
    }

    #[test]
    fn vendor_error_maps_to_backend_code() {
        let err = ActionError::vendor("HTTP 500");
        let envelope = build_error(None, &err);
        assert_eq!(envelope["codigo"], "ERROR_BACKEND_CRM");
        assert!(envelope["intent"].is_null());
    }

    #[test]
    fn invalid_params_map_to_spanish_code() {
        let err = ActionError::invalid_params("term must be a non-empty string");
        let envelope = build_error(Some("lista_datos"), &err);
        assert_eq!(envelope["codigo"], "ERR_CRM_PARAMETROS_INVALIDOS");
    }
}
