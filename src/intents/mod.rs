pub mod envelope;

use crate::actions::ActionDispatcher;
use crate::constants::{deals, pagination};
use crate::errors::ActionError;
use crate::services::logger::Logger;
use crate::utils::dispatch_errors::unknown_intent_error;
use serde_json::Value;
use std::sync::Arc;

pub const INTENTS: &[&str] = &[
    "conteo_simple",
    "lista_datos",
    "analisis",
    "auditoria_crm_pwc",
    "riesgo",
    "productividad",
    "dashboard",
    "modificacion",
];

/// Maps Spanish-named analysis intents onto dispatcher actions. Mutating
/// intents are gated behind an explicit confirmation flag.
pub struct IntentBackend {
    logger: Logger,
    dispatcher: Arc<ActionDispatcher>,
    require_confirmation: bool,
}

impl IntentBackend {
    pub fn new(logger: Logger, dispatcher: Arc<ActionDispatcher>, require_confirmation: bool) -> Self {
        Self {
            logger: logger.child("intents"),
            dispatcher,
            require_confirmation,
        }
    }

    /// Resolves one intent into its `datos` payload. The HTTP layer wraps
    /// the outcome in the response envelope.
    pub async fn handle(
        &self,
        intent: &str,
        contexto_usuario: &Value,
        parametros: &Value,
    ) -> Result<Value, ActionError> {
        let account_id = account_id(contexto_usuario);
        self.logger.debug(
            "Intent",
            Some(&serde_json::json!({"intent": intent, "account_id": account_id})),
        );

        match intent {
            "conteo_simple" | "dashboard" => self.counts(parametros, account_id).await,
            "lista_datos" => self.deal_listing(parametros, account_id).await,
            "analisis" | "auditoria_crm_pwc" => {
                self.full_portfolio(
                    parametros,
                    contexto_usuario,
                    account_id,
                    deals::DEFAULT_DRAIN_STATUS,
                )
                .await
            }
            "riesgo" => {
                self.full_portfolio(
                    parametros,
                    contexto_usuario,
                    account_id,
                    deals::DEFAULT_RISK_STATUS,
                )
                .await
            }
            "productividad" => self.activity_listing(parametros, contexto_usuario, account_id).await,
            "modificacion" => self.mutation(parametros, account_id).await,
            _ => Err(unknown_intent_error(intent, INTENTS)),
        }
    }

    async fn counts(&self, parametros: &Value, account_id: Value) -> Result<Value, ActionError> {
        let analysis = self
            .dispatcher
            .dispatch("analyzePipeline", parametros.clone())
            .await?;
        Ok(serde_json::json!({
            "totals": analysis.get("totals").cloned().unwrap_or(Value::Null),
            "meta": analysis.get("meta").cloned().unwrap_or(Value::Null),
            "account_id": account_id,
        }))
    }

    async fn deal_listing(&self, parametros: &Value, account_id: Value) -> Result<Value, ActionError> {
        let page = self
            .dispatcher
            .dispatch("listDeals", parametros.clone())
            .await?;
        Ok(serde_json::json!({
            "deals": page.get("items").cloned().unwrap_or(Value::Null),
            "pagination": page.get("pagination").cloned().unwrap_or(Value::Null),
            "account_id": account_id,
        }))
    }

    async fn full_portfolio(
        &self,
        parametros: &Value,
        contexto_usuario: &Value,
        account_id: Value,
        default_status: &str,
    ) -> Result<Value, ActionError> {
        let status = parametros
            .get("status")
            .and_then(|v| v.as_str())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(default_status)
            .to_string();
        let items = self
            .dispatcher
            .drain_deals(&status, pagination::DRAIN_PAGE_SIZE)
            .await?;
        Ok(serde_json::json!({
            "deals": items,
            "contexto_usuario": contexto_usuario,
            "account_id": account_id,
        }))
    }

    async fn activity_listing(
        &self,
        parametros: &Value,
        contexto_usuario: &Value,
        account_id: Value,
    ) -> Result<Value, ActionError> {
        // The account identity stands in as the activity owner filter when
        // the caller does not name one.
        let mut params = parametros.as_object().cloned().unwrap_or_default();
        let named_user = params.get("user_id").filter(|v| !v.is_null()).is_some();
        if !named_user && !account_id.is_null() {
            params.insert("user_id".to_string(), account_id.clone());
        }
        let user_id = params.get("user_id").cloned().unwrap_or(Value::Null);

        let page = self
            .dispatcher
            .dispatch("listActivities", Value::Object(params))
            .await?;
        Ok(serde_json::json!({
            "activities": page.get("items").cloned().unwrap_or(Value::Null),
            "pagination": page.get("pagination").cloned().unwrap_or(Value::Null),
            "contexto_usuario": contexto_usuario,
            "account_id": account_id,
            "user_id": user_id,
        }))
    }

    async fn mutation(&self, parametros: &Value, account_id: Value) -> Result<Value, ActionError> {
        let tipo = parametros
            .get("tipo")
            .and_then(|v| v.as_str())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ActionError::invalid_params("modificacion requires a tipo field")
            })?;
        let action = match tipo {
            "create_deal" => "createDeal",
            "update_deal" => "updateDeal",
            "move_deal" => "moveDeal",
            "add_note" => "addNote",
            _ => {
                return Err(ActionError::invalid_params(format!(
                    "Unsupported modificacion tipo: {}",
                    tipo
                ))
                .with_hint("Use one of: create_deal, update_deal, move_deal, add_note."))
            }
        };

        if self.require_confirmation {
            let confirmed = parametros
                .get("confirmado")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            if !confirmed {
                return Err(ActionError::confirmation_required(format!(
                    "modificacion {} requires confirmado=true",
                    tipo
                )));
            }
        }

        let mut action_params = parametros.as_object().cloned().unwrap_or_default();
        action_params.remove("tipo");
        action_params.remove("confirmado");

        let resultado = self
            .dispatcher
            .dispatch(action, Value::Object(action_params))
            .await?;
        Ok(serde_json::json!({
            "resultado": resultado,
            "account_id": account_id,
        }))
    }
}

/// First identity the caller context carries, in precedence order.
fn account_id(contexto_usuario: &Value) -> Value {
    for key in ["account_id", "tenant_id", "user_id"] {
        if let Some(value) = contexto_usuario.get(key).filter(|v| !v.is_null()) {
            return value.clone();
        }
    }
    Value::Null
}
