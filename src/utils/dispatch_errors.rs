use crate::errors::ActionError;
use crate::utils::suggest::suggest;

fn build(err: ActionError, value: &str, known: &[&str]) -> ActionError {
    let suggestions = suggest(value, known, 3);
    let list = known.join(", ");
    let mut hint = format!("Use one of: {}.", list);
    if !suggestions.is_empty() {
        hint = format!("Did you mean: {}? {}", suggestions.join(", "), hint);
    }
    err.with_hint(hint).with_details(serde_json::json!({
        "known": known,
        "did_you_mean": suggestions,
    }))
}

pub fn unknown_action_error(action: &str, known: &[&str]) -> ActionError {
    build(
        ActionError::unsupported_action(format!("Unsupported action: {}", action)),
        action,
        known,
    )
}

pub fn unknown_intent_error(intent: &str, known: &[&str]) -> ActionError {
    build(
        ActionError::unsupported_intent(format!("Unsupported intent: {}", intent)),
        intent,
        known,
    )
}
