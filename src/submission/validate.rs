use serde::Deserialize;
use serde_json::Value;

pub const FIELDS_REQUIRED: &str = "All fields are required.";

/// Body of `POST /Form`. Fields are kept as raw JSON so that a missing,
/// `null`, `false`, `0` or empty value is reported the same way.
#[derive(Debug, Default, Deserialize)]
pub struct FormPayload {
    pub name: Option<Value>,
    #[serde(rename = "emailPhone")]
    pub email_phone: Option<Value>,
    pub message: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidForm {
    pub name: String,
    pub email_phone: String,
    pub message: String,
}

/// Presence check only. Whitespace is accepted as content.
pub fn validate(payload: FormPayload) -> Result<ValidForm, &'static str> {
    match (
        present(payload.name),
        present(payload.email_phone),
        present(payload.message),
    ) {
        (Some(name), Some(email_phone), Some(message)) => Ok(ValidForm {
            name,
            email_phone,
            message,
        }),
        _ => Err(FIELDS_REQUIRED),
    }
}

/// Text content of a field, or `None` for falsy and non-scalar values.
fn present(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}
