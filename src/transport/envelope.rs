use serde_json::Value;

/// IPPanel's `{status, data, errorMessage}` response envelope.
///
/// A body that is not valid JSON decodes to an empty envelope rather than an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseEnvelope {
    body: Option<Value>,
}

impl ResponseEnvelope {
    pub fn decode(raw: &str) -> Self {
        Self {
            body: serde_json::from_str(raw).ok(),
        }
    }

    /// `true` when the top-level `status` is the literal string `"OK"`.
    pub fn is_ok(&self) -> bool {
        self.field("status").and_then(Value::as_str) == Some("OK")
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.as_ref()?.get(name)
    }

    /// Human-readable `errorMessage`, or `fallback` when the body carries none.
    pub fn error_message(&self, fallback: &str) -> String {
        self.field("errorMessage")
            .and_then(error_text)
            .unwrap_or_else(|| fallback.to_owned())
    }

    pub fn into_body(self) -> Option<Value> {
        self.body
    }

    /// The `data` field, `Null` when absent.
    pub fn into_data(self) -> Value {
        match self.body {
            Some(mut body) => body.get_mut("data").map(Value::take).unwrap_or(Value::Null),
            None => Value::Null,
        }
    }
}

/// Flatten an `errorMessage` value.
///
/// Field maps such as `{"recipient": ["invalid", "blocked"]}` become
/// `recipient: invalid|blocked`, joined with `, ` across fields. Nested maps contribute
/// their values the same way.
pub fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Object(fields) => Some(join_fields(
            fields.iter().map(|(key, value)| (key.clone(), value)),
        )),
        Value::Array(items) => Some(join_fields(
            items
                .iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value)),
        )),
        other => Some(other.to_string()),
    }
}

fn join_fields<'a>(fields: impl Iterator<Item = (String, &'a Value)>) -> String {
    fields
        .map(|(key, value)| format!("{key}: {}", join_values(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_values(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join("|"),
        Value::Object(map) => map.values().map(scalar_text).collect::<Vec<_>>().join("|"),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_recognizes_ok_status() {
        let envelope = ResponseEnvelope::decode(r#"{"status":"OK","data":{"credit":10.5}}"#);
        assert!(envelope.is_ok());
        assert_eq!(envelope.into_data(), json!({"credit": 10.5}));
    }

    #[test]
    fn status_match_is_exact() {
        assert!(!ResponseEnvelope::decode(r#"{"status":"ok"}"#).is_ok());
        assert!(!ResponseEnvelope::decode(r#"{"status":"Error"}"#).is_ok());
        assert!(!ResponseEnvelope::decode(r#"{}"#).is_ok());
    }

    #[test]
    fn invalid_json_is_an_empty_envelope() {
        let envelope = ResponseEnvelope::decode("<html>bad gateway</html>");
        assert!(!envelope.is_ok());
        assert_eq!(envelope.error_message("fallback"), "fallback");
        assert_eq!(envelope.into_body(), None);
    }

    #[test]
    fn missing_data_is_null() {
        assert_eq!(
            ResponseEnvelope::decode(r#"{"status":"OK"}"#).into_data(),
            Value::Null
        );
    }

    #[test]
    fn error_message_passes_strings_through() {
        let envelope =
            ResponseEnvelope::decode(r#"{"status":"Error","errorMessage":"PERMISSION_DENIED"}"#);
        assert_eq!(envelope.error_message("fallback"), "PERMISSION_DENIED");
    }

    #[test]
    fn error_message_flattens_field_maps() {
        let value = json!({
            "recipient": ["invalid", "blocked"],
            "sender": "not allowed",
        });
        assert_eq!(
            error_text(&value).as_deref(),
            Some("recipient: invalid|blocked, sender: not allowed")
        );
    }

    #[test]
    fn error_message_flattens_nested_maps_by_value() {
        let value = json!({"recipient": {"a": "invalid", "b": "blocked"}});
        assert_eq!(
            error_text(&value).as_deref(),
            Some("recipient: invalid|blocked")
        );
    }

    #[test]
    fn error_message_flattens_lists_by_index() {
        assert_eq!(
            error_text(&json!(["first", 2])).as_deref(),
            Some("0: first, 1: 2")
        );
    }

    #[test]
    fn null_error_message_uses_fallback() {
        let envelope = ResponseEnvelope::decode(r#"{"status":"Error","errorMessage":null}"#);
        assert_eq!(envelope.error_message("fallback"), "fallback");
    }
}
