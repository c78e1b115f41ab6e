use serde::Serialize;
use serde_json::{Map, Value};

use super::{SEND_PATTERN_PATH, SEND_SINGLE_PATH};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("payload could not be encoded as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Request body for one of the two send endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SendPayload<'a> {
    Single(SinglePayload<'a>),
    Pattern(PatternPayload<'a>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinglePayload<'a> {
    recipient: &'a [String],
    sender: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternPayload<'a> {
    code: &'a str,
    sender: &'a str,
    recipient: &'a str,
    variable: &'a Map<String, Value>,
}

impl<'a> SendPayload<'a> {
    pub fn single(
        recipients: &'a [String],
        sender: &'a str,
        message: &'a str,
        time: Option<&'a str>,
    ) -> Self {
        Self::Single(SinglePayload {
            recipient: recipients,
            sender,
            message,
            time,
        })
    }

    /// Pattern sends address a single number.
    pub fn pattern(
        code: &'a str,
        sender: &'a str,
        recipient: &'a str,
        variables: &'a Map<String, Value>,
    ) -> Self {
        Self::Pattern(PatternPayload {
            code,
            sender,
            recipient,
            variable: variables,
        })
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Single(_) => SEND_SINGLE_PATH,
            Self::Pattern(_) => SEND_PATTERN_PATH,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }
}

pub fn encode_send_payload(payload: &SendPayload<'_>) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(payload)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encode_single_payload_keeps_recipient_list() {
        let recipients = vec!["+989120000001".to_owned(), "+989120000002".to_owned()];
        let payload = SendPayload::single(&recipients, "+983000123", "hello", None);

        assert_eq!(payload.path(), "/sms/send/webservice/single");
        assert_eq!(
            encode_send_payload(&payload).unwrap(),
            json!({
                "recipient": ["+989120000001", "+989120000002"],
                "sender": "+983000123",
                "message": "hello",
            })
        );
    }

    #[test]
    fn encode_single_payload_includes_time_when_scheduled() {
        let recipients = vec!["+989120000001".to_owned()];
        let payload = SendPayload::single(
            &recipients,
            "+983000123",
            "hello",
            Some("2025-03-21T09:12:50.824Z"),
        );

        assert_eq!(
            encode_send_payload(&payload).unwrap()["time"],
            json!("2025-03-21T09:12:50.824Z")
        );
    }

    #[test]
    fn encode_pattern_payload_uses_scalar_recipient_and_object_variables() {
        let variables = Map::new();
        let payload = SendPayload::pattern("code_1", "+983000123", "+989120000002", &variables);

        assert!(payload.is_pattern());
        assert_eq!(payload.path(), "/sms/pattern/normal/send");
        assert_eq!(
            encode_send_payload(&payload).unwrap(),
            json!({
                "code": "code_1",
                "sender": "+983000123",
                "recipient": "+989120000002",
                "variable": {},
            })
        );
    }
}
