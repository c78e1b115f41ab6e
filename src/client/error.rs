use serde_json::Value;

use crate::client::http::BoxError;
use crate::domain::ValidationError;

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`IpPanelChannel`](crate::IpPanelChannel).
///
/// Send-time variants come from message validation or the provider; `ApiKeyNotProvided`,
/// `SenderNotConfigured` and `Validation` are only raised while wiring a channel.
pub enum IpPanelError {
    /// Reserved for callers that require a recipient. `send` itself returns
    /// [`SendOutcome::NoRecipient`](crate::SendOutcome::NoRecipient) instead.
    #[error("{0}")]
    RecipientNotProvided(String),

    #[error("Sender (originator/from number) was not provided in message or configuration.")]
    SenderNotProvided,

    #[error("SMS content was not provided for a normal message.")]
    ContentNotProvided,

    #[error("Pattern code was not provided for a pattern-based message.")]
    MissingPatternCode,

    #[error("Pattern variables are invalid or not provided as an object.")]
    InvalidPatternVariables,

    /// The notification produced something other than an [`SmsMessage`](crate::SmsMessage).
    #[error(
        "The message object provided was invalid. Expected an SmsMessage or a string, got {found}."
    )]
    InvalidMessageObject { found: String },

    /// IPPanel rejected the request, or no response was received (reported as status 503).
    #[error(
        "SMS service responded with an error: \"{message}\"{}",
        status_suffix(.status_code)
    )]
    ServiceRespondedWithAnError {
        message: String,
        status_code: Option<u16>,
        body: Option<Value>,
        source: Option<BoxError>,
    },

    #[error("Could not send SMS: {reason}")]
    GenericError {
        reason: String,
        source: Option<BoxError>,
    },

    #[error("IPPanel API key is missing or not configured.")]
    ApiKeyNotProvided,

    #[error("Sender (originator/from number) was not provided in message or configuration.")]
    SenderNotConfigured,

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

impl IpPanelError {
    /// Default error for callers that treat a missing recipient as a failure.
    pub fn recipient_not_provided() -> Self {
        Self::RecipientNotProvided("Recipient not provided or invalid.".to_owned())
    }

    pub(crate) fn generic(reason: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::GenericError {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    /// HTTP status reported by the provider, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ServiceRespondedWithAnError { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Parsed provider response body, if any.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            Self::ServiceRespondedWithAnError { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

fn status_suffix(status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) if *code != 0 => format!(" (Status Code: {code})"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde_json::json;

    use super::*;

    #[test]
    fn service_error_message_includes_status_code() {
        let err = IpPanelError::ServiceRespondedWithAnError {
            message: "PERMISSION_DENIED".to_owned(),
            status_code: Some(401),
            body: Some(json!({"status": "Error"})),
            source: None,
        };
        assert_eq!(
            err.to_string(),
            "SMS service responded with an error: \"PERMISSION_DENIED\" (Status Code: 401)"
        );
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.response_body(), Some(&json!({"status": "Error"})));
    }

    #[test]
    fn service_error_message_omits_missing_status_code() {
        let err = IpPanelError::ServiceRespondedWithAnError {
            message: "oops".to_owned(),
            status_code: None,
            body: None,
            source: None,
        };
        assert_eq!(err.to_string(), "SMS service responded with an error: \"oops\"");
    }

    #[test]
    fn generic_error_keeps_source() {
        let err = IpPanelError::generic("boom", io::Error::other("inner"));
        assert_eq!(err.to_string(), "Could not send SMS: boom");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("inner"));
    }

    #[test]
    fn configuration_errors_are_readable() {
        assert_eq!(
            IpPanelError::ApiKeyNotProvided.to_string(),
            "IPPanel API key is missing or not configured."
        );
        assert_eq!(
            IpPanelError::recipient_not_provided().to_string(),
            "Recipient not provided or invalid."
        );
    }
}
