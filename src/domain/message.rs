use serde_json::{Map, Value};

use crate::domain::value::Recipient;

#[derive(Debug, Clone, Default, PartialEq)]
/// One outgoing SMS: either plain `content` or a pattern code with variables.
///
/// The fluent setters keep the two modes mutually exclusive. Nothing is validated here;
/// the channel checks the message when it is sent.
///
/// ```rust
/// use ippanel::SmsMessage;
///
/// let otp = SmsMessage::new()
///     .pattern("verify_code", Default::default())
///     .variable("code", "12345")
///     .sender("+983000789");
/// assert!(otp.is_pattern());
/// ```
pub struct SmsMessage {
    /// Plain-text body for normal sends.
    pub content: Option<String>,
    /// Code of a pattern approved in the IPPanel dashboard.
    pub pattern_code: Option<String>,
    /// Named substitutions for the pattern.
    pub variables: Option<Map<String, Value>>,
    /// Overrides the channel's default sender number.
    pub sender: Option<String>,
    /// Overrides the recipient routed from the notifiable.
    pub recipient: Option<Recipient>,
    /// Scheduled send time (ISO-8601, e.g. `2025-03-21T09:12:50.824Z`).
    ///
    /// Sent as the provider's `time` field for normal messages only.
    pub scheduled_at: Option<String>,
}

impl SmsMessage {
    /// Create an empty message. Set content or a pattern before sending it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normal message with the given text.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new().content(content)
    }

    /// Create a pattern message.
    pub fn with_pattern(code: impl Into<String>, variables: Map<String, Value>) -> Self {
        Self::new().pattern(code, variables)
    }

    /// Set the plain-text body. Clears the pattern code and variables.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self.pattern_code = None;
        self.variables = None;
        self
    }

    /// Switch to pattern mode. Clears the plain-text body.
    pub fn pattern(mut self, code: impl Into<String>, variables: Map<String, Value>) -> Self {
        self.pattern_code = Some(code.into());
        self.variables = Some(variables);
        self.content = None;
        self
    }

    /// Insert or replace one pattern variable.
    ///
    /// Works on any message; a later [`SmsMessage::pattern`] call replaces the whole map.
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set the sender number for this message only.
    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Send to this recipient instead of the one routed from the notifiable.
    pub fn recipient(mut self, recipient: impl Into<Recipient>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Schedule the message.
    pub fn at(mut self, date_time: impl Into<String>) -> Self {
        self.scheduled_at = Some(date_time.into());
        self
    }

    /// `true` when a non-empty pattern code is set.
    pub fn is_pattern(&self) -> bool {
        self.pattern_code
            .as_deref()
            .is_some_and(|code| !code.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// What a notification produced for the SMS channel.
///
/// Only [`Outgoing::Message`] can be sent; the other shapes are reported as
/// invalid message objects.
pub enum Outgoing {
    Message(SmsMessage),
    /// A bare string instead of a structured message.
    Text(String),
    /// Anything else. Carries the type name when one is known.
    Unrecognized { type_name: Option<String> },
}

impl Outgoing {
    /// Wrap an arbitrary value, remembering only its type name.
    pub fn unrecognized<T: ?Sized>(_value: &T) -> Self {
        Self::Unrecognized {
            type_name: Some(std::any::type_name::<T>().to_owned()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Message(_) => "SmsMessage".to_owned(),
            Self::Text(text) => format!("a plain string ({text:?})"),
            Self::Unrecognized {
                type_name: Some(name),
            } => name.clone(),
            Self::Unrecognized { type_name: None } => "Unknown".to_owned(),
        }
    }
}

impl From<SmsMessage> for Outgoing {
    fn from(value: SmsMessage) -> Self {
        Self::Message(value)
    }
}

impl From<String> for Outgoing {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Outgoing {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Value> for Outgoing {
    /// JSON strings become [`Outgoing::Text`]; any other JSON value has no useful type name.
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            _ => Self::Unrecognized { type_name: None },
        }
    }
}

impl<T> From<Vec<T>> for Outgoing {
    /// Lists are never messages; like other untyped values they report as `Unknown`.
    fn from(_value: Vec<T>) -> Self {
        Self::Unrecognized { type_name: None }
    }
}
