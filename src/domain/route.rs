use std::collections::HashMap;

use serde_json::Value;

use crate::domain::value::Recipient;

/// A target that can receive SMS notifications.
///
/// Every lookup defaults to `None`; implement the ones your type can answer. The channel
/// asks them in declaration order and uses the first non-empty answer.
pub trait Notifiable {
    /// Generic routing lookup keyed by channel name.
    fn route_notification_for(&self, _channel: &str) -> Option<Recipient> {
        None
    }

    /// IPPanel-specific routing lookup.
    fn route_notification_for_ippanel(&self) -> Option<Recipient> {
        None
    }

    /// `phone_number` attribute of the target.
    fn phone_number(&self) -> Option<String> {
        None
    }

    /// `mobile` attribute of the target.
    fn mobile(&self) -> Option<String> {
        None
    }

    /// The target itself when it is a phone number or a list of them.
    fn as_recipient(&self) -> Option<Recipient> {
        None
    }
}

impl Notifiable for str {
    fn as_recipient(&self) -> Option<Recipient> {
        Some(Recipient::One(self.to_owned()))
    }
}

impl Notifiable for String {
    fn as_recipient(&self) -> Option<Recipient> {
        Some(Recipient::One(self.clone()))
    }
}

impl Notifiable for [String] {
    fn as_recipient(&self) -> Option<Recipient> {
        Some(Recipient::Many(self.to_vec()))
    }
}

impl Notifiable for Vec<String> {
    fn as_recipient(&self) -> Option<Recipient> {
        self.as_slice().as_recipient()
    }
}

impl Notifiable for Value {
    fn phone_number(&self) -> Option<String> {
        string_field(self, "phone_number")
    }

    fn mobile(&self) -> Option<String> {
        string_field(self, "mobile")
    }

    /// JSON strings, and arrays made only of strings.
    fn as_recipient(&self) -> Option<Recipient> {
        match self {
            Value::String(number) => Some(Recipient::One(number.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Recipient::Many),
            _ => None,
        }
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value.get(field)?.as_str().map(str::to_owned)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// On-demand target for numbers that do not belong to any entity.
///
/// ```rust
/// use ippanel::{AnonymousNotifiable, IpPanelChannel};
///
/// let target = AnonymousNotifiable::new().route(IpPanelChannel::ROUTE_NAME, "+989120000001");
/// ```
pub struct AnonymousNotifiable {
    routes: HashMap<String, Recipient>,
}

impl AnonymousNotifiable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the recipient for a channel name, replacing any earlier one.
    pub fn route(mut self, channel: impl Into<String>, recipient: impl Into<Recipient>) -> Self {
        self.routes.insert(channel.into(), recipient.into());
        self
    }
}

impl Notifiable for AnonymousNotifiable {
    fn route_notification_for(&self, channel: &str) -> Option<Recipient> {
        self.routes.get(channel).cloned()
    }
}
