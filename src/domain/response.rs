use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw HTTP response as returned by an [`HttpTransport`](crate::HttpTransport).
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Body parsed as JSON, or `None` when it is not valid JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// `data` field of the IPPanel response envelope (e.g. the message id of a send).
    pub fn data(&self) -> Option<Value> {
        let mut body = self.json()?;
        body.get_mut("data").map(Value::take)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of a successful [`IpPanelChannel::send`](crate::IpPanelChannel::send).
pub enum SendOutcome {
    /// IPPanel accepted the message.
    Sent(HttpResponse),
    /// No recipient could be resolved; nothing was sent.
    NoRecipient,
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    /// The provider response, if a request was made.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Sent(response) => Some(response),
            Self::NoRecipient => None,
        }
    }
}
