//! Client layer: the IPPanel notification channel.

mod error;
mod http;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

pub use error::IpPanelError;
pub use http::{BoxError, BoxFuture, Header, HttpTransport, ReqwestTransport};

use crate::config::{DEFAULT_BASE_URL, IpPanelConfig};
use crate::domain::{
    HttpResponse, Notifiable, Outgoing, Recipient, SendOutcome, SmsMessage, ValidationError,
};
use crate::transport::{CHECK_CREDIT_PATH, ResponseEnvelope, SendPayload, encode_send_payload};

const API_KEY_HEADER: &str = "apiKey";
const JSON_MIME: &str = "application/json";
const SERVICE_UNAVAILABLE: u16 = 503;
const UNKNOWN_SEND_ERROR: &str = "Unknown error from IPPanel.";
const UNKNOWN_CREDIT_ERROR: &str = "Failed to retrieve credit information.";

#[derive(Clone)]
/// Builder for [`IpPanelChannel`] that validates the wiring.
///
/// Use this when you need to customize the base URL, timeout, user-agent, or transport.
pub struct IpPanelChannelBuilder {
    api_key: String,
    default_sender: String,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl IpPanelChannelBuilder {
    pub fn new(api_key: impl Into<String>, default_sender: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            default_sender: default_sender.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Override the API base URL (`https://api2.ippanel.com/api/v1` by default).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a custom HTTP transport instead of the default reqwest client.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build an [`IpPanelChannel`].
    ///
    /// Errors:
    /// - [`IpPanelError::ApiKeyNotProvided`] when the API key is blank,
    /// - [`IpPanelError::SenderNotConfigured`] when the default sender is blank,
    /// - [`IpPanelError::Validation`] when the base URL is not an absolute http(s) URL.
    pub fn build(self) -> Result<IpPanelChannel, IpPanelError> {
        if self.api_key.trim().is_empty() {
            return Err(IpPanelError::ApiKeyNotProvided);
        }
        if self.default_sender.trim().is_empty() {
            return Err(IpPanelError::SenderNotConfigured);
        }
        let base_url = validate_base_url(&self.base_url)?;

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| IpPanelError::generic("failed to build HTTP client", err))?;
                Arc::new(ReqwestTransport::new(client))
            }
        };

        Ok(IpPanelChannel {
            api_key: self.api_key,
            default_sender: self.default_sender,
            base_url,
            http,
        })
    }
}

#[derive(Clone)]
/// Notification channel delivering SMS through IPPanel.
///
/// The channel only holds immutable configuration, so one instance can be shared between
/// tasks. Every [`send`](Self::send) or [`get_credit`](Self::get_credit) call performs at
/// most one HTTP round-trip and never retries.
///
/// ```rust,no_run
/// use ippanel::{AnonymousNotifiable, IpPanelChannel, SmsMessage};
///
/// # async fn run() -> Result<(), ippanel::IpPanelError> {
/// let channel = IpPanelChannel::builder("api-key", "+983000123").build()?;
/// let user = AnonymousNotifiable::new().route(IpPanelChannel::ROUTE_NAME, "+989120000001");
/// let outcome = channel
///     .send(&user, |_| SmsMessage::text("Your order has shipped."))
///     .await?;
/// assert!(outcome.is_sent());
/// # Ok(())
/// # }
/// ```
pub struct IpPanelChannel {
    api_key: String,
    default_sender: String,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for IpPanelChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpPanelChannel")
            .field("api_key", &"<redacted>")
            .field("default_sender", &self.default_sender)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl IpPanelChannel {
    /// Route name asked first from [`Notifiable::route_notification_for`].
    pub const ROUTE_NAME: &'static str = "persianSms";
    /// Route name asked second, identifying this channel itself.
    pub const CHANNEL_NAME: &'static str = "ippanel";

    /// Create a channel using the default base URL and a default reqwest client.
    ///
    /// Values are not validated; use [`IpPanelChannel::builder`] or
    /// [`IpPanelChannel::from_config`] to reject a blank key or sender up front.
    pub fn new(api_key: impl Into<String>, default_sender: impl Into<String>) -> Self {
        Self::with_transport(
            Arc::new(ReqwestTransport::default()),
            api_key,
            default_sender,
        )
    }

    /// Create a channel on top of an existing transport, without validation.
    pub fn with_transport(
        http: Arc<dyn HttpTransport>,
        api_key: impl Into<String>,
        default_sender: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            default_sender: default_sender.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            http,
        }
    }

    /// Start building a channel with custom settings.
    pub fn builder(
        api_key: impl Into<String>,
        default_sender: impl Into<String>,
    ) -> IpPanelChannelBuilder {
        IpPanelChannelBuilder::new(api_key, default_sender)
    }

    /// Wire a channel from deployment configuration.
    pub fn from_config(config: &IpPanelConfig) -> Result<Self, IpPanelError> {
        let mut builder = Self::builder(
            config.api_key.clone().unwrap_or_default(),
            config.sender_number.clone().unwrap_or_default(),
        )
        .base_url(config.base_url.clone());
        if let Some(timeout) = config.timeout()? {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = config.user_agent.as_ref() {
            builder = builder.user_agent(user_agent.clone());
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_sender(&self) -> &str {
        &self.default_sender
    }

    /// Send the SMS produced by `to_sms` for `notifiable`.
    ///
    /// The recipient is the message's own override if set, otherwise the first non-empty
    /// answer from the notifiable's routing lookups. When none is found nothing is sent and
    /// [`SendOutcome::NoRecipient`] is returned.
    ///
    /// Pattern messages are sent to the first resolved recipient only.
    ///
    /// Errors:
    /// - [`IpPanelError::InvalidMessageObject`] when `to_sms` does not produce an [`SmsMessage`],
    /// - [`IpPanelError::SenderNotProvided`], [`IpPanelError::ContentNotProvided`],
    ///   [`IpPanelError::MissingPatternCode`], [`IpPanelError::InvalidPatternVariables`]
    ///   for messages that cannot be sent,
    /// - [`IpPanelError::ServiceRespondedWithAnError`] when IPPanel rejects the request or no
    ///   response is received (status 503),
    /// - [`IpPanelError::GenericError`] for anything else.
    pub async fn send<N, F, O>(
        &self,
        notifiable: &N,
        to_sms: F,
    ) -> Result<SendOutcome, IpPanelError>
    where
        N: Notifiable + ?Sized,
        F: FnOnce(&N) -> O,
        O: Into<Outgoing>,
    {
        let message = match to_sms(notifiable).into() {
            Outgoing::Message(message) => message,
            other => {
                return Err(IpPanelError::InvalidMessageObject {
                    found: other.describe(),
                });
            }
        };

        let Some(recipient) = resolve_recipient(&message, notifiable) else {
            debug!("no SMS recipient could be resolved; nothing sent");
            return Ok(SendOutcome::NoRecipient);
        };
        let recipients = recipient.into_vec();

        let sender = message
            .sender
            .as_deref()
            .filter(|sender| !sender.is_empty())
            .unwrap_or(self.default_sender.as_str());
        if sender.trim().is_empty() {
            return Err(IpPanelError::SenderNotProvided);
        }

        let payload = build_payload(&message, sender, &recipients)?;
        let body = encode_send_payload(&payload)
            .map_err(|err| IpPanelError::generic("request payload could not be encoded", err))?;
        let url = self.endpoint(payload.path());

        debug!(
            endpoint = %url,
            pattern = payload.is_pattern(),
            recipients = recipients.len(),
            "sending SMS through IPPanel"
        );
        let result = self.http.post_json(&url, &self.headers(true), &body).await;
        let (response, _) = classify(
            result,
            |status| (200..300).contains(&status),
            UNKNOWN_SEND_ERROR,
        )?;
        Ok(SendOutcome::Sent(response))
    }

    /// Send an already built message to `notifiable`.
    pub async fn send_message<N>(
        &self,
        notifiable: &N,
        message: SmsMessage,
    ) -> Result<SendOutcome, IpPanelError>
    where
        N: Notifiable + ?Sized,
    {
        self.send(notifiable, move |_| message).await
    }

    /// Fetch the account credit (`data` of the credit endpoint's response).
    ///
    /// Succeeds only on HTTP 200 with `status: "OK"`; failures are classified like
    /// [`send`](Self::send).
    pub async fn get_credit(&self) -> Result<Value, IpPanelError> {
        let url = self.endpoint(CHECK_CREDIT_PATH);
        debug!(endpoint = %url, "checking IPPanel credit");

        let result = self.http.get(&url, &self.headers(false)).await;
        let (_, envelope) = classify(result, |status| status == 200, UNKNOWN_CREDIT_ERROR)?;
        Ok(envelope.into_data())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self, json_body: bool) -> Vec<Header> {
        let mut headers = vec![
            (API_KEY_HEADER, self.api_key.clone()),
            ("Accept", JSON_MIME.to_owned()),
        ];
        if json_body {
            headers.push(("Content-Type", JSON_MIME.to_owned()));
        }
        headers
    }
}

fn resolve_recipient<N>(message: &SmsMessage, notifiable: &N) -> Option<Recipient>
where
    N: Notifiable + ?Sized,
{
    let present = |recipient: Option<Recipient>| recipient.filter(|it| !it.is_empty());

    present(message.recipient.clone())
        .or_else(|| present(notifiable.route_notification_for(IpPanelChannel::ROUTE_NAME)))
        .or_else(|| present(notifiable.route_notification_for(IpPanelChannel::CHANNEL_NAME)))
        .or_else(|| present(notifiable.route_notification_for_ippanel()))
        .or_else(|| present(notifiable.phone_number().map(Recipient::One)))
        .or_else(|| present(notifiable.mobile().map(Recipient::One)))
        .or_else(|| present(notifiable.as_recipient()))
}

fn build_payload<'a>(
    message: &'a SmsMessage,
    sender: &'a str,
    recipients: &'a [String],
) -> Result<SendPayload<'a>, IpPanelError> {
    if message.is_pattern() {
        let code = message
            .pattern_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or(IpPanelError::MissingPatternCode)?;
        let variables = message
            .variables
            .as_ref()
            .ok_or(IpPanelError::InvalidPatternVariables)?;
        let recipient = recipients
            .first()
            .ok_or_else(IpPanelError::recipient_not_provided)?;
        if recipients.len() > 1 {
            warn!(
                recipients = recipients.len(),
                "pattern SMS is only sent to the first recipient"
            );
        }
        return Ok(SendPayload::pattern(code, sender, recipient, variables));
    }

    let content = message.content.as_deref().unwrap_or_default();
    if content.trim().is_empty() {
        return Err(IpPanelError::ContentNotProvided);
    }
    let time = message
        .scheduled_at
        .as_deref()
        .filter(|time| !time.trim().is_empty());
    Ok(SendPayload::single(recipients, sender, content, time))
}

fn classify(
    result: Result<HttpResponse, BoxError>,
    accepts_status: fn(u16) -> bool,
    fallback: &str,
) -> Result<(HttpResponse, ResponseEnvelope), IpPanelError> {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "IPPanel request failed without a response");
            return Err(IpPanelError::ServiceRespondedWithAnError {
                message: err.to_string(),
                status_code: Some(SERVICE_UNAVAILABLE),
                body: None,
                source: Some(err),
            });
        }
    };

    let envelope = ResponseEnvelope::decode(&response.body);
    if accepts_status(response.status) && envelope.is_ok() {
        return Ok((response, envelope));
    }

    let message = envelope.error_message(fallback);
    warn!(status = response.status, error = %message, "IPPanel responded with an error");
    Err(IpPanelError::ServiceRespondedWithAnError {
        message,
        status_code: Some(response.status),
        body: envelope.into_body(),
        source: None,
    })
}

fn validate_base_url(input: &str) -> Result<String, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidBaseUrl {
        input: input.to_owned(),
        reason,
    };
    let parsed = url::Url::parse(input.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
    }
    Ok(input.trim().trim_end_matches('/').to_owned())
}
