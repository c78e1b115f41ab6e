//! Notification channel for the IPPanel SMS HTTP API.
//!
//! The crate is layered like a small typed client: a domain layer with the message
//! builder and recipient routing, a transport layer for IPPanel's JSON payloads and
//! response envelope, and a client layer with [`IpPanelChannel`] orchestrating one
//! request per send.
//!
//! ```rust,no_run
//! use ippanel::{IpPanelChannel, IpPanelConfig, SendOutcome, SmsMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let channel = IpPanelChannel::from_config(&IpPanelConfig::from_env()?)?;
//!     let outcome = channel
//!         .send("+989120000001", |_| {
//!             SmsMessage::with_pattern("verify_code", Default::default()).variable("code", "4821")
//!         })
//!         .await?;
//!     if let SendOutcome::Sent(response) = outcome {
//!         println!("accepted: {:?}", response.data());
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod transport;

pub use client::{
    BoxError, BoxFuture, Header, HttpTransport, IpPanelChannel, IpPanelChannelBuilder,
    IpPanelError, ReqwestTransport,
};
pub use config::{DEFAULT_BASE_URL, IpPanelConfig};
pub use domain::{
    AnonymousNotifiable, HttpResponse, Notifiable, Outgoing, Recipient, SendOutcome, SmsMessage,
    ValidationError,
};
