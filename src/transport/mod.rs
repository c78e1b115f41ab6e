//! Transport layer: IPPanel JSON payloads and the response envelope.

mod envelope;
mod send_sms;

pub use envelope::ResponseEnvelope;
pub use send_sms::{SendPayload, encode_send_payload};

pub const SEND_SINGLE_PATH: &str = "/sms/send/webservice/single";
pub const SEND_PATTERN_PATH: &str = "/sms/pattern/normal/send";
pub const CHECK_CREDIT_PATH: &str = "/sms/accounting/credit/show";
