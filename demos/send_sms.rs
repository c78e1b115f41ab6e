use std::io;

use ippanel::{IpPanelChannel, IpPanelConfig, SendOutcome, SmsMessage};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let phone = std::env::var("IPPANEL_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "IPPANEL_PHONE environment variable is required",
        )
    })?;
    let text = std::env::var("IPPANEL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the ippanel demo.".to_owned());

    let channel = IpPanelChannel::from_config(&IpPanelConfig::from_env()?)?;
    let outcome = channel
        .send(phone.as_str(), |_| SmsMessage::text(text))
        .await?;

    match outcome {
        SendOutcome::Sent(response) => {
            println!("status: {}, data: {:?}", response.status, response.data());
        }
        SendOutcome::NoRecipient => println!("no recipient; nothing sent"),
    }

    Ok(())
}
