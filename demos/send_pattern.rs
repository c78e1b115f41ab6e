use std::io;

use ippanel::{AnonymousNotifiable, IpPanelChannel, IpPanelConfig, SmsMessage};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let required = |name: &str| {
        std::env::var(name).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{name} environment variable is required"),
            )
        })
    };
    let phone = required("IPPANEL_PHONE")?;
    let pattern = required("IPPANEL_PATTERN_CODE")?;
    let code = std::env::var("IPPANEL_VERIFY_CODE").unwrap_or_else(|_| "123456".to_owned());

    let channel = IpPanelChannel::from_config(&IpPanelConfig::from_env()?)?;
    let user = AnonymousNotifiable::new().route(IpPanelChannel::ROUTE_NAME, phone);
    let outcome = channel
        .send(&user, |_| {
            SmsMessage::with_pattern(pattern, Default::default()).variable("code", code)
        })
        .await?;

    println!("sent: {}", outcome.is_sent());
    Ok(())
}
