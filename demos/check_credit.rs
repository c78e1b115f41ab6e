use ippanel::{IpPanelChannel, IpPanelConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let channel = IpPanelChannel::from_config(&IpPanelConfig::from_env()?)?;
    let credit = channel.get_credit().await?;
    println!("credit: {credit}");

    Ok(())
}
