//! Deployment configuration for [`IpPanelChannel`](crate::IpPanelChannel).

use std::time::Duration;

use serde::Deserialize;

use crate::domain::ValidationError;

/// Default IPPanel REST API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api2.ippanel.com/api/v1";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
/// IPPanel settings as loaded from the environment or any serde source.
///
/// Nothing is checked here; [`IpPanelChannel::from_config`](crate::IpPanelChannel::from_config)
/// rejects a missing API key or sender number.
pub struct IpPanelConfig {
    pub api_key: Option<String>,
    pub sender_number: Option<String>,
    pub base_url: String,
    /// Whole-request timeout in (fractional) seconds.
    pub timeout_secs: Option<f64>,
    pub user_agent: Option<String>,
}

impl Default for IpPanelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            sender_number: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl IpPanelConfig {
    pub const API_KEY_VAR: &'static str = "IPPANEL_API_KEY";
    pub const SENDER_NUMBER_VAR: &'static str = "IPPANEL_SENDER_NUMBER";
    pub const BASE_URL_VAR: &'static str = "IPPANEL_BASE_URL";
    pub const TIMEOUT_SECS_VAR: &'static str = "IPPANEL_TIMEOUT_SECS";
    pub const USER_AGENT_VAR: &'static str = "IPPANEL_USER_AGENT";

    /// Read settings from `IPPANEL_*` environment variables. Empty values count as unset.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let timeout_secs = var(Self::TIMEOUT_SECS_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| ValidationError::InvalidTimeout { input: raw })
            })
            .transpose()?;

        Ok(Self {
            api_key: var(Self::API_KEY_VAR),
            sender_number: var(Self::SENDER_NUMBER_VAR),
            base_url: var(Self::BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            timeout_secs,
            user_agent: var(Self::USER_AGENT_VAR),
        })
    }

    /// Request timeout, rejecting negative, infinite or NaN values.
    pub fn timeout(&self) -> Result<Option<Duration>, ValidationError> {
        self.timeout_secs
            .map(|secs| {
                Duration::try_from_secs_f64(secs).map_err(|_| ValidationError::InvalidTimeout {
                    input: secs.to_string(),
                })
            })
            .transpose()
    }
}
