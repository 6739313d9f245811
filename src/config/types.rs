use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// On-disk configuration. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub report_path: Option<String>,
    pub timeout: Option<DurationValue>,
    pub user_agent: Option<String>,
    pub headers: Option<Vec<String>>,
    pub identity: Option<IdentityConfig>,
    pub targets: Option<Vec<TargetConfig>>,
    pub scenarios: Option<Vec<ScenarioConfig>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    pub name: Option<String>,
    pub registration: Option<String>,
    pub custom_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub name: String,
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub name: String,
    pub endpoint: String,
    pub requests: usize,
    /// 1 runs sequentially.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ConfigError> {
        match self {
            DurationValue::Seconds(0) => Err(ConfigError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

const fn default_concurrency() -> usize {
    1
}
