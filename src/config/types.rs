use std::time::Duration;

use serde::Deserialize;

use crate::args::{ReportFormat, StrategySelection, parsers::parse_duration};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub requests: Option<usize>,
    pub workers: Option<usize>,
    pub attempts: Option<usize>,
    #[serde(alias = "max_waves")]
    pub waves: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub backoff: Option<BackoffConfig>,
    pub strategy: Option<StrategySelection>,
    pub output_dir: Option<String>,
    pub format: Option<ReportFormat>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BackoffConfig {
    pub base: Option<DurationValue>,
    pub max: Option<DurationValue>,
    pub jitter: Option<DurationValue>,
}

/// Either a whole number of seconds or a suffixed string such as `250ms`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
