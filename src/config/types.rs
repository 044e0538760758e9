use std::time::Duration;

use serde::Deserialize;

use crate::args::RampSetting;
use crate::args::parsers::{parse_ramp, parse_seconds, ramp_from_f64, seconds_from_f64};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub clients: Option<usize>,
    pub path: Option<String>,
    pub timeout: Option<SecondsValue>,
    pub ramp: Option<SecondsValue>,
    #[serde(alias = "max_in_flight")]
    pub concurrency: Option<usize>,
    pub export_json: Option<String>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

/// A duration given either as a bare number of seconds or as text (`"500ms"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SecondsValue {
    Seconds(f64),
    Text(String),
}

impl SecondsValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            SecondsValue::Seconds(secs) => seconds_from_f64(*secs),
            SecondsValue::Text(text) => parse_seconds(text),
        }
    }

    pub(crate) fn to_ramp(&self) -> Result<RampSetting, ValidationError> {
        match self {
            SecondsValue::Seconds(secs) => ramp_from_f64(*secs),
            SecondsValue::Text(text) => parse_ramp(text),
        }
    }
}
