use std::time::Duration;

use super::types::{PositiveUsize, RampSetting};
use crate::error::{AppError, AppResult, ValidationError};

const MILLIS_PER_SECOND: u32 = 1000;
const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 3600;

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

/// Parses a seconds value such as `10`, `2.5`, `500ms`, `1m` or `-1`.
///
/// Zero and negative values map to [`Duration::ZERO`]; callers decide whether
/// that is acceptable.
pub(crate) fn parse_seconds(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let numeric_len = value
        .char_indices()
        .find(|(_, ch)| !(ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+')))
        .map_or(value.len(), |(idx, _)| idx);
    if numeric_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(numeric_len);
    let number: f64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    if !matches!(unit, "ms" | "s" | "m" | "h") {
        return Err(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        });
    }

    let base = seconds_from_f64(number)?;

    let scaled = match unit {
        "ms" => base.checked_div(MILLIS_PER_SECOND),
        "m" => base.checked_mul(SECONDS_PER_MINUTE),
        "h" => base.checked_mul(SECONDS_PER_HOUR),
        _ => Some(base),
    };
    scaled.ok_or(ValidationError::DurationOverflow)
}

/// Converts a float seconds value into a duration, clamping non-positive
/// values to zero.
pub(crate) fn seconds_from_f64(number: f64) -> Result<Duration, ValidationError> {
    if number <= 0.0 {
        return Ok(Duration::ZERO);
    }
    Duration::try_from_secs_f64(number).map_err(|_err| {
        if number.is_finite() {
            ValidationError::DurationOverflow
        } else {
            ValidationError::InvalidDurationFormat {
                value: number.to_string(),
            }
        }
    })
}

pub(crate) fn parse_timeout_arg(s: &str) -> AppResult<Duration> {
    let duration = parse_seconds(s)?;
    if duration.is_zero() {
        return Err(AppError::validation(ValidationError::DurationZero));
    }
    Ok(duration)
}

pub(crate) fn parse_ramp_arg(s: &str) -> AppResult<RampSetting> {
    parse_ramp(s).map_err(AppError::from)
}

/// Parses a ramp window, keeping the sign of negative inputs.
pub(crate) fn parse_ramp(s: &str) -> Result<RampSetting, ValidationError> {
    match s.trim().strip_prefix('-') {
        Some(magnitude) => parse_seconds(magnitude).map(RampSetting::negative),
        None => parse_seconds(s).map(RampSetting::new),
    }
}

/// Ramp window from a bare number of seconds.
pub(crate) fn ramp_from_f64(number: f64) -> Result<RampSetting, ValidationError> {
    if number.is_sign_negative() {
        seconds_from_f64(number.abs()).map(RampSetting::negative)
    } else {
        seconds_from_f64(number).map(RampSetting::new)
    }
}

/// Checks that a host can be written into a request line and `Host` header.
pub(crate) fn validate_host(host: &str) -> Result<(), ValidationError> {
    if host.is_empty() {
        return Err(ValidationError::HostEmpty);
    }
    if !host.bytes().all(|byte| byte.is_ascii_graphic()) {
        return Err(ValidationError::InvalidHost {
            value: host.to_owned(),
        });
    }
    Ok(())
}

/// Checks that a request target can be written into the request line as-is.
/// Any form is accepted (`/index.html`, `*`, `http://host/`).
pub(crate) fn validate_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() || !path.bytes().all(|byte| byte.is_ascii_graphic()) {
        return Err(ValidationError::InvalidPath {
            value: path.to_owned(),
        });
    }
    Ok(())
}
