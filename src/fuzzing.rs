use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::parsers::parse_seconds;
use crate::args::{PositiveUsize, TesterArgs};
use crate::config::apply_config;
use crate::config::types::ConfigFile;
use crate::domain::RunConfig;
use crate::error::{AppError, AppResult, ConfigError};
use crate::http::{ResponseHead, build_request};

thread_local! {
    static BASE_MATCHES: ArgMatches = TesterArgs::command().get_matches_from(["webstress"]);
}

/// Parses a seconds value (e.g. `2.5`, `500ms`, `-1`).
///
/// # Errors
///
/// Returns an error when the value is malformed.
pub fn parse_seconds_input(input: &str) -> AppResult<Duration> {
    Ok(parse_seconds(input)?)
}

/// Parses a positive usize string value.
///
/// # Errors
///
/// Returns an error when the value is invalid or zero.
pub fn parse_positive_usize_input(input: &str) -> AppResult<usize> {
    let value: PositiveUsize = input.parse()?;
    Ok(value.get())
}

/// Parses TOML config, applies it to defaults, and validates the result.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<RunConfig> {
    let config: ConfigFile = toml::from_str(input).map_err(|err| {
        AppError::config(ConfigError::ParseToml {
            path: PathBuf::from("fuzz.toml"),
            source: err,
        })
    })?;
    apply_config_to_defaults(&config)
}

/// Parses JSON config, applies it to defaults, and validates the result.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<RunConfig> {
    let config: ConfigFile = serde_json::from_slice(input)?;
    apply_config_to_defaults(&config)
}

/// Validates a target and renders the request sent for it.
///
/// # Errors
///
/// Returns an error when the host or path is rejected.
pub fn build_request_input(host: &str, path: &str) -> AppResult<Vec<u8>> {
    let config = RunConfig::new(
        host,
        80,
        path,
        1,
        Duration::from_secs(1),
        Duration::ZERO,
        1,
    )?;
    Ok(build_request(&config.host, &config.path))
}

/// Feeds `chunks` to a [`ResponseHead`] in order and returns whether the
/// header terminator was seen, the byte count, and the status line.
#[must_use]
pub fn scan_response_head_input<'chunk, I>(chunks: I) -> (bool, u64, String)
where
    I: IntoIterator<Item = &'chunk [u8]>,
{
    let mut head = ResponseHead::new();
    for chunk in chunks {
        if head.push(chunk) {
            break;
        }
    }
    (head.is_complete(), head.bytes_read(), head.status_line())
}

/// Loads a config file from disk to exercise extension handling.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config_file_input(path: &std::path::Path) -> AppResult<()> {
    crate::config::load_config_file(path).map(|_config| ())
}

fn apply_config_to_defaults(config: &ConfigFile) -> AppResult<RunConfig> {
    BASE_MATCHES.with(|matches| {
        let mut args = TesterArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)?;
        RunConfig::try_from(&args)
    })
}
