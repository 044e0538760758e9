use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_CLIENTS, DEFAULT_CONCURRENCY, DEFAULT_HOST, DEFAULT_PATH, DEFAULT_PORT, DEFAULT_RAMP,
    DEFAULT_TIMEOUT,
};
use super::parsers::{parse_bool_env, parse_positive_usize, parse_ramp_arg, parse_timeout_arg};
use super::types::{PositiveUsize, RampSetting};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP connection stress tester - opens many concurrent one-shot GET connections and reports success, error, timeout and latency counts."
)]
pub struct TesterArgs {
    /// Host to target
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to target
    #[arg(long, short = 'p', default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Number of clients; each opens one connection and sends one request
    #[arg(long, short = 'c', default_value_t = DEFAULT_CLIENTS)]
    pub clients: usize,

    /// Request path
    #[arg(long, default_value = DEFAULT_PATH)]
    pub path: String,

    /// Per-request timeout in seconds (fractions and ms/s/m/h suffixes accepted)
    #[arg(
        long = "timeout",
        short = 't',
        default_value = DEFAULT_TIMEOUT,
        value_parser = parse_timeout_arg
    )]
    pub request_timeout: Duration,

    /// Ramp-up time in seconds spreading client starts (0 or less starts all at once)
    #[arg(
        long,
        short = 'r',
        default_value = DEFAULT_RAMP,
        allow_negative_numbers = true,
        value_parser = parse_ramp_arg
    )]
    pub ramp: RampSetting,

    /// Maximum number of requests executing at the same time
    #[arg(long, default_value = DEFAULT_CONCURRENCY, value_parser = parse_positive_usize)]
    pub concurrency: PositiveUsize,

    /// Path to config file (TOML/JSON). Defaults to ./webstress.toml or ./webstress.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Write the run summary as JSON to this path
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by WEBSTRESS_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
