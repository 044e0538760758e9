use std::time::Duration;

use tracing::info;

use crate::args::RampSetting;
use crate::domain::RunConfig;
use crate::load::RunReport;

/// Nanoseconds per second.
const NS_PER_SEC: u128 = 1_000_000_000;
/// Decimal places for the elapsed time line.
const ELAPSED_DECIMALS: u32 = 2;
/// Decimal places for the mean latency line.
const LATENCY_DECIMALS: u32 = 4;
const SUMMARY_TITLE: &str = "==== Stress Test Summary ====";
const SUMMARY_RULE: &str = "=============================";

pub(crate) fn parameter_lines(config: &RunConfig) -> Vec<String> {
    vec![
        "Stress test parameters:".to_owned(),
        format!(" - host: {}", config.host),
        format!(" - port: {}", config.port),
        format!(" - clients: {}", config.clients),
        format!(" - path: {}", config.path),
        format!(" - timeout: {}s", format_seconds(config.timeout)),
        format!(" - ramp: {}s", format_ramp(config.requested_ramp)),
        format!(" - concurrency: {}", config.concurrency),
    ]
}

pub(crate) fn print_parameters(config: &RunConfig) {
    for line in parameter_lines(config) {
        println!("{}", line);
    }
}

/// The summary block, including its leading and trailing blank lines.
pub(crate) fn summary_lines(report: &RunReport) -> Vec<String> {
    let stats = &report.stats;
    vec![
        String::new(),
        SUMMARY_TITLE.to_owned(),
        format!("Clients requested: {}", stats.clients()),
        format!(
            "Elapsed time: {}s",
            format_fixed(report.elapsed, ELAPSED_DECIMALS)
        ),
        format!("Successful responses: {}", stats.success()),
        format!("Connection errors: {}", stats.connect_errors()),
        format!("Timeouts: {}", stats.timeouts()),
        format!("Other errors: {}", stats.other_errors()),
        format!(
            "Avg latency (s): {}",
            format_fixed(stats.mean_latency(), LATENCY_DECIMALS)
        ),
        format!("Total bytes received: {}", stats.bytes_received()),
        SUMMARY_RULE.to_owned(),
        String::new(),
    ]
}

pub(crate) fn print_summary(report: &RunReport) {
    for line in summary_lines(report) {
        println!("{}", line);
    }
}

/// Extra figures that stay out of the summary block.
pub(crate) fn log_run_details(report: &RunReport) {
    let stats = &report.stats;
    let percentiles = stats.percentiles();
    info!(
        p50_us = percentiles.p50.as_micros(),
        p90_us = percentiles.p90.as_micros(),
        p99_us = percentiles.p99.as_micros(),
        min_us = stats.min_latency().as_micros(),
        max_us = stats.max_latency().as_micros(),
        "latency percentiles"
    );
    info!(
        peak_in_flight = report.peak_in_flight,
        creation_span_ms = report.creation_span().as_millis(),
        send_errors = stats.send_errors(),
        read_errors = stats.read_errors(),
        "run details"
    );
}

/// Seconds as a plain decimal, always with at least one fractional digit
/// (`10.0`, `0.25`).
pub(crate) fn format_seconds(duration: Duration) -> String {
    format!("{:?}", duration.as_secs_f64())
}

/// Ramp as given on input, so `-1` reads back as `-1.0`.
pub(crate) fn format_ramp(ramp: RampSetting) -> String {
    let sign = if ramp.is_negative() { "-" } else { "" };
    format!("{}{}", sign, format_seconds(ramp.magnitude()))
}

/// Seconds rounded half-up to `decimals` places.
pub(crate) fn format_fixed(duration: Duration, decimals: u32) -> String {
    let scale = 10_u128.saturating_pow(decimals);
    let half = NS_PER_SEC.checked_div(2).unwrap_or(0);
    let units = duration
        .as_nanos()
        .saturating_mul(scale)
        .saturating_add(half)
        .checked_div(NS_PER_SEC)
        .unwrap_or(0);
    let whole = units.checked_div(scale).unwrap_or(0);
    let fraction = units.checked_rem(scale).unwrap_or(0);
    let width = usize::try_from(decimals).unwrap_or(0);
    format!("{}.{:0width$}", whole, fraction, width = width)
}
