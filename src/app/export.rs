use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::domain::RunConfig;
use crate::error::{AppError, AppResult};
use crate::load::RunReport;

#[derive(Debug, Serialize)]
struct ExportConfig<'config> {
    host: &'config str,
    port: u16,
    path: &'config str,
    clients: usize,
    timeout_s: f64,
    ramp_s: f64,
    concurrency: usize,
}

#[derive(Debug, Serialize)]
struct ExportCounters {
    success: u64,
    connect_errors: u64,
    send_errors: u64,
    read_errors: u64,
    timeouts: u64,
    other_errors: u64,
}

#[derive(Debug, Serialize)]
struct ExportLatency {
    mean_s: f64,
    min_s: f64,
    max_s: f64,
    p50_s: f64,
    p90_s: f64,
    p99_s: f64,
}

#[derive(Debug, Serialize)]
struct ExportSummary<'config> {
    started_at: String,
    config: ExportConfig<'config>,
    counters: ExportCounters,
    elapsed_s: f64,
    latency: ExportLatency,
    bytes_received: u64,
    peak_in_flight: usize,
    creation_span_s: f64,
}

impl<'config> ExportSummary<'config> {
    fn new(config: &'config RunConfig, report: &RunReport, started_at: DateTime<Utc>) -> Self {
        let stats = &report.stats;
        let percentiles = stats.percentiles();
        Self {
            started_at: started_at.to_rfc3339(),
            config: ExportConfig {
                host: &config.host,
                port: config.port,
                path: &config.path,
                clients: config.clients,
                timeout_s: config.timeout.as_secs_f64(),
                ramp_s: config.ramp.as_secs_f64(),
                concurrency: config.concurrency,
            },
            counters: ExportCounters {
                success: stats.success(),
                connect_errors: stats.connect_errors(),
                send_errors: stats.send_errors(),
                read_errors: stats.read_errors(),
                timeouts: stats.timeouts(),
                other_errors: stats.other_errors(),
            },
            elapsed_s: report.elapsed.as_secs_f64(),
            latency: ExportLatency {
                mean_s: stats.mean_latency().as_secs_f64(),
                min_s: stats.min_latency().as_secs_f64(),
                max_s: stats.max_latency().as_secs_f64(),
                p50_s: percentiles.p50.as_secs_f64(),
                p90_s: percentiles.p90.as_secs_f64(),
                p99_s: percentiles.p99.as_secs_f64(),
            },
            bytes_received: stats.bytes_received(),
            peak_in_flight: report.peak_in_flight,
            creation_span_s: report.creation_span().as_secs_f64(),
        }
    }
}

/// Writes the run summary to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error when the summary cannot be serialized or the file
/// cannot be created or written.
pub(crate) async fn export_json(
    path: &Path,
    config: &RunConfig,
    report: &RunReport,
    started_at: DateTime<Utc>,
) -> AppResult<()> {
    let summary = ExportSummary::new(config, report, started_at);
    let json = serde_json::to_vec_pretty(&summary)?;
    write_file(path, &json)
        .await
        .map_err(|source| AppError::Export {
            path: path.display().to_string(),
            source,
        })
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), std::io::Error> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
