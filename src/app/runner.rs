use std::sync::Arc;

use tracing::info;

use crate::domain::RunConfig;
use crate::error::{AppError, AppResult};
use crate::http::ExecuteRequest;
use crate::load::{Orchestrator, RunReport};
use crate::shutdown::ShutdownReceiver;

use super::summary::log_run_details;

/// Runs the configured test against the real target.
///
/// # Errors
///
/// Returns [`AppError::Interrupted`] when shutdown is requested before
/// every client has finished.
pub(crate) async fn run_local(
    config: Arc<RunConfig>,
    shutdown_rx: ShutdownReceiver,
) -> AppResult<RunReport> {
    let orchestrator = Orchestrator::new(config);
    run_until_shutdown(&orchestrator, shutdown_rx).await
}

/// Drives `orchestrator` to completion unless a shutdown arrives first.
/// In-flight requests are abandoned on shutdown.
///
/// # Errors
///
/// Returns [`AppError::Interrupted`] when the shutdown channel fires or
/// closes before the run completes.
pub(crate) async fn run_until_shutdown<E>(
    orchestrator: &Orchestrator<E>,
    mut shutdown_rx: ShutdownReceiver,
) -> AppResult<RunReport>
where
    E: ExecuteRequest,
{
    tokio::select! {
        report = orchestrator.run() => {
            info!(
                recorded = report.stats.recorded(),
                elapsed_ms = report.elapsed.as_millis(),
                "run complete"
            );
            log_run_details(&report);
            Ok(report)
        }
        _ = shutdown_rx.recv() => {
            info!(
                in_flight = orchestrator.limiter().in_flight(),
                "shutdown requested, abandoning run"
            );
            Err(AppError::Interrupted)
        }
    }
}
