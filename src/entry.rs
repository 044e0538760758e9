use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::info;

use crate::app::summary::{print_parameters, print_summary};
use crate::app::{export_json, run_local};
use crate::args::TesterArgs;
use crate::domain::RunConfig;
use crate::error::AppResult;
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};
use crate::system::logger::init_logging;
use crate::system::rlimit::check_rlimit;

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;
    apply_config(&mut args, &matches)?;

    init_logging(args.verbose, args.no_color);

    let config = Arc::new(RunConfig::try_from(&args)?);
    print_parameters(&config);
    check_rlimit(config.clients);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(config, args.export_json.as_deref()))
}

fn parse_args() -> AppResult<(TesterArgs, ArgMatches)> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let matches = TesterArgs::command().get_matches_from(raw_args);
    let args = TesterArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_config(args: &mut TesterArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}

async fn run_async(config: Arc<RunConfig>, export_path: Option<&str>) -> AppResult<()> {
    let started_at = Utc::now();
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let result = run_local(Arc::clone(&config), shutdown_rx).await;

    // Releases the signal handler when the run finished on its own.
    drop(shutdown_tx.send(()));
    drop(signal_handle.await);

    let report = result?;
    print_summary(&report);

    if let Some(path) = export_path {
        export_json(Path::new(path), &config, &report, started_at).await?;
        info!(path, "summary exported");
    }
    Ok(())
}
