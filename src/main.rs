mod app;
mod args;
mod config;
mod domain;
mod entry;
mod error;
mod http;
mod load;
mod metrics;
mod shutdown;
mod system;

use std::process::ExitCode;

fn main() -> ExitCode {
    match entry::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_interrupted() => {
            println!("Interrupted by user");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
