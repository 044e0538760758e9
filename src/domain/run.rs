use std::time::Duration;

use crate::args::{RampSetting, TesterArgs};
use crate::args::parsers::{validate_host, validate_path};
use crate::error::{AppError, AppResult, ValidationError};

/// Immutable input for one run. Built once from the merged CLI/config
/// arguments and shared read-only by every client task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub clients: usize,
    pub timeout: Duration,
    pub ramp: Duration,
    /// Ramp as given, sign included, for display.
    pub requested_ramp: RampSetting,
    pub concurrency: usize,
}

impl RunConfig {
    /// Validates the merged arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the host or path cannot be sent as-is, the
    /// timeout is zero, or the concurrency limit is zero.
    pub fn new(
        host: &str,
        port: u16,
        path: &str,
        clients: usize,
        timeout: Duration,
        ramp: Duration,
        concurrency: usize,
    ) -> AppResult<Self> {
        validate_host(host)?;
        validate_path(path)?;
        if timeout.is_zero() {
            return Err(AppError::validation(ValidationError::DurationZero));
        }
        if concurrency == 0 {
            return Err(AppError::validation(ValidationError::ValueTooSmall {
                min: 1,
            }));
        }
        Ok(Self {
            host: host.to_owned(),
            port,
            path: path.to_owned(),
            clients,
            timeout,
            ramp,
            requested_ramp: RampSetting::new(ramp),
            concurrency,
        })
    }

    /// Records the ramp as the user gave it. The creation window is unchanged.
    #[must_use]
    pub const fn with_requested_ramp(mut self, requested: RampSetting) -> Self {
        self.requested_ramp = requested;
        self
    }

    /// `true` when task creation is spread over a ramp-up window.
    #[must_use]
    pub const fn is_ramped(&self) -> bool {
        !self.ramp.is_zero()
    }
}

impl TryFrom<&TesterArgs> for RunConfig {
    type Error = AppError;

    fn try_from(args: &TesterArgs) -> Result<Self, Self::Error> {
        RunConfig::new(
            &args.host,
            args.port,
            &args.path,
            args.clients,
            args.request_timeout,
            args.ramp.window(),
            args.concurrency.get(),
        )
        .map(|config| config.with_requested_ramp(args.ramp))
    }
}
