use std::time::Duration;

/// Classification of one client's request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    None,
    ConnectError,
    SendError,
    ReadError,
    Timeout,
}

impl FailureCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureCategory::None => "none",
            FailureCategory::ConnectError => "connect_error",
            FailureCategory::SendError => "send_error",
            FailureCategory::ReadError => "read_error",
            FailureCategory::Timeout => "timeout",
        }
    }
}

/// Result of a single request/response cycle.
///
/// Only constructed through [`RequestOutcome::success`] and
/// [`RequestOutcome::failure`], so `success` always agrees with `failure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    success: bool,
    latency: Duration,
    bytes_read: u64,
    status_line: String,
    failure: FailureCategory,
}

impl RequestOutcome {
    #[must_use]
    pub const fn success(latency: Duration, bytes_read: u64, status_line: String) -> Self {
        Self {
            success: true,
            latency,
            bytes_read,
            status_line,
            failure: FailureCategory::None,
        }
    }

    /// A failed attempt. Latency is never reported for failures; bytes read
    /// before the failure are kept for logging only.
    ///
    /// Passing [`FailureCategory::None`] is treated as a read error so the
    /// success flag can never disagree with the category.
    #[must_use]
    pub const fn failure(failure: FailureCategory, bytes_read: u64) -> Self {
        let failure = match failure {
            FailureCategory::None => FailureCategory::ReadError,
            FailureCategory::ConnectError
            | FailureCategory::SendError
            | FailureCategory::ReadError
            | FailureCategory::Timeout => failure,
        };
        Self {
            success: false,
            latency: Duration::ZERO,
            bytes_read,
            status_line: String::new(),
            failure,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    #[must_use]
    pub const fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    #[must_use]
    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    #[must_use]
    pub const fn category(&self) -> FailureCategory {
        self.failure
    }
}
