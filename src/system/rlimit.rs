//! Pre-run check of the open-file-descriptor ceiling.
use tracing::warn;

/// Descriptors assumed per client.
const FDS_PER_CLIENT: u64 = 2;
/// Descriptors assumed for the process itself.
const FD_HEADROOM: u64 = 100;

/// Printed when the soft limit is below the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RlimitAdvice {
    pub(crate) soft_limit: u64,
    pub(crate) estimated_needed: u64,
}

impl RlimitAdvice {
    pub(crate) fn lines(&self) -> [String; 2] {
        [
            format!(
                "WARNING: current RLIMIT_NOFILE={}, estimated needed={}",
                self.soft_limit, self.estimated_needed
            ),
            "You may need to increase the file descriptor limit (e.g. 'ulimit -n 65536') before running very large tests.".to_owned(),
        ]
    }
}

pub(crate) fn estimated_descriptors(clients: usize) -> u64 {
    u64::try_from(clients)
        .unwrap_or(u64::MAX)
        .saturating_mul(FDS_PER_CLIENT)
        .saturating_add(FD_HEADROOM)
}

pub(crate) fn advise(soft_limit: u64, clients: usize) -> Option<RlimitAdvice> {
    let estimated_needed = estimated_descriptors(clients);
    (soft_limit < estimated_needed).then_some(RlimitAdvice {
        soft_limit,
        estimated_needed,
    })
}

/// Prints the advisory when the current soft limit looks too low.
/// Silently does nothing where the limit cannot be read.
pub(crate) fn check_rlimit(clients: usize) {
    let Some(soft_limit) = soft_nofile_limit() else {
        return;
    };
    if let Some(advice) = advise(soft_limit, clients) {
        warn!(
            soft_limit = advice.soft_limit,
            estimated_needed = advice.estimated_needed,
            "file descriptor limit looks low"
        );
        for line in advice.lines() {
            println!("{}", line);
        }
    }
}

#[cfg(unix)]
pub(crate) fn soft_nofile_limit() -> Option<u64> {
    let mut limit = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // Safety: getrlimit only writes into the rlimit we own for the call.
    let result = unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut limit) };
    if result != 0 {
        return None;
    }
    u64::try_from(limit.rlim_cur).ok()
}

#[cfg(not(unix))]
pub(crate) const fn soft_nofile_limit() -> Option<u64> {
    None
}
