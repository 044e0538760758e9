use std::time::Duration;

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Created,
    WaitingForSlot,
    Executing,
    Completed,
}

impl ClientState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ClientState::Created => "created",
            ClientState::WaitingForSlot => "waiting_for_slot",
            ClientState::Executing => "executing",
            ClientState::Completed => "completed",
        }
    }

    const fn next(self) -> Self {
        match self {
            ClientState::Created => ClientState::WaitingForSlot,
            ClientState::WaitingForSlot => ClientState::Executing,
            ClientState::Executing | ClientState::Completed => ClientState::Completed,
        }
    }
}

/// One simulated client: a single connection carrying a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientTask {
    index: usize,
    created_at: Duration,
    state: ClientState,
}

impl ClientTask {
    #[must_use]
    pub const fn new(index: usize, created_at: Duration) -> Self {
        Self {
            index,
            created_at,
            state: ClientState::Created,
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Creation time measured from the start of the run.
    #[must_use]
    pub const fn created_at(&self) -> Duration {
        self.created_at
    }

    #[must_use]
    pub const fn state(&self) -> ClientState {
        self.state
    }

    /// Moves to the next lifecycle state. `Completed` is terminal.
    pub fn advance(&mut self) -> ClientState {
        let next = self.state.next();
        trace!(
            client = self.index,
            from = self.state.as_str(),
            to = next.as_str(),
            "client state"
        );
        self.state = next;
        next
    }
}
