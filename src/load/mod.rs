//! Client task creation, concurrency bounding, and run orchestration.
mod limiter;
mod orchestrator;
mod ramp;
mod task;


pub use limiter::{ConcurrencyLimiter, SlotGuard};
pub use orchestrator::{Orchestrator, RunReport};
pub use ramp::{RampMode, RampScheduler};
pub use task::{ClientState, ClientTask};
