//! Domain layer - Pure data models for the stop transaction.
//!
//! This module contains the types the stop algorithm reasons about:
//! signals, timeouts, run state, wait outcomes and lifecycle events.
//! They perform no I/O and can be tested in isolation.

mod event;
mod exit;
mod signal;
mod state;
mod timeout;

// Re-export all domain types
pub use event::{EventAction, LifecycleEvent};
pub use exit::{ExitStatus, WaitCondition, WaitInterruption};
pub use signal::StopSignal;
pub use state::{ProcessState, RunState};
pub use timeout::StopTimeout;
