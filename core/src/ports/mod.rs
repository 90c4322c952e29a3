//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod events;
mod process;
mod signal;
mod waiter;

pub use events::EventLog;
pub use process::{ProcessHandle, ProcessLookup};
pub use signal::SignalSender;
pub use waiter::ExitWaiter;
