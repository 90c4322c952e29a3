//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with external systems: the kernel
//! (signals, child processes) or in-memory bookkeeping.

mod events;
mod process;
mod registry;
mod signal;
mod waiter;

// Re-export main types for convenience
pub use events::EventJournal;
pub use process::{ManagedProcess, ProcessSpec};
pub use registry::ProcessRegistry;
pub use signal::NixSignalSender;
pub use waiter::StateExitWaiter;
