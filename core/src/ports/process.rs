//! Process handle port (interface).

use std::sync::Arc;

use crate::domain::{ProcessState, StopSignal};
use crate::error::Result;

/// A supervised process, as seen by the stop transaction.
///
/// Handles are owned by the caller and only borrowed for the duration of
/// one stop call. Everything here is read-only from the coordinator's side:
/// only the process itself (through its reaper) changes its run state.
pub trait ProcessHandle: Send + Sync {
    /// Stable identifier (container id).
    fn id(&self) -> &str;

    /// Human-friendly name. Defaults to the id.
    fn name(&self) -> &str {
        self.id()
    }

    /// Observable run state.
    fn state(&self) -> &ProcessState;

    /// Configured stop signal, if any.
    fn stop_signal(&self) -> Option<StopSignal>;

    /// Configured stop timeout in whole seconds, if any. Negative means never force.
    fn stop_timeout(&self) -> Option<i64>;

    fn is_running(&self) -> bool {
        self.state().is_running()
    }

    fn pid(&self) -> Option<u32> {
        self.state().pid()
    }
}

impl<T: ProcessHandle + ?Sized> ProcessHandle for Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn state(&self) -> &ProcessState {
        (**self).state()
    }

    fn stop_signal(&self) -> Option<StopSignal> {
        (**self).stop_signal()
    }

    fn stop_timeout(&self) -> Option<i64> {
        (**self).stop_timeout()
    }
}

/// Port for resolving a process reference (id, name, id prefix) to a handle.
pub trait ProcessLookup: Send + Sync {
    type Handle: ProcessHandle + 'static;

    fn lookup(&self, reference: &str) -> Result<Arc<Self::Handle>>;
}

impl<T: ProcessLookup + ?Sized> ProcessLookup for Arc<T> {
    type Handle = T::Handle;

    fn lookup(&self, reference: &str) -> Result<Arc<Self::Handle>> {
        (**self).lookup(reference)
    }
}
