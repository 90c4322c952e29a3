//! Lifecycle event log port (interface).

use std::sync::Arc;

use crate::domain::EventAction;

use super::ProcessHandle;

/// Port for recording lifecycle events.
pub trait EventLog: Send + Sync {
    fn log_event(&self, process: &dyn ProcessHandle, action: EventAction);
}

impl<T: EventLog + ?Sized> EventLog for Arc<T> {
    fn log_event(&self, process: &dyn ProcessHandle, action: EventAction) {
        (**self).log_event(process, action)
    }
}
