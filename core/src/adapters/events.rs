//! In-memory lifecycle event journal.

use parking_lot::RwLock;
use tracing::info;

use crate::domain::{EventAction, LifecycleEvent};
use crate::ports::{EventLog, ProcessHandle};

/// Collects lifecycle events until a consumer takes them.
///
/// Every event is also emitted as an `info` trace.
#[derive(Debug, Default)]
pub struct EventJournal {
    pending: RwLock<Vec<LifecycleEvent>>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending events, leaving the journal empty.
    pub fn take_events(&self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut *self.pending.write())
    }

    /// Copy of pending events without consuming them.
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.pending.read().clone()
    }
}

impl EventLog for EventJournal {
    fn log_event(&self, process: &dyn ProcessHandle, action: EventAction) {
        let event = LifecycleEvent::now(process.id(), process.name(), action);
        info!(container = %event.id, name = %event.name, action = %event.action, "Lifecycle event");
        self.pending.write().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestProcess;

    #[test]
    fn test_log_and_take() {
        let journal = EventJournal::new();
        let process = TestProcess::running("abc", 1);

        journal.log_event(&process, EventAction::Stop);
        assert_eq!(journal.events().len(), 1);

        let events = journal.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "abc");
        assert_eq!(events[0].action, EventAction::Stop);

        assert!(journal.take_events().is_empty());
    }
}
