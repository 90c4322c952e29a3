//! Process run state and its change notifications.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Where a supervised process is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RunState {
    /// Not started yet.
    #[default]
    Created,
    /// Running under the given PID.
    Running { pid: u32 },
    /// Left the running state. `code` is `None` when no status could be collected.
    Exited { code: Option<i32> },
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running { .. })
    }

    pub fn is_exited(&self) -> bool {
        matches!(self, RunState::Exited { .. })
    }

    pub fn pid(&self) -> Option<u32> {
        match self {
            RunState::Running { pid } => Some(*pid),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunState::Exited { code } => *code,
            _ => None,
        }
    }
}

/// Shared, observable run state of one process.
///
/// Only the owner of the process (its reaper) publishes transitions;
/// everyone else reads or subscribes. Clones share the same state.
#[derive(Debug, Clone)]
pub struct ProcessState {
    tx: Arc<watch::Sender<RunState>>,
}

impl ProcessState {
    /// New state in [`RunState::Created`].
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RunState::Created);
        Self { tx: Arc::new(tx) }
    }

    /// New state already running under `pid`.
    pub fn running(pid: u32) -> Self {
        let state = Self::new();
        state.set_running(pid);
        state
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> RunState {
        *self.tx.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.tx.borrow().is_running()
    }

    pub fn pid(&self) -> Option<u32> {
        self.tx.borrow().pid()
    }

    pub fn set_running(&self, pid: u32) {
        self.tx.send_replace(RunState::Running { pid });
    }

    /// Publish the exit. Only the first exit after a run is recorded.
    pub fn set_exited(&self, code: Option<i32>) {
        self.tx.send_if_modified(|state| {
            if state.is_exited() {
                return false;
            }
            *state = RunState::Exited { code };
            true
        });
    }

    /// New receiver positioned at the current state.
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.tx.subscribe()
    }

    /// Wait until the process has exited and return its exit code.
    pub async fn exited(&self) -> Option<i32> {
        let mut rx = self.subscribe();
        rx.wait_for(RunState::is_exited)
            .await
            .map(|state| state.exit_code())
            .unwrap_or(None)
    }
}

impl Default for ProcessState {
    fn default() -> Self {
        Self::new()
    }
}
