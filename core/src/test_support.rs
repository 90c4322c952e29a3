//! Shared fixtures for unit tests.

use crate::domain::{ProcessState, StopSignal};
use crate::ports::ProcessHandle;

/// In-memory process handle whose state tests flip by hand.
#[derive(Debug, Clone)]
pub(crate) struct TestProcess {
    pub id: String,
    pub state: ProcessState,
    pub stop_signal: Option<StopSignal>,
    pub stop_timeout: Option<i64>,
}

impl TestProcess {
    pub fn running(id: &str, pid: u32) -> Self {
        Self {
            id: id.to_string(),
            state: ProcessState::running(pid),
            stop_signal: None,
            stop_timeout: None,
        }
    }

    pub fn exited(id: &str) -> Self {
        let process = Self::running(id, 1);
        process.state.set_exited(Some(0));
        process
    }

    pub fn with_stop_signal(mut self, signal: StopSignal) -> Self {
        self.stop_signal = Some(signal);
        self
    }

    pub fn with_stop_timeout(mut self, seconds: i64) -> Self {
        self.stop_timeout = Some(seconds);
        self
    }
}

impl ProcessHandle for TestProcess {
    fn id(&self) -> &str {
        &self.id
    }

    fn state(&self) -> &ProcessState {
        &self.state
    }

    fn stop_signal(&self) -> Option<StopSignal> {
        self.stop_signal
    }

    fn stop_timeout(&self) -> Option<i64> {
        self.stop_timeout
    }
}
