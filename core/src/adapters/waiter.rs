//! Exit notification from a process's published run state.

use tokio::sync::watch;

use crate::domain::{ExitStatus, RunState, WaitCondition};
use crate::ports::{ExitWaiter, ProcessHandle};
use crate::scope::WaitScope;

/// Waits on the run-state channel of a [`ProcessHandle`].
///
/// Every call subscribes afresh, so a wait never sees a notification
/// consumed by an earlier attempt, and an exit that already happened
/// satisfies [`WaitCondition::NotRunning`] immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateExitWaiter;

impl StateExitWaiter {
    pub fn new() -> Self {
        Self
    }
}

impl ExitWaiter for StateExitWaiter {
    async fn wait(
        &self,
        process: &dyn ProcessHandle,
        condition: WaitCondition,
        scope: &WaitScope,
    ) -> ExitStatus {
        let rx = process.state().subscribe();

        tokio::select! {
            biased;
            code = wait_for_condition(rx, condition) => ExitStatus::Exited { code },
            reason = scope.interrupted() => ExitStatus::Interrupted(reason),
        }
    }
}

/// Resolve with the exit code once `condition` holds.
///
/// A closed channel means the process handle is gone, which counts as exited.
async fn wait_for_condition(
    mut rx: watch::Receiver<RunState>,
    condition: WaitCondition,
) -> Option<i32> {
    if condition == WaitCondition::NextExit {
        let _ = rx.borrow_and_update();
        loop {
            if rx.changed().await.is_err() {
                return None;
            }
            let state = *rx.borrow_and_update();
            if condition.is_satisfied_by(&state) {
                return state.exit_code();
            }
        }
    }

    rx.wait_for(|state| condition.is_satisfied_by(state))
        .await
        .map(|state| state.exit_code())
        .unwrap_or(None)
}
