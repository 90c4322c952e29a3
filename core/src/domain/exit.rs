//! Outcome of waiting for a process to leave the running state.

use thiserror::Error;

use super::RunState;

/// What a wait is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitCondition {
    /// Satisfied as soon as the process is not running, including when it
    /// had already exited before the wait began.
    #[default]
    NotRunning,
    /// Satisfied only by an exit published after the wait began.
    NextExit,
}

impl WaitCondition {
    /// Whether `state` satisfies this condition when seen as the current value.
    pub fn is_satisfied_by(&self, state: &RunState) -> bool {
        match self {
            WaitCondition::NotRunning => !state.is_running(),
            WaitCondition::NextExit => state.is_exited(),
        }
    }
}

/// Why a wait ended without observing the exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WaitInterruption {
    /// The per-wait deadline elapsed.
    #[error("deadline exceeded")]
    DeadlineExceeded,
    /// The wait was cancelled from outside, e.g. daemon shutdown.
    #[error("cancelled")]
    Cancelled,
}

/// Result of one wait attempt. Produced once, consumed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The process left the running state.
    Exited { code: Option<i32> },
    /// The wait ended first.
    Interrupted(WaitInterruption),
}

impl ExitStatus {
    pub fn is_exited(&self) -> bool {
        matches!(self, ExitStatus::Exited { .. })
    }

    /// The interruption, if the exit was not observed.
    pub fn err(&self) -> Option<WaitInterruption> {
        match self {
            ExitStatus::Exited { .. } => None,
            ExitStatus::Interrupted(reason) => Some(*reason),
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExitStatus::Exited { code } => *code,
            ExitStatus::Interrupted(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_running_condition() {
        let cond = WaitCondition::NotRunning;
        assert!(cond.is_satisfied_by(&RunState::Created));
        assert!(cond.is_satisfied_by(&RunState::Exited { code: Some(0) }));
        assert!(!cond.is_satisfied_by(&RunState::Running { pid: 1 }));
    }

    #[test]
    fn test_next_exit_condition() {
        let cond = WaitCondition::NextExit;
        assert!(!cond.is_satisfied_by(&RunState::Created));
        assert!(cond.is_satisfied_by(&RunState::Exited { code: None }));
    }

    #[test]
    fn test_exit_status_err() {
        assert_eq!(ExitStatus::Exited { code: Some(0) }.err(), None);
        assert_eq!(
            ExitStatus::Interrupted(WaitInterruption::Cancelled).err(),
            Some(WaitInterruption::Cancelled)
        );
        assert!(!ExitStatus::Interrupted(WaitInterruption::DeadlineExceeded).is_exited());
    }
}
