//! Cancellation scopes for exit waits.
//!
//! Every wait runs inside a [`WaitScope`] derived from an ambient shutdown
//! token. A scope may also carry a deadline. Cancelling the parent token
//! always interrupts the wait, whatever its deadline. Dropping the scope
//! cancels it, so waits tied to it never outlive the code that created it.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::domain::WaitInterruption;

/// Stand-in deadline for timeouts too large to add to the current instant.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Cancellation token plus optional deadline for one wait attempt.
#[derive(Debug)]
pub struct WaitScope {
    token: CancellationToken,
    deadline: Option<Instant>,
    _guard: DropGuard,
}

impl WaitScope {
    /// Scope that expires `timeout` from now, or earlier if `parent` is cancelled.
    ///
    /// Timeouts past the range of [`Instant`] are clamped to about 30 years.
    pub fn with_timeout(parent: &CancellationToken, timeout: Duration) -> Self {
        let now = Instant::now();
        let deadline = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + FAR_FUTURE);
        Self::new(parent, Some(deadline))
    }

    /// Scope with no deadline; only cancellation of `parent` ends it.
    pub fn unbounded(parent: &CancellationToken) -> Self {
        Self::new(parent, None)
    }

    fn new(parent: &CancellationToken, deadline: Option<Instant>) -> Self {
        let token = parent.child_token();
        let guard = token.clone().drop_guard();
        Self {
            token,
            deadline,
            _guard: guard,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel the scope now.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Resolves when the scope is cancelled or its deadline passes.
    ///
    /// Cancellation takes precedence when both have happened.
    pub async fn interrupted(&self) -> WaitInterruption {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    _ = self.token.cancelled() => WaitInterruption::Cancelled,
                    _ = sleep_until(deadline) => WaitInterruption::DeadlineExceeded,
                }
            }
            None => {
                self.token.cancelled().await;
                WaitInterruption::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_deadline_fires() {
        let shutdown = CancellationToken::new();
        let scope = WaitScope::with_timeout(&shutdown, Duration::from_secs(5));

        let start = Instant::now();
        assert_eq!(scope.interrupted().await, WaitInterruption::DeadlineExceeded);
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_parent_cancellation_beats_deadline() {
        let shutdown = CancellationToken::new();
        let scope = WaitScope::with_timeout(&shutdown, Duration::from_secs(60));

        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        assert_eq!(scope.interrupted().await, WaitInterruption::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_waits_for_cancellation() {
        let shutdown = CancellationToken::new();
        let scope = WaitScope::unbounded(&shutdown);
        assert!(scope.deadline().is_none());

        let res = tokio::time::timeout(Duration::from_secs(3600), scope.interrupted()).await;
        assert!(res.is_err());

        shutdown.cancel();
        assert_eq!(scope.interrupted().await, WaitInterruption::Cancelled);
    }

    #[test]
    fn test_drop_cancels_scope_not_parent() {
        let shutdown = CancellationToken::new();
        let token = {
            let scope = WaitScope::unbounded(&shutdown);
            scope.token().clone()
        };
        assert!(token.is_cancelled());
        assert!(!shutdown.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_timeout_is_clamped() {
        let shutdown = CancellationToken::new();
        let start = Instant::now();
        let scope = WaitScope::with_timeout(&shutdown, Duration::MAX);

        assert_eq!(scope.deadline(), Some(start + FAR_FUTURE));

        shutdown.cancel();
        assert_eq!(scope.interrupted().await, WaitInterruption::Cancelled);
    }

    #[tokio::test]
    async fn test_zero_timeout_expires_immediately() {
        let shutdown = CancellationToken::new();
        let scope = WaitScope::with_timeout(&shutdown, Duration::ZERO);
        assert_eq!(scope.interrupted().await, WaitInterruption::DeadlineExceeded);
    }
}
