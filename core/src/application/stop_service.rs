//! Stop-by-reference application service.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::ports::{EventLog, ExitWaiter, ProcessHandle, ProcessLookup, SignalSender};

use super::StopCoordinator;

/// What a stop request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopOutcome {
    /// The process was running and has been stopped.
    Stopped,
    /// The process was not running; nothing was done.
    ///
    /// Not an error, so repeated stop requests succeed. Transports that
    /// distinguish "not modified" can map this variant to it.
    AlreadyStopped,
}

/// Resolves a process reference and stops it.
///
/// Uses the `ProcessLookup` port to find the process, then hands it to a
/// [`StopCoordinator`].
pub struct StopService<L, S, W, E>
where
    L: ProcessLookup,
    S: SignalSender,
    W: ExitWaiter,
    E: EventLog,
{
    lookup: L,
    coordinator: StopCoordinator<S, W, E>,
}

impl<L, S, W, E> StopService<L, S, W, E>
where
    L: ProcessLookup,
    S: SignalSender,
    W: ExitWaiter,
    E: EventLog,
{
    pub fn new(lookup: L, coordinator: StopCoordinator<S, W, E>) -> Self {
        Self {
            lookup,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &StopCoordinator<S, W, E> {
        &self.coordinator
    }

    /// Stop the process named by `reference` (id, name or id prefix).
    ///
    /// `timeout` follows [`StopCoordinator::stop`].
    pub async fn stop_container(&self, reference: &str, timeout: Option<i64>) -> Result<StopOutcome> {
        let process = self.lookup.lookup(reference)?;

        if !process.is_running() {
            debug!(container = %process.id(), "Stop requested for a container that is not running");
            return Ok(StopOutcome::AlreadyStopped);
        }

        self.coordinator.stop(process.as_ref(), timeout).await?;
        Ok(StopOutcome::Stopped)
    }
}
