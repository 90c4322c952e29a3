//! Signal sender port (interface).

use crate::domain::StopSignal;
use crate::error::Result;

use super::ProcessHandle;

/// Port for delivering signals to a possibly-already-dead process.
///
/// Implementations must report a vanished process as
/// [`Error::ProcessGone`](crate::Error::ProcessGone) rather than panicking.
pub trait SignalSender: Send + Sync {
    /// Deliver `signal` to the process.
    fn send(
        &self,
        process: &dyn ProcessHandle,
        signal: StopSignal,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Forcefully terminate the process with an unmaskable signal.
    fn kill(
        &self,
        process: &dyn ProcessHandle,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
