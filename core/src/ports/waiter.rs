//! Exit waiter port (interface).

use crate::domain::{ExitStatus, WaitCondition};
use crate::scope::WaitScope;

use super::ProcessHandle;

/// Port for observing a process leave the running state.
///
/// Each call is one wait attempt and yields exactly one [`ExitStatus`].
/// When `scope` is cancelled or its deadline passes before the condition
/// holds, the status is [`ExitStatus::Interrupted`]. Dropping the returned
/// future releases everything tied to the wait.
pub trait ExitWaiter: Send + Sync {
    fn wait(
        &self,
        process: &dyn ProcessHandle,
        condition: WaitCondition,
        scope: &WaitScope,
    ) -> impl std::future::Future<Output = ExitStatus> + Send;
}
