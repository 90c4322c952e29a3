//! Signal delivery through `kill(2)`.
//!
//! Uses the standard Unix signals:
//! - the configured stop signal (SIGTERM unless overridden) for graceful shutdown
//! - SIGKILL (9) for forced termination, which the target cannot catch or ignore

use nix::errno::Errno;
use nix::sys::signal;
use nix::unistd::Pid;
use tracing::{debug, warn};

use crate::domain::StopSignal;
use crate::error::{Error, Result};
use crate::ports::{ProcessHandle, SignalSender};

/// Unix signal sender backed by `nix`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NixSignalSender {
    process_group: bool,
}

impl NixSignalSender {
    /// Create a sender that signals the process itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal the whole process group led by the process instead.
    pub fn process_group(mut self, enabled: bool) -> Self {
        self.process_group = enabled;
        self
    }

    fn target(&self, pid: u32) -> Pid {
        let raw = pid as i32;
        if self.process_group {
            Pid::from_raw(-raw)
        } else {
            Pid::from_raw(raw)
        }
    }

    /// Deliver `sig`, mapping errno values onto crate errors.
    ///
    /// `on_error` builds the error for anything other than ESRCH and EPERM.
    fn deliver(
        &self,
        process: &dyn ProcessHandle,
        sig: StopSignal,
        on_error: impl FnOnce(Errno) -> Error,
    ) -> Result<()> {
        let pid = process
            .pid()
            .ok_or_else(|| Error::ProcessGone(process.id().to_string()))?;

        debug!(container = %process.id(), pid, signal = %sig, "Sending signal");

        match signal::kill(self.target(pid), sig.as_nix()) {
            Ok(()) => Ok(()),
            Err(Errno::ESRCH) => {
                debug!(container = %process.id(), pid, "Process not found");
                Err(Error::ProcessGone(process.id().to_string()))
            }
            Err(Errno::EPERM) => {
                warn!(container = %process.id(), pid, signal = %sig, "Permission denied");
                Err(Error::PermissionDenied(format!(
                    "cannot send {} to process {}",
                    sig, pid
                )))
            }
            Err(errno) => Err(on_error(errno)),
        }
    }
}

impl SignalSender for NixSignalSender {
    async fn send(&self, process: &dyn ProcessHandle, signal: StopSignal) -> Result<()> {
        self.deliver(process, signal, |errno| Error::SignalFailed {
            id: process.id().to_string(),
            signal: signal.to_string(),
            reason: errno.desc().to_string(),
        })
    }

    async fn kill(&self, process: &dyn ProcessHandle) -> Result<()> {
        self.deliver(process, StopSignal::KILL, |errno| Error::KillFailed {
            id: process.id().to_string(),
            reason: errno.desc().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestProcess;
    use std::os::unix::process::ExitStatusExt;
    use tokio::process::Command;

    #[tokio::test]
    async fn test_send_term_to_child() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        let process = TestProcess::running("sleeper", child.id().unwrap());

        NixSignalSender::new()
            .send(&process, StopSignal::TERM)
            .await
            .unwrap();

        let status = child.wait().await.unwrap();
        assert_eq!(status.signal(), Some(StopSignal::TERM.number()));
    }

    #[tokio::test]
    async fn test_kill_child() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        let process = TestProcess::running("sleeper", child.id().unwrap());

        NixSignalSender::new().kill(&process).await.unwrap();

        let status = child.wait().await.unwrap();
        assert_eq!(status.signal(), Some(StopSignal::KILL.number()));
    }

    #[tokio::test]
    async fn test_nonexistent_process_is_reported_gone() {
        let process = TestProcess::running("ghost", 999_999_999);
        let sender = NixSignalSender::new();

        let err = sender.send(&process, StopSignal::TERM).await.unwrap_err();
        assert!(err.is_process_gone());

        let err = sender.kill(&process).await.unwrap_err();
        assert!(err.is_process_gone());
    }

    #[tokio::test]
    async fn test_not_running_handle_is_reported_gone() {
        let process = TestProcess::exited("done");
        let err = NixSignalSender::new()
            .send(&process, StopSignal::TERM)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProcessGone(id) if id == "done"));
    }

    #[test]
    fn test_process_group_target() {
        assert_eq!(NixSignalSender::new().target(42), Pid::from_raw(42));
        assert_eq!(
            NixSignalSender::new().process_group(true).target(42),
            Pid::from_raw(-42)
        );
    }
}
