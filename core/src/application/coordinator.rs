//! Stop transaction: signal, wait, escalate, kill, wait.

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::{EngineConfig, GRACE_PERIOD};
use crate::domain::{EventAction, ExitStatus, StopTimeout, WaitCondition};
use crate::error::{Error, Result};
use crate::ports::{EventLog, ExitWaiter, ProcessHandle, SignalSender};
use crate::scope::WaitScope;

/// Runs the graceful stop of one process, escalating to a forced kill when
/// the process does not exit in time.
///
/// One call is one transaction: it never retries on its own and it returns
/// either success or a single [`Error::StopFailed`]. The "stop" lifecycle
/// event is logged exactly once per successful call that actually stopped
/// something; calls on a process that is not running are silent no-ops.
///
/// Every wait is scoped under the `shutdown` token given at construction,
/// so cancelling it interrupts any wait in progress.
pub struct StopCoordinator<S, W, E>
where
    S: SignalSender,
    W: ExitWaiter,
    E: EventLog,
{
    signals: S,
    waiter: W,
    events: E,
    config: EngineConfig,
    shutdown: CancellationToken,
}

impl<S, W, E> StopCoordinator<S, W, E>
where
    S: SignalSender,
    W: ExitWaiter,
    E: EventLog,
{
    pub fn new(
        signals: S,
        waiter: W,
        events: E,
        config: EngineConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            signals,
            waiter,
            events,
            config,
            shutdown,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    /// Stop `process`, forcing termination if it does not exit in time.
    ///
    /// `timeout` is in whole seconds and overrides the process's configured
    /// stop timeout, which in turn overrides the engine default. A negative
    /// value waits for the exit indefinitely and never forces; only
    /// cancellation of the shutdown token ends such a wait. Zero forces
    /// right away.
    ///
    /// A process that is not running is already stopped: `Ok(())`, with no
    /// signal sent and no event logged.
    pub async fn stop(&self, process: &dyn ProcessHandle, timeout: Option<i64>) -> Result<()> {
        self.run(process, timeout)
            .await
            .map_err(|source| Error::stop_failed(process.id(), source))
    }

    async fn run(&self, process: &dyn ProcessHandle, requested: Option<i64>) -> Result<()> {
        if !process.is_running() {
            debug!(container = %process.id(), "Container is not running");
            return Ok(());
        }

        let signal = process
            .stop_signal()
            .unwrap_or(self.config.default_stop_signal);
        let timeout = StopTimeout::resolve(
            requested,
            process.stop_timeout(),
            self.config.default_stop_timeout,
        );

        // 1. Ask nicely. A failed send is not fatal: the process may be exiting already.
        let send_err = self.signals.send(process, signal).await.err();
        if let Some(e) = &send_err {
            debug!(container = %process.id(), signal = %signal, error = %e, "Stop signal not delivered");
        }

        // 2. Wait for the exit. After a failed send only a short grace period is
        // worth spending, unless the caller asked never to force.
        let scope = match timeout {
            StopTimeout::Never => WaitScope::unbounded(&self.shutdown),
            StopTimeout::After(_) if send_err.is_some() => {
                WaitScope::with_timeout(&self.shutdown, GRACE_PERIOD)
            }
            StopTimeout::After(wait) => WaitScope::with_timeout(&self.shutdown, wait),
        };
        let status = self
            .waiter
            .wait(process, WaitCondition::NotRunning, &scope)
            .await;
        drop(scope);

        let interruption = match status {
            ExitStatus::Exited { .. } => {
                // The process is gone; whatever happened to the signal no longer matters.
                self.stopped(process);
                return Ok(());
            }
            ExitStatus::Interrupted(reason) => reason,
        };

        if let Some(e) = &send_err {
            error!(
                container = %process.id(),
                signal = %signal,
                error = %e,
                "Error sending stop signal to container"
            );
        }

        if timeout.is_never() {
            // Never force, even though the wait was interrupted.
            return Err(Error::WaitInterrupted(interruption));
        }

        // 3. Escalate.
        info!(
            container = %process.id(),
            timeout = %timeout,
            signal = %signal,
            reason = %interruption,
            "Container failed to exit in time, using the force"
        );

        if let Err(kill_err) = self.signals.kill(process).await {
            // Give it one more short chance to go away by itself.
            let scope = WaitScope::with_timeout(&self.shutdown, GRACE_PERIOD);
            let status = self
                .waiter
                .wait(process, WaitCondition::NotRunning, &scope)
                .await;
            if status.is_exited() {
                self.stopped(process);
                return Ok(());
            }

            error!(container = %process.id(), error = %kill_err, "Error killing the container");
            return Err(kill_err);
        }

        // 4. SIGKILL cannot be ignored; the exit should follow promptly.
        let scope = WaitScope::with_timeout(&self.shutdown, self.config.kill_wait());
        let status = self
            .waiter
            .wait(process, WaitCondition::NotRunning, &scope)
            .await;
        if let Some(reason) = status.err() {
            warn!(
                container = %process.id(),
                wait = ?self.config.kill_wait(),
                reason = %reason,
                "Exit not observed after kill, assuming the container stopped"
            );
        }

        self.stopped(process);
        Ok(())
    }

    fn stopped(&self, process: &dyn ProcessHandle) {
        self.events.log_event(process, EventAction::Stop);
    }
}
