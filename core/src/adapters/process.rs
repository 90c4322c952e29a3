//! Supervised child processes.
//!
//! A [`ManagedProcess`] owns nothing but its identity, configuration and
//! shared run state. The `tokio::process::Child` lives in a reaper task that
//! publishes the exit as soon as the process is reaped.

use std::os::unix::process::ExitStatusExt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{ProcessState, StopSignal};
use crate::error::{Error, Result};
use crate::ports::ProcessHandle;

/// Shells report death-by-signal as `128 + signo`; so do we.
const SIGNAL_EXIT_BASE: i32 = 128;

/// What to run and how it wants to be stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSpec {
    /// Name to register the process under. Generated when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Stop signal; the engine default is used when absent.
    #[serde(default)]
    pub stop_signal: Option<StopSignal>,
    /// Stop timeout in seconds; negative means never force.
    #[serde(default)]
    pub stop_timeout: Option<i64>,
}

impl ProcessSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn stop_signal(mut self, signal: StopSignal) -> Self {
        self.stop_signal = Some(signal);
        self
    }

    pub fn stop_timeout(mut self, seconds: i64) -> Self {
        self.stop_timeout = Some(seconds);
        self
    }
}

/// A running (or finished) child process under supervision.
///
/// Signals target the PID (or process group) recorded at spawn time, read
/// from the published run state. Once the reaper publishes the exit the PID
/// is no longer handed out and senders report the process as gone. There is
/// a short window between the kernel reaping the child and the reaper
/// publishing the exit in which the PID could in principle be reused by an
/// unrelated process; `kill(2)` offers no way to close it.
#[derive(Debug)]
pub struct ManagedProcess {
    id: String,
    name: String,
    spec: ProcessSpec,
    state: ProcessState,
}

impl ManagedProcess {
    /// Start the process in its own process group and attach a reaper.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(spec: ProcessSpec) -> Result<Arc<Self>> {
        let id = generate_id();
        let name = spec
            .name
            .clone()
            .unwrap_or_else(|| format!("proc-{}", &id[..12]));

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .process_group(0)
            .spawn()
            .map_err(|e| Error::Spawn(format!("{}: {}", spec.program, e)))?;

        let pid = child
            .id()
            .ok_or_else(|| Error::Spawn(format!("{}: exited before it was tracked", spec.program)))?;

        let state = ProcessState::running(pid);
        info!(container = %id, name = %name, pid, program = %spec.program, "Started process");

        let reaper_state = state.clone();
        let reaper_id = id.clone();
        tokio::spawn(async move {
            let code = match child.wait().await {
                Ok(status) => status
                    .code()
                    .or_else(|| status.signal().map(|sig| SIGNAL_EXIT_BASE + sig)),
                Err(e) => {
                    warn!(container = %reaper_id, error = %e, "Failed to reap process");
                    None
                }
            };
            debug!(container = %reaper_id, code = ?code, "Process exited");
            reaper_state.set_exited(code);
        });

        Ok(Arc::new(Self {
            id,
            name,
            spec,
            state,
        }))
    }

    pub fn spec(&self) -> &ProcessSpec {
        &self.spec
    }
}

impl ProcessHandle for ManagedProcess {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> &ProcessState {
        &self.state
    }

    fn stop_signal(&self) -> Option<StopSignal> {
        self.spec.stop_signal
    }

    fn stop_timeout(&self) -> Option<i64> {
        self.spec.stop_timeout
    }
}

/// 64 lowercase hex characters.
fn generate_id() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
