//! haltctl engine - supervised processes and their stop transactions.
//!
//! Wires the concrete adapters into a [`StopService`] and keeps the
//! registry and event journal the service works against.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::adapters::{
    EventJournal, ManagedProcess, NixSignalSender, ProcessRegistry, ProcessSpec, StateExitWaiter,
};
use crate::application::{StopCoordinator, StopOutcome, StopService};
use crate::config::EngineConfig;
use crate::domain::LifecycleEvent;
use crate::error::{Error, Result};
use crate::ports::{ProcessHandle, SignalSender};

type EngineStopService =
    StopService<Arc<ProcessRegistry>, NixSignalSender, StateExitWaiter, Arc<EventJournal>>;

/// The main haltctl engine.
///
/// # Usage Pattern
/// Start processes with [`spawn`](Self::spawn), stop them by id, name or
/// id prefix with [`stop`](Self::stop), and drain lifecycle events with
/// [`take_events`](Self::take_events). Cancelling the shutdown token passed
/// to [`new`](Self::new) interrupts every wait in flight.
pub struct StopEngine {
    signals: NixSignalSender,
    registry: Arc<ProcessRegistry>,
    events: Arc<EventJournal>,
    service: EngineStopService,
}

impl StopEngine {
    /// Create a new engine instance.
    pub fn new(config: EngineConfig, shutdown: CancellationToken) -> Self {
        let registry = Arc::new(ProcessRegistry::new());
        let events = Arc::new(EventJournal::new());
        // Children lead their own process group; signal all of it.
        let signals = NixSignalSender::new().process_group(true);

        let coordinator = StopCoordinator::new(
            signals,
            StateExitWaiter::new(),
            events.clone(),
            config,
            shutdown,
        );

        Self {
            service: StopService::new(registry.clone(), coordinator),
            signals,
            registry,
            events,
        }
    }

    // MARK: - Processes

    /// Start a process and register it.
    ///
    /// If registration fails the freshly started process is killed.
    pub async fn spawn(&self, spec: ProcessSpec) -> Result<Arc<ManagedProcess>> {
        let process = ManagedProcess::spawn(spec)?;

        if let Err(e) = self.registry.register(process.clone()) {
            debug!(container = %process.id(), "Registration failed, discarding process");
            self.discard(&process).await;
            return Err(e);
        }

        Ok(process)
    }

    /// Kill a process that never made it into the registry.
    async fn discard(&self, process: &ManagedProcess) {
        match self.signals.kill(process).await {
            Ok(()) | Err(Error::ProcessGone(_)) => {}
            Err(e) => {
                warn!(container = %process.id(), error = %e, "Failed to kill discarded process")
            }
        }
    }

    /// Resolve a reference to a registered process.
    pub fn get(&self, reference: &str) -> Result<Arc<ManagedProcess>> {
        self.registry.get(reference)
    }

    /// All registered processes.
    pub fn list(&self) -> Vec<Arc<ManagedProcess>> {
        self.registry.list()
    }

    /// Forget a process. It must not be running.
    pub fn remove(&self, reference: &str) -> Result<Arc<ManagedProcess>> {
        let process = self.registry.get(reference)?;
        if process.is_running() {
            return Err(Error::Config(format!(
                "You cannot remove a running container {}. Stop the container before attempting removal",
                process.id()
            )));
        }
        self.registry.remove(process.id())
    }

    // MARK: - Stop

    /// Stop a process by reference.
    ///
    /// `timeout` overrides the process's stop timeout; negative never forces.
    pub async fn stop(&self, reference: &str, timeout: Option<i64>) -> Result<StopOutcome> {
        self.service.stop_container(reference, timeout).await
    }

    // MARK: - Events

    /// Get and clear pending lifecycle events.
    pub fn take_events(&self) -> Vec<LifecycleEvent> {
        self.events.take_events()
    }

    // MARK: - Configuration

    pub fn config(&self) -> &EngineConfig {
        self.service.coordinator().config()
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        self.service.coordinator().shutdown_token()
    }
}
