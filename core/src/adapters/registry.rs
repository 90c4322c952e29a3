//! In-memory process registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::adapters::ManagedProcess;
use crate::error::{Error, Result};
use crate::ports::{ProcessHandle, ProcessLookup};

/// Registered processes, keyed by id.
///
/// Lookups accept a full id, an exact name, or an unambiguous id prefix,
/// tried in that order.
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    processes: RwLock<HashMap<String, Arc<ManagedProcess>>>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a process. Names must be unique.
    pub fn register(&self, process: Arc<ManagedProcess>) -> Result<()> {
        let mut processes = self.processes.write();

        if processes.values().any(|p| p.name() == process.name()) {
            return Err(Error::Config(format!(
                "Name {} is already in use",
                process.name()
            )));
        }

        processes.insert(process.id().to_string(), process);
        Ok(())
    }

    /// Remove a process by reference, returning it.
    pub fn remove(&self, reference: &str) -> Result<Arc<ManagedProcess>> {
        let process = self.get(reference)?;
        self.processes.write().remove(process.id());
        Ok(process)
    }

    /// Resolve a reference to a process.
    pub fn get(&self, reference: &str) -> Result<Arc<ManagedProcess>> {
        if reference.is_empty() {
            return Err(Error::NotFound(reference.to_string()));
        }

        let processes = self.processes.read();

        if let Some(process) = processes.get(reference) {
            return Ok(process.clone());
        }

        if let Some(process) = processes.values().find(|p| p.name() == reference) {
            return Ok(process.clone());
        }

        let mut matches = processes
            .iter()
            .filter(|(id, _)| id.starts_with(reference))
            .map(|(_, p)| p);

        match (matches.next(), matches.next()) {
            (Some(process), None) => Ok(process.clone()),
            (Some(_), Some(_)) => Err(Error::AmbiguousReference(reference.to_string())),
            (None, _) => Err(Error::NotFound(reference.to_string())),
        }
    }

    /// All registered processes.
    pub fn list(&self) -> Vec<Arc<ManagedProcess>> {
        self.processes.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.processes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.read().is_empty()
    }
}

impl ProcessLookup for ProcessRegistry {
    type Handle = ManagedProcess;

    fn lookup(&self, reference: &str) -> Result<Arc<ManagedProcess>> {
        self.get(reference)
    }
}
