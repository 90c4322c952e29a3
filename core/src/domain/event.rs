//! Lifecycle event domain model.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Lifecycle action recorded for a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventAction {
    /// The process was stopped by a stop transaction.
    Stop,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Stop => "stop",
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    /// Process (container) id.
    pub id: String,
    /// Human-friendly process name.
    pub name: String,
    pub action: EventAction,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

impl LifecycleEvent {
    /// Create an event stamped with the current wall-clock time.
    pub fn now(id: impl Into<String>, name: impl Into<String>, action: EventAction) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            id: id.into(),
            name: name.into(),
            action,
            timestamp_ms,
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.action, self.name, self.id)
    }
}
