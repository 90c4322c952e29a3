//! Error types for the haltctl-core library.

use thiserror::Error;

use crate::domain::WaitInterruption;

/// Result type alias for haltctl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while stopping and supervising processes.
#[derive(Error, Debug)]
pub enum Error {
    /// The target process no longer exists.
    ///
    /// Signal senders report this instead of failing hard; the process
    /// may simply have exited on its own.
    #[error("No such process: {0}")]
    ProcessGone(String),

    /// Permission denied for an operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A stop signal could not be delivered.
    #[error("Failed to send {signal} to container {id}: {reason}")]
    SignalFailed {
        id: String,
        signal: String,
        reason: String,
    },

    /// Forceful termination could not be issued.
    #[error("Failed to kill container {id}: {reason}")]
    KillFailed { id: String, reason: String },

    /// A wait for the process to exit ended before the exit was observed.
    #[error("Wait interrupted: {0}")]
    WaitInterrupted(#[from] WaitInterruption),

    /// The stop transaction failed.
    ///
    /// This is the only shape returned by `StopCoordinator::stop`.
    #[error("cannot stop container: {id}: {source}")]
    StopFailed {
        id: String,
        #[source]
        source: Box<Error>,
    },

    /// No process matches the given reference.
    #[error("No such container: {0}")]
    NotFound(String),

    /// More than one process matches the given id prefix.
    #[error("Multiple containers match reference: {0}")]
    AmbiguousReference(String),

    /// Signal name or number not recognised.
    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    /// Failed to start a process.
    #[error("Failed to spawn process: {0}")]
    Spawn(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an error as the terminal failure of a stop transaction.
    pub fn stop_failed(id: impl Into<String>, source: Error) -> Self {
        Error::StopFailed {
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error only says the process was already gone.
    pub fn is_process_gone(&self) -> bool {
        matches!(self, Error::ProcessGone(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_failed_display_names_container() {
        let err = Error::stop_failed(
            "abc123",
            Error::KillFailed {
                id: "abc123".to_string(),
                reason: "EPERM".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("cannot stop container: abc123"));
        assert!(msg.contains("Failed to kill container abc123: EPERM"));
    }

    #[test]
    fn test_stop_failed_keeps_source() {
        let err = Error::stop_failed("abc", Error::ProcessGone("abc".to_string()));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "No such process: abc");
    }

    #[test]
    fn test_is_process_gone() {
        assert!(Error::ProcessGone("abc".to_string()).is_process_gone());
        assert!(!Error::NotFound("x".to_string()).is_process_gone());
    }
}
