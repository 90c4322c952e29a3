//! haltctl Core Library
//!
//! Graceful-then-forced stopping of supervised processes.
//! Provides functionality to:
//! - Send a configurable stop signal and wait for the exit
//! - Escalate to SIGKILL once the stop timeout expires
//! - Interrupt every wait from a single shutdown token
//! - Record a lifecycle event for each successful stop
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure business logic and data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! Unix only: signals are delivered with `kill(2)`.

#[cfg(not(unix))]
compile_error!("haltctl-core relies on Unix signals and supports Unix targets only");

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod engine;
pub mod error;
pub mod scope;

#[cfg(test)]
mod test_support;

// Re-export domain types (primary API)
pub use domain::{
    EventAction, ExitStatus, LifecycleEvent, ProcessState, RunState, StopSignal, StopTimeout,
    WaitCondition, WaitInterruption,
};

// Re-export other commonly used types
pub use adapters::{ManagedProcess, ProcessSpec};
pub use application::{StopCoordinator, StopOutcome, StopService};
pub use config::{ConfigStore, EngineConfig, GRACE_PERIOD};
pub use engine::StopEngine;
pub use error::{Error, Result};
pub use scope::WaitScope;
