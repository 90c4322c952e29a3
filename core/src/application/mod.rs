//! Application layer - Use case services.
//!
//! This module contains application services that orchestrate
//! domain logic and adapter interactions.
//!
//! Services are designed to be thin orchestrators that:
//! - Accept domain types and port handles as inputs
//! - Use ports (traits) for external dependencies
//! - Return domain types as outputs

mod coordinator;
mod stop_service;

pub use coordinator::StopCoordinator;
pub use stop_service::{StopOutcome, StopService};
