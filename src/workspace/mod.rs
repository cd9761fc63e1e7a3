//! Project workspace: phases, board tasks, and deliverables for one owner.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! Every mutation that touches the board ordering or the phase schedule is
//! checked against the rules in [`crate::planning`] before anything is
//! written.

pub mod adapters;
mod config;
pub mod domain;
pub mod ports;
pub mod services;

pub use config::{DEFAULT_TIME_ZONE, WorkspaceConfig};
