//! Port contracts for workspace persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the workspace
//! service.

pub mod repository;

#[cfg(test)]
pub use repository::MockWorkspaceRepository;
pub use repository::{WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult};
