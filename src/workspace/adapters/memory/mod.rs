//! In-memory adapters for workspace persistence.

mod repository;

pub use repository::InMemoryWorkspaceRepository;
