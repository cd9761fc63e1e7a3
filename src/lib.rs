//! Phaseboard: a personal thesis project tracker.
//!
//! A project is split into an ordered, non-overlapping sequence of phases.
//! Work is tracked as tasks on a kanban board and as deliverables with due
//! dates. The crate stops at an in-process service API; request handling and
//! rendering belong to the host application.
//!
//! # Architecture
//!
//! Phaseboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`planning`]: Board reordering and schedule validation rules
//! - [`workspace`]: Projects, phases, tasks, and deliverables

pub mod planning;
pub mod workspace;
