//! Step definitions for kanban reordering scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
