//! Scheduling rules for the board and the timeline.
//!
//! This module holds the pure rules every mutation of a workspace is checked
//! against:
//!
//! - [`compute_reorder`] recomputes dense column ranks after a kanban move
//! - [`validate_sequence`] checks that phases form a non-overlapping sequence
//! - [`validate_task_window`] checks that task dates nest inside a window
//!
//! Nothing here performs I/O or holds state. Every function takes a snapshot
//! and returns either a description of the change to apply or the rule that
//! was broken, so callers can run them inside a single persistence
//! transaction and abort on the first error.

mod column;
mod date;
mod error;
mod reorder;
mod sequence;
mod window;

pub use column::StatusColumn;
pub use date::{DateWindow, IsoDate, relative_day_label};
pub use error::{
    InvalidIsoDate, ParseStatusColumnError, ReorderError, SequenceViolation, WindowViolation,
};
pub use reorder::{TaskPlacement, TaskUpdate, compute_reorder, renumber_column};
pub use sequence::{sequence_span, validate_sequence};
pub use window::validate_task_window;

#[cfg(test)]
mod tests;
