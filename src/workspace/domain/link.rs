//! Task to deliverable links.

use super::{DeliverableId, TaskId};
use serde::{Deserialize, Serialize};

/// Records that a task contributes to a deliverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskLink {
    /// Linked task.
    pub task_id: TaskId,
    /// Linked deliverable.
    pub deliverable_id: DeliverableId,
}

impl TaskLink {
    /// Creates a link between `task_id` and `deliverable_id`.
    #[must_use]
    pub const fn new(task_id: TaskId, deliverable_id: DeliverableId) -> Self {
        Self {
            task_id,
            deliverable_id,
        }
    }
}
