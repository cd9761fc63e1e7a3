//! Read models returned by [`super::WorkspaceService`].

use crate::planning::{IsoDate, StatusColumn};
use crate::workspace::domain::{Deliverable, DeliverableId, Phase, PhaseId, Project, Task};
use serde::Serialize;

/// A task on the board with the deliverables it contributes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardTask {
    /// The task.
    pub task: Task,
    /// Linked deliverables.
    pub deliverable_ids: Vec<DeliverableId>,
}

/// Everything the kanban board renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// The project.
    pub project: Project,
    /// Phases ordered by sequence position.
    pub phases: Vec<Phase>,
    /// Tasks ordered by column, then rank, then creation time.
    pub tasks: Vec<BoardTask>,
    /// Deliverables ordered by creation time.
    pub deliverables: Vec<Deliverable>,
}

impl BoardView {
    /// Returns the tasks of one column in rank order.
    pub fn column(&self, status_column: StatusColumn) -> impl Iterator<Item = &BoardTask> {
        self.tasks
            .iter()
            .filter(move |entry| entry.task.status_column() == status_column)
    }

    /// Returns each column heading with its task count, in board order.
    #[must_use]
    pub fn headings(&self) -> Vec<(&'static str, usize)> {
        StatusColumn::ALL
            .iter()
            .map(|status_column| (status_column.label(), self.column(*status_column).count()))
            .collect()
    }
}

/// Everything the timeline renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineView {
    /// The project.
    pub project: Project,
    /// Phases ordered by sequence position.
    pub phases: Vec<Phase>,
    /// Tasks ordered by start date, then creation time.
    pub tasks: Vec<Task>,
    /// The phase whose window contains `today`, if any.
    pub current_phase: Option<PhaseId>,
    /// Today in the configured time zone.
    pub today: IsoDate,
}

/// A deliverable with its progress and due-date figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliverableSummary {
    /// The deliverable.
    pub deliverable: Deliverable,
    /// Number of linked tasks.
    pub linked_tasks: usize,
    /// Number of linked tasks in the `done` column.
    pub completed_tasks: usize,
    /// Days from today to the due date; negative when overdue.
    pub days_until_due: Option<i64>,
    /// Human label for `days_until_due`, such as `"in 3d"`.
    pub due_label: Option<String>,
}
