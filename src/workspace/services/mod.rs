//! Application services for the project workspace.

mod deliverables;
mod error;
mod requests;
mod tasks;
mod views;
mod workspace;

pub use error::{WorkspaceServiceError, WorkspaceServiceResult};
pub use requests::{
    CreateDeliverableRequest, CreateTaskRequest, PhaseScheduleEntry, ReorderTaskRequest,
    UpdateDeliverableRequest, UpdatePhasesRequest, UpdateProjectRequest, UpdateTaskRequest,
};
pub use views::{BoardTask, BoardView, DeliverableSummary, TimelineView};
pub use workspace::WorkspaceService;
