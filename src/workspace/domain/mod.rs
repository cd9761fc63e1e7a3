//! Domain model for the project workspace.
//!
//! A workspace is one owner's project together with its phases, board tasks,
//! and deliverables. The domain keeps persistence and transport concerns
//! outside its boundary; scheduling rules come from [`crate::planning`].

mod deliverable;
mod error;
mod ids;
mod link;
mod phase;
mod project;
mod seed;
mod status;
mod task;
mod text;

pub use deliverable::{
    Deliverable, DeliverableDraft, PersistedDeliverableData, validate_resource_links,
};
pub use error::{ParseDeliverableStatusError, ParsePriorityError, WorkspaceDomainError};
pub use ids::{DeliverableId, OwnerId, PhaseId, ProjectId, TaskId};
pub use link::TaskLink;
pub use phase::{PersistedPhaseData, Phase};
pub use project::{PersistedProjectData, Project};
pub use seed::{
    DEFAULT_DELIVERABLES, DEFAULT_PHASES, DEFAULT_PROJECT_DESCRIPTION, DEFAULT_PROJECT_TITLE,
    PhaseTemplate, WorkspaceSeed,
};
pub use status::{DeliverableStatus, Priority};
pub use task::{PersistedTaskData, Task, TaskDraft};
pub use text::{optional_text, required_text};
