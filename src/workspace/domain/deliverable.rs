//! Deliverable (milestone) aggregate.

use super::{DeliverableId, DeliverableStatus, PhaseId, ProjectId, WorkspaceDomainError};
use crate::planning::IsoDate;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use url::Url;

/// A milestone tracked alongside the board.
///
/// Deliverables optionally belong to one phase and may be linked to any
/// number of tasks. Links are stored separately from the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deliverable {
    id: DeliverableId,
    project_id: ProjectId,
    phase_id: Option<PhaseId>,
    title: String,
    description: Option<String>,
    due_date: Option<IsoDate>,
    status: DeliverableStatus,
    resource_links: Vec<String>,
    created_at: DateTime<Utc>,
}

/// Validated field values for a new deliverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverableDraft {
    /// Owning project.
    pub project_id: ProjectId,
    /// Phase the deliverable belongs to, if any.
    pub phase_id: Option<PhaseId>,
    /// Title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<IsoDate>,
    /// Progress status.
    pub status: DeliverableStatus,
    /// Absolute URLs to supporting material.
    pub resource_links: Vec<String>,
}

/// Parameter object for reconstructing a persisted deliverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDeliverableData {
    /// Persisted deliverable identifier.
    pub id: DeliverableId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Phase the deliverable belongs to, if any.
    pub phase_id: Option<PhaseId>,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<IsoDate>,
    /// Persisted status.
    pub status: DeliverableStatus,
    /// Persisted resource links.
    pub resource_links: Vec<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Deliverable {
    /// Creates a deliverable from validated draft values.
    #[must_use]
    pub fn new(draft: DeliverableDraft, clock: &impl Clock) -> Self {
        Self {
            id: DeliverableId::new(),
            project_id: draft.project_id,
            phase_id: draft.phase_id,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            status: draft.status,
            resource_links: draft.resource_links,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a deliverable from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDeliverableData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            phase_id: data.phase_id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            resource_links: data.resource_links,
            created_at: data.created_at,
        }
    }

    /// Returns the deliverable identifier.
    #[must_use]
    pub const fn id(&self) -> DeliverableId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the phase the deliverable belongs to, if any.
    #[must_use]
    pub const fn phase_id(&self) -> Option<PhaseId> {
        self.phase_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<IsoDate> {
        self.due_date
    }

    /// Returns the progress status.
    #[must_use]
    pub const fn status(&self) -> DeliverableStatus {
        self.status
    }

    /// Returns the resource links.
    #[must_use]
    pub fn resource_links(&self) -> &[String] {
        &self.resource_links
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Moves the deliverable to another phase or detaches it.
    pub const fn assign_phase(&mut self, phase_id: Option<PhaseId>) {
        self.phase_id = phase_id;
    }

    /// Replaces the due date.
    pub const fn set_due_date(&mut self, due_date: Option<IsoDate>) {
        self.due_date = due_date;
    }

    /// Replaces the status.
    pub const fn set_status(&mut self, status: DeliverableStatus) {
        self.status = status;
    }

    /// Replaces the resource links.
    pub fn set_resource_links(&mut self, resource_links: Vec<String>) {
        self.resource_links = resource_links;
    }
}

/// Validates resource links, keeping their original spelling.
///
/// # Errors
///
/// Returns [`WorkspaceDomainError::InvalidResourceLink`] for the first value
/// that does not parse as an absolute URL.
pub fn validate_resource_links(
    links: impl IntoIterator<Item = String>,
) -> Result<Vec<String>, WorkspaceDomainError> {
    links
        .into_iter()
        .map(|link| {
            if Url::parse(link.trim()).is_ok() {
                Ok(link)
            } else {
                Err(WorkspaceDomainError::InvalidResourceLink(link))
            }
        })
        .collect()
}
