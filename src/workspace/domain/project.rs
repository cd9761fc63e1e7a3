//! Project aggregate root.

use super::{OwnerId, ProjectId};
use crate::planning::DateWindow;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
///
/// The project window always spans from the first phase's start to the last
/// phase's end; it is rewritten together with the phases whenever the
/// schedule changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    owner_id: OwnerId,
    title: String,
    description: Option<String>,
    window: DateWindow,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted owner identifier.
    pub owner_id: OwnerId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted project window.
    pub window: DateWindow,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project. Text is expected to be validated by the caller.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        title: impl Into<String>,
        description: Option<String>,
        window: DateWindow,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            owner_id,
            title: title.into(),
            description,
            window,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            title: data.title,
            description: data.description,
            window: data.window,
            created_at: data.created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the project title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the project description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the project date window.
    #[must_use]
    pub const fn window(&self) -> DateWindow {
        self.window
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

    /// Moves the project window.
    pub const fn reschedule(&mut self, window: DateWindow) {
        self.window = window;
    }
}
