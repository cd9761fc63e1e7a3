//! Project phases.

use super::{PhaseId, ProjectId};
use crate::planning::DateWindow;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A named, date-bounded segment of the project timeline.
///
/// `order_index` fixes the phase's position in the project sequence and never
/// changes after creation; only the name and dates are editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    id: PhaseId,
    project_id: ProjectId,
    name: String,
    order_index: u32,
    window: DateWindow,
    color_token: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPhaseData {
    /// Persisted phase identifier.
    pub id: PhaseId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted display name.
    pub name: String,
    /// Position in the project sequence.
    pub order_index: u32,
    /// Persisted phase window.
    pub window: DateWindow,
    /// Colour token used by the timeline.
    pub color_token: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Phase {
    /// Creates a phase at position `order_index` of `project_id`.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        order_index: u32,
        window: DateWindow,
        color_token: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: PhaseId::new(),
            project_id,
            name: name.into(),
            order_index,
            window,
            color_token: color_token.into(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a phase from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPhaseData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            order_index: data.order_index,
            window: data.window,
            color_token: data.color_token,
            created_at: data.created_at,
        }
    }

    /// Returns the phase identifier.
    #[must_use]
    pub const fn id(&self) -> PhaseId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the position in the project sequence.
    #[must_use]
    pub const fn order_index(&self) -> u32 {
        self.order_index
    }

    /// Returns the phase window.
    #[must_use]
    pub const fn window(&self) -> DateWindow {
        self.window
    }

    /// Returns the timeline colour token.
    #[must_use]
    pub fn color_token(&self) -> &str {
        &self.color_token
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the name and window.
    pub fn revise(&mut self, name: impl Into<String>, window: DateWindow) {
        self.name = name.into();
        self.window = window;
    }
}
