//! Starter workspace created the first time an owner signs in.

use super::{
    Deliverable, DeliverableDraft, DeliverableStatus, OwnerId, Phase, Project,
    WorkspaceDomainError,
};
use crate::planning::{DateWindow, sequence_span};
use mockable::Clock;

/// Default project title.
pub const DEFAULT_PROJECT_TITLE: &str =
    "Graph Serialization Strategies for Retrieval-Augmented Generation";

/// Default project description.
pub const DEFAULT_PROJECT_DESCRIPTION: &str = "Comparative analysis of vector-based and \
     graph-based indexing in industrial knowledge graphs.";

/// Template for one default phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTemplate {
    /// Display name.
    pub name: &'static str,
    /// Timeline colour token.
    pub color_token: &'static str,
    /// First day, `YYYY-MM-DD`.
    pub start_date: &'static str,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: &'static str,
}

/// Default phases, in sequence order.
pub const DEFAULT_PHASES: [PhaseTemplate; 5] = [
    PhaseTemplate {
        name: "Pre-study",
        color_token: "phase-prestudy",
        start_date: "2026-02-01",
        end_date: "2026-02-28",
    },
    PhaseTemplate {
        name: "Implementation",
        color_token: "phase-implementation",
        start_date: "2026-03-01",
        end_date: "2026-03-31",
    },
    PhaseTemplate {
        name: "Evaluation / Benchmarking",
        color_token: "phase-evaluation",
        start_date: "2026-04-01",
        end_date: "2026-04-15",
    },
    PhaseTemplate {
        name: "Writing",
        color_token: "phase-writing",
        start_date: "2026-04-16",
        end_date: "2026-05-10",
    },
    PhaseTemplate {
        name: "Review, Opposition + Defense",
        color_token: "phase-review",
        start_date: "2026-05-11",
        end_date: "2026-05-31",
    },
];

/// Default deliverables paired with the index of the phase they belong to.
pub const DEFAULT_DELIVERABLES: [(&str, usize); 10] = [
    ("Project proposal & kickoff notes", 0),
    ("Pre-study literature summary", 0),
    ("Strategy A prototype ready", 1),
    ("Strategy B prototype ready", 1),
    ("Strategy C prototype ready", 1),
    ("Ground truth & benchmark suite ready", 2),
    ("Benchmark report + comparative analysis", 2),
    ("Thesis draft v1", 3),
    ("Final thesis manuscript", 3),
    ("Presentation + opposition package", 4),
];

/// A complete workspace ready to be inserted in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSeed {
    /// The project.
    pub project: Project,
    /// Phases in sequence order.
    pub phases: Vec<Phase>,
    /// Deliverables, each due on its phase's last day.
    pub deliverables: Vec<Deliverable>,
}

impl WorkspaceSeed {
    /// Returns the date windows of the default phases in sequence order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::InvalidDate`] if a template date is
    /// malformed.
    pub fn default_phase_windows() -> Result<Vec<DateWindow>, WorkspaceDomainError> {
        DEFAULT_PHASES
            .iter()
            .map(|template| {
                DateWindow::parse(template.start_date, template.end_date)
                    .map_err(WorkspaceDomainError::from)
            })
            .collect()
    }

    /// Builds the default thesis workspace for `owner_id`.
    ///
    /// The project window spans the default phases. Each default deliverable
    /// is attached to its template phase and falls due on that phase's end
    /// date.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::InvalidDate`] if a template date is
    /// malformed, or [`WorkspaceDomainError::EmptySchedule`] if the template
    /// has no phases.
    pub fn thesis_template(
        owner_id: OwnerId,
        clock: &impl Clock,
    ) -> Result<Self, WorkspaceDomainError> {
        let windows = Self::default_phase_windows()?;
        let project_window = sequence_span(&windows).ok_or(WorkspaceDomainError::EmptySchedule)?;
        let project = Project::new(
            owner_id,
            DEFAULT_PROJECT_TITLE,
            Some(DEFAULT_PROJECT_DESCRIPTION.to_owned()),
            project_window,
            clock,
        );

        let phases: Vec<Phase> = DEFAULT_PHASES
            .iter()
            .zip(windows)
            .zip(0_u32..)
            .map(|((template, window), order_index)| {
                Phase::new(
                    project.id(),
                    template.name,
                    order_index,
                    window,
                    template.color_token,
                    clock,
                )
            })
            .collect();

        let deliverables = DEFAULT_DELIVERABLES
            .iter()
            .map(|(title, phase_index)| {
                let phase = phases.get(*phase_index);
                Deliverable::new(
                    DeliverableDraft {
                        project_id: project.id(),
                        phase_id: phase.map(Phase::id),
                        title: (*title).to_owned(),
                        description: None,
                        due_date: phase.map(|assigned| assigned.window().end_date()),
                        status: DeliverableStatus::NotStarted,
                        resource_links: Vec::new(),
                    },
                    clock,
                )
            })
            .collect();

        Ok(Self {
            project,
            phases,
            deliverables,
        })
    }
}
