//! Text limits and calendar settings applied by the workspace service.

use chrono_tz::Tz;
use serde::Deserialize;

/// Time zone whose calendar decides what "today" is.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Europe::Stockholm;

/// Length limits for user-supplied workspace text and the calendar used for
/// due dates and the current phase.
///
/// Limits count Unicode scalar values, not bytes. Missing fields fall back to
/// the defaults when the configuration is deserialized from a host document.
///
/// # Examples
///
/// ```
/// use phaseboard::workspace::WorkspaceConfig;
///
/// let config = WorkspaceConfig::default();
/// assert_eq!(config.max_task_title_len, 160);
///
/// let lenient = WorkspaceConfig::lenient();
/// assert!(lenient.max_description_len > config.max_description_len);
/// assert_eq!(config.time_zone, chrono_tz::Europe::Stockholm);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Maximum task title length.
    pub max_task_title_len: usize,
    /// Maximum deliverable title length.
    pub max_deliverable_title_len: usize,
    /// Maximum phase name length.
    pub max_phase_name_len: usize,
    /// Maximum project title length.
    pub max_project_title_len: usize,
    /// Maximum length of any description.
    pub max_description_len: usize,
    /// Zone used to turn the clock's instant into a calendar date.
    pub time_zone: Tz,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            max_task_title_len: 160,
            max_deliverable_title_len: 160,
            max_phase_name_len: 120,
            max_project_title_len: 200,
            max_description_len: 4000,
            time_zone: DEFAULT_TIME_ZONE,
        }
    }
}

impl WorkspaceConfig {
    /// Creates a configuration with raised limits.
    ///
    /// Useful when importing content written elsewhere.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            max_task_title_len: 1000,
            max_deliverable_title_len: 1000,
            max_phase_name_len: 500,
            max_project_title_len: 1000,
            max_description_len: 64_000,
            time_zone: DEFAULT_TIME_ZONE,
        }
    }
}
