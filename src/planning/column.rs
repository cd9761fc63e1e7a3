//! Kanban status columns.

use super::ParseStatusColumnError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kanban stage a task occupies.
///
/// Declaration order is the left-to-right board order, so the derived `Ord`
/// sorts columns the way the board renders them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StatusColumn {
    /// Work captured but not yet planned.
    Backlog,
    /// Work planned for the near term.
    #[default]
    Todo,
    /// Work currently being done.
    InProgress,
    /// Work waiting on something external.
    Blocked,
    /// Finished work.
    Done,
}

impl StatusColumn {
    /// All columns in board order.
    pub const ALL: [Self; 5] = [
        Self::Backlog,
        Self::Todo,
        Self::InProgress,
        Self::Blocked,
        Self::Done,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }

    /// Returns the human-readable column heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Todo => "Todo",
            Self::InProgress => "In progress",
            Self::Blocked => "Blocked",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for StatusColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StatusColumn {
    type Error = ParseStatusColumnError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "done" => Ok(Self::Done),
            _ => Err(ParseStatusColumnError(value.to_owned())),
        }
    }
}
