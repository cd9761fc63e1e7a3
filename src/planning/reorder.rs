//! Kanban reorder engine.
//!
//! Each column keeps a dense, zero-based ranking of its tasks. Moving a task
//! is expressed as a pure recomputation: the engine reads a snapshot of every
//! placement in the project and returns the complete set of new
//! `(id, column, rank)` assignments for the columns the move touches. Callers
//! persist the returned set atomically.

use super::{ReorderError, StatusColumn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Column and rank of one task, as seen by the reorder engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskPlacement<Id> {
    /// Task identifier.
    pub id: Id,
    /// Column the task occupies.
    pub status_column: StatusColumn,
    /// Zero-based rank within the column.
    pub column_order: u32,
}

impl<Id> TaskPlacement<Id> {
    /// Creates a placement.
    #[must_use]
    pub const fn new(id: Id, status_column: StatusColumn, column_order: u32) -> Self {
        Self {
            id,
            status_column,
            column_order,
        }
    }
}

/// New placement a caller must write back for one task.
pub type TaskUpdate<Id> = TaskPlacement<Id>;

/// Computes the placements that move `moving_task_id` to `target_index` in
/// `target_column`.
///
/// `tasks` must hold every task of the project. The index is clamped into
/// `0..=len`, where `len` counts the target column without the moving task,
/// so negative values insert at the top and oversized values append. Both
/// the vacated source column and the target column are renumbered from zero;
/// tasks in other columns are never emitted. A move onto the task's current
/// position still yields the full renumbering of its column.
///
/// # Errors
///
/// Returns [`ReorderError::TaskNotFound`] when no task in `tasks` has the
/// moving identifier.
///
/// # Examples
///
/// ```
/// use phaseboard::planning::{StatusColumn, TaskPlacement, compute_reorder};
///
/// let tasks = vec![
///     TaskPlacement::new("a", StatusColumn::Todo, 0),
///     TaskPlacement::new("b", StatusColumn::Todo, 1),
/// ];
/// let updates = compute_reorder(&tasks, &"b", StatusColumn::Todo, 0).expect("b exists");
/// assert_eq!(
///     updates,
///     vec![
///         TaskPlacement::new("b", StatusColumn::Todo, 0),
///         TaskPlacement::new("a", StatusColumn::Todo, 1),
///     ]
/// );
/// ```
pub fn compute_reorder<Id>(
    tasks: &[TaskPlacement<Id>],
    moving_task_id: &Id,
    target_column: StatusColumn,
    target_index: i64,
) -> Result<Vec<TaskUpdate<Id>>, ReorderError<Id>>
where
    Id: Clone + Eq + Hash,
{
    let moving_task = tasks
        .iter()
        .find(|task| task.id == *moving_task_id)
        .ok_or_else(|| ReorderError::TaskNotFound(moving_task_id.clone()))?;
    let source_column = moving_task.status_column;
    let source_list = column_members(tasks, source_column, Some(moving_task_id));

    let mut updates = Vec::new();
    if source_column == target_column {
        let mut target_list = source_list;
        insert_clamped(&mut target_list, moving_task, target_index);
        push_renumbered(&mut updates, &target_list, target_column);
    } else {
        let mut target_list = column_members(tasks, target_column, None);
        insert_clamped(&mut target_list, moving_task, target_index);
        push_renumbered(&mut updates, &source_list, source_column);
        push_renumbered(&mut updates, &target_list, target_column);
    }

    Ok(dedup_last_wins(updates))
}

/// Computes the dense renumbering of one column in its current rank order.
///
/// Used after a task leaves `column` without entering another one (for
/// example when it is deleted) so that the remaining ranks close the gap.
#[must_use]
pub fn renumber_column<Id>(
    tasks: &[TaskPlacement<Id>],
    column: StatusColumn,
) -> Vec<TaskUpdate<Id>>
where
    Id: Clone + Eq,
{
    let members = column_members(tasks, column, None);
    let mut updates = Vec::with_capacity(members.len());
    push_renumbered(&mut updates, &members, column);
    updates
}

/// Returns the ids in `column`, ascending by rank, optionally skipping one id.
fn column_members<'a, Id>(
    tasks: &'a [TaskPlacement<Id>],
    column: StatusColumn,
    excluded: Option<&Id>,
) -> Vec<&'a TaskPlacement<Id>>
where
    Id: Eq,
{
    let mut members: Vec<&TaskPlacement<Id>> = tasks
        .iter()
        .filter(|task| task.status_column == column)
        .filter(|task| excluded.is_none_or(|id| task.id != *id))
        .collect();
    members.sort_by_key(|task| task.column_order);
    members
}

fn insert_clamped<'a, Id>(
    list: &mut Vec<&'a TaskPlacement<Id>>,
    moving_task: &'a TaskPlacement<Id>,
    target_index: i64,
) {
    let position = usize::try_from(target_index.max(0))
        .unwrap_or(usize::MAX)
        .min(list.len());
    list.insert(position, moving_task);
}

fn push_renumbered<Id>(
    updates: &mut Vec<TaskUpdate<Id>>,
    members: &[&TaskPlacement<Id>],
    column: StatusColumn,
) where
    Id: Clone,
{
    updates.extend(
        members
            .iter()
            .zip(0_u32..)
            .map(|(task, rank)| TaskPlacement::new(task.id.clone(), column, rank)),
    );
}

/// Collapses repeated ids, keeping the first position and the last value.
fn dedup_last_wins<Id>(updates: Vec<TaskUpdate<Id>>) -> Vec<TaskUpdate<Id>>
where
    Id: Clone + Eq + Hash,
{
    let mut positions: HashMap<Id, usize> = HashMap::with_capacity(updates.len());
    let mut unique: Vec<TaskUpdate<Id>> = Vec::with_capacity(updates.len());
    for update in updates {
        match positions.entry(update.id.clone()) {
            Entry::Occupied(slot) => {
                if let Some(existing) = unique.get_mut(*slot.get()) {
                    *existing = update;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(update);
            }
        }
    }
    unique
}
