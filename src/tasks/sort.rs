//! Sibling ordering by creation time, due date or priority.

use super::hierarchy::OrganizedTask;
use crate::error::TaskError;
use crate::types::{Priority, Task};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort criterion for task lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Created,
    DueDate,
    Priority,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Created => "created",
            SortMode::DueDate => "due_date",
            SortMode::Priority => "priority",
        }
    }
}

impl FromStr for SortMode {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(SortMode::Created),
            "due_date" | "due-date" | "due" => Ok(SortMode::DueDate),
            "priority" => Ok(SortMode::Priority),
            other => Err(TaskError::invalid_value(
                "sort",
                format!("Invalid sort '{}'. Valid sorts: created, due_date, priority", other),
            )),
        }
    }
}

/// Anything that wraps a task record and can be sorted by its fields.
pub trait AsTask {
    fn as_task(&self) -> &Task;
}

impl AsTask for Task {
    fn as_task(&self) -> &Task {
        self
    }
}

impl AsTask for OrganizedTask {
    fn as_task(&self) -> &Task {
        &self.task
    }
}

/// Rank used by priority sort: high, medium, low, then no priority.
pub fn priority_rank(priority: Option<Priority>) -> u8 {
    match priority {
        Some(Priority::High) => 0,
        Some(Priority::Medium) => 1,
        Some(Priority::Low) => 2,
        None => 3,
    }
}

/// Compare two tasks under `mode`. Equal keys compare equal so a stable sort
/// keeps input order.
pub fn compare(a: &Task, b: &Task, mode: SortMode) -> Ordering {
    match mode {
        // Ids are UUIDv7, so they break same-millisecond ties in creation order.
        SortMode::Created => a
            .created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id)),
        SortMode::DueDate => {
            // Calendar date in UTC only; time-of-day does not participate.
            match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.date_naive().cmp(&y.date_naive()),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
        SortMode::Priority => priority_rank(a.priority).cmp(&priority_rank(b.priority)),
    }
}

/// Return a sorted copy of `items`. The input is left untouched.
pub fn sort_tasks<T: AsTask + Clone>(items: &[T], mode: SortMode) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| compare(a.as_task(), b.as_task(), mode));
    sorted
}

/// Sort the root list and, independently, every subtask list.
pub fn sort_tree(nodes: &[OrganizedTask], mode: SortMode) -> Vec<OrganizedTask> {
    sort_tasks(nodes, mode)
        .into_iter()
        .map(|mut node| {
            node.subtasks = sort_tree(&node.subtasks, mode);
            node
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::hierarchy::organize;
    use crate::tasks::test_support::{at, subtask, task};
    use crate::types::Priority;

    fn ids<T: AsTask>(items: &[T]) -> Vec<&str> {
        items.iter().map(|t| t.as_task().id.as_str()).collect()
    }

    #[test]
    fn created_sorts_ascending() {
        let tasks = vec![
            Task { created_at: 30, ..task("c") },
            Task { created_at: 10, ..task("a") },
            Task { created_at: 20, ..task("b") },
        ];

        assert_eq!(ids(&sort_tasks(&tasks, SortMode::Created)), vec!["a", "b", "c"]);
    }

    #[test]
    fn created_ties_fall_back_to_id() {
        let tasks = vec![
            Task { created_at: 7, ..task("0190-b") },
            Task { created_at: 7, ..task("0190-a") },
            Task { created_at: 3, ..task("0190-c") },
        ];

        assert_eq!(
            ids(&sort_tasks(&tasks, SortMode::Created)),
            vec!["0190-c", "0190-a", "0190-b"]
        );
    }

    #[test]
    fn sort_tree_leaves_input_untouched() {
        let tasks = vec![
            Task { created_at: 2, ..task("b") },
            Task { created_at: 1, ..task("a") },
        ];
        let tree = organize(&tasks);

        let _ = sort_tree(&tree, SortMode::Created);

        assert_eq!(ids(&tree), vec!["b", "a"]);
    }

    #[test]
    fn sorting_does_not_mutate_input() {
        let tasks = vec![
            Task { created_at: 2, ..task("b") },
            Task { created_at: 1, ..task("a") },
        ];

        let _ = sort_tasks(&tasks, SortMode::Created);

        assert_eq!(ids(&tasks), vec!["b", "a"]);
    }

    #[test]
    fn due_date_ignores_time_of_day() {
        let tasks = vec![
            Task { due_date: Some(at("2024-03-02T00:05:00Z")), ..task("later-day-early") },
            Task { due_date: Some(at("2024-03-01T23:55:00Z")), ..task("earlier-day-late") },
        ];

        let sorted = sort_tasks(&tasks, SortMode::DueDate);

        assert_eq!(ids(&sorted), vec!["earlier-day-late", "later-day-early"]);
    }

    #[test]
    fn due_date_same_day_keeps_input_order() {
        let tasks = vec![
            Task { due_date: Some(at("2024-03-01T18:00:00Z")), ..task("evening") },
            Task { due_date: Some(at("2024-03-01T06:00:00Z")), ..task("morning") },
        ];

        assert_eq!(ids(&sort_tasks(&tasks, SortMode::DueDate)), vec!["evening", "morning"]);
    }

    #[test]
    fn due_date_compares_in_utc() {
        // 2024-03-01T22:00-05:00 is 2024-03-02 in UTC.
        let tasks = vec![
            Task { due_date: Some(at("2024-03-01T22:00:00-05:00")), ..task("utc-second") },
            Task { due_date: Some(at("2024-03-01T12:00:00Z")), ..task("utc-first") },
        ];

        assert_eq!(ids(&sort_tasks(&tasks, SortMode::DueDate)), vec!["utc-first", "utc-second"]);
    }

    #[test]
    fn undated_tasks_sort_last_in_input_order() {
        let tasks = vec![
            task("none-1"),
            Task { due_date: Some(at("2024-05-01T00:00:00Z")), ..task("may") },
            task("none-2"),
            Task { due_date: Some(at("2024-01-01T00:00:00Z")), ..task("jan") },
        ];

        assert_eq!(
            ids(&sort_tasks(&tasks, SortMode::DueDate)),
            vec!["jan", "may", "none-1", "none-2"]
        );
    }

    #[test]
    fn priority_orders_high_medium_low_none_stably() {
        let tasks = vec![
            task("none"),
            Task { priority: Some(Priority::Low), ..task("low") },
            Task { priority: Some(Priority::High), ..task("high-1") },
            Task { priority: Some(Priority::Medium), ..task("medium") },
            Task { priority: Some(Priority::High), ..task("high-2") },
        ];

        assert_eq!(
            ids(&sort_tasks(&tasks, SortMode::Priority)),
            vec!["high-1", "high-2", "medium", "low", "none"]
        );
    }

    #[test]
    fn sort_tree_orders_each_level_independently() {
        let tasks = vec![
            Task { created_at: 2, ..task("b") },
            Task { created_at: 1, ..task("a") },
            Task { created_at: 9, ..subtask("a-late", "a") },
            Task { created_at: 5, ..subtask("a-early", "a") },
        ];

        let tree = sort_tree(&organize(&tasks), SortMode::Created);

        assert_eq!(ids(&tree), vec!["a", "b"]);
        assert_eq!(ids(&tree[0].subtasks), vec!["a-early", "a-late"]);
    }

    #[test]
    fn parses_sort_aliases() {
        assert_eq!("due-date".parse::<SortMode>().unwrap(), SortMode::DueDate);
        assert_eq!("Priority".parse::<SortMode>().unwrap(), SortMode::Priority);
        assert!("alphabetical".parse::<SortMode>().is_err());
    }
}
