//! Status buckets and counts for the list view.

use super::hierarchy::OrganizedTask;
use crate::types::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Root tasks sharing one status, with their subtasks nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskGroup {
    pub status: TaskStatus,
    pub tasks: Vec<OrganizedTask>,
}

/// Per-status totals over the whole task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub all: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }
}

/// Bucket roots by their own status in display order, omitting empty buckets.
pub fn group_by_status(roots: Vec<OrganizedTask>) -> Vec<TaskGroup> {
    let mut buckets: Vec<TaskGroup> = TaskStatus::DISPLAY_ORDER
        .iter()
        .map(|&status| TaskGroup {
            status,
            tasks: Vec::new(),
        })
        .collect();

    for root in roots {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.status == root.task.status) {
            bucket.tasks.push(root);
        }
    }

    buckets.retain(|b| !b.tasks.is_empty());
    buckets
}

/// Count every task by status, regardless of any active filter.
pub fn count_by_status(tasks: &[Task]) -> TaskCounts {
    tasks.iter().fold(TaskCounts::default(), |mut counts, task| {
        counts.all += 1;
        match task.status {
            TaskStatus::Pending => counts.pending += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Completed => counts.completed += 1,
        }
        counts
    })
}

/// Active tasks for the dashboard card: in-progress first, then newest first.
pub fn active_summary(tasks: &[Task], limit: usize) -> Vec<&Task> {
    let mut active: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .collect();
    active.sort_by(|a, b| {
        let a_doing = a.status == TaskStatus::InProgress;
        let b_doing = b.status == TaskStatus::InProgress;
        b_doing
            .cmp(&a_doing)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    active.truncate(limit);
    active
}
