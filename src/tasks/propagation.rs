//! Status change rules: parent/child synchronisation and recurring instances.
//!
//! Planning is pure: [`plan_status_change`] reads a snapshot of the owner's
//! tasks and returns the writes to perform, in order. Applying them is the
//! board's job, one independent store call per mutation.

use crate::error::{TaskError, TaskResult};
use crate::types::{Frequency, NewTask, Task, TaskStatus};
use chrono::{DateTime, Days, Months, Utc};

/// A single write produced by a status change.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetStatus { task_id: String, status: TaskStatus },
    Insert(NewTask),
}

impl Mutation {
    fn set(task_id: &str, status: TaskStatus) -> Self {
        Mutation::SetStatus {
            task_id: task_id.to_string(),
            status,
        }
    }
}

/// Plan the writes for moving `task_id` to `new_status`.
///
/// Order: the task itself, its direct children, its parent (if affected),
/// then the next recurring instance (if any).
pub fn plan_status_change(
    tasks: &[Task],
    task_id: &str,
    new_status: TaskStatus,
) -> TaskResult<Vec<Mutation>> {
    let target = tasks
        .iter()
        .find(|t| t.id == task_id)
        .ok_or_else(|| TaskError::task_not_found(task_id))?;

    let mut plan = vec![Mutation::set(&target.id, new_status)];

    // Cascade down to every direct child, reopening included.
    for child in tasks
        .iter()
        .filter(|t| t.parent_id.as_deref() == Some(target.id.as_str()) && t.id != target.id)
    {
        plan.push(Mutation::set(&child.id, new_status));
    }

    // Parent is only touched when it is present in the snapshot.
    if let Some(parent) = target
        .parent_id
        .as_deref()
        .and_then(|pid| tasks.iter().find(|t| t.id == pid && t.id != target.id))
    {
        match new_status {
            TaskStatus::Pending | TaskStatus::InProgress => {
                plan.push(Mutation::set(&parent.id, new_status));
            }
            TaskStatus::Completed => {
                let all_done = tasks
                    .iter()
                    .filter(|t| t.parent_id.as_deref() == Some(parent.id.as_str()))
                    .all(|t| t.id == target.id || t.status == TaskStatus::Completed);
                if all_done {
                    plan.push(Mutation::set(&parent.id, TaskStatus::Completed));
                }
            }
        }
    }

    if new_status == TaskStatus::Completed && target.is_recurring() {
        plan.push(Mutation::Insert(next_instance(target)));
    }

    Ok(plan)
}

/// Advance a due date by one recurrence period. Monthly steps clamp to the
/// last day of a shorter month.
pub fn next_due_date(due: DateTime<Utc>, frequency: Frequency) -> DateTime<Utc> {
    let next = match frequency {
        Frequency::Daily => due.checked_add_days(Days::new(1)),
        Frequency::Weekly => due.checked_add_days(Days::new(7)),
        Frequency::Monthly => due.checked_add_months(Months::new(1)),
    };
    next.unwrap_or(due)
}

/// Fresh pending root task continuing a completed recurring task.
fn next_instance(completed: &Task) -> NewTask {
    let due_date = match (completed.due_date, completed.recurring) {
        (Some(due), Some(recurrence)) => Some(next_due_date(due, recurrence.frequency)),
        _ => None,
    };

    NewTask {
        user_id: completed.user_id.clone(),
        parent_id: None,
        title: completed.title.clone(),
        description: completed.description.clone(),
        status: TaskStatus::Pending,
        due_date,
        priority: completed.priority,
        recurring: completed.recurring,
        has_subtasks: false,
        order: 0,
        depth: 0,
    }
}
