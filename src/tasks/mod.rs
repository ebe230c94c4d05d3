//! Derived task views and status propagation rules.
//!
//! Everything here is a pure function of the flat task list:
//! raw tasks → filter/search → hierarchy → sort → grouping, with counts taken
//! from the unfiltered list.

pub mod filter;
pub mod group;
pub mod hierarchy;
pub mod propagation;
pub mod sort;

pub use filter::{PriorityFilter, SearchCriteria, StatusFilter, filter_tasks};
pub use group::{TaskCounts, TaskGroup, active_summary, count_by_status, group_by_status};
pub use hierarchy::{OrganizedTask, flatten, organize};
pub use propagation::{Mutation, next_due_date, plan_status_change};
pub use sort::{SortMode, sort_tasks, sort_tree};

use crate::types::Task;
use serde::{Deserialize, Serialize};

/// View settings selected in the list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    #[serde(default)]
    pub filter: StatusFilter,
    #[serde(default)]
    pub sort: SortMode,
    #[serde(default)]
    pub search: SearchCriteria,
}

/// Display-ready projection of the task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    pub groups: Vec<TaskGroup>,
    pub counts: TaskCounts,
}

/// Project the flat task list into grouped, sorted trees.
pub fn project(tasks: &[Task], options: &ViewOptions) -> TaskView {
    let visible = filter_tasks(tasks, options.filter, &options.search);
    let roots = sort_tree(&organize(&visible), options.sort);
    TaskView {
        groups: group_by_status(roots),
        counts: count_by_status(tasks),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{subtask, task};
    use super::*;
    use crate::types::TaskStatus;

    fn sample() -> Vec<Task> {
        vec![
            Task { title: "Buy milk".into(), created_at: 3, ..task("milk") },
            Task {
                status: TaskStatus::InProgress,
                created_at: 1,
                ..task("report")
            },
            Task { created_at: 2, ..subtask("report-draft", "report") },
            Task {
                status: TaskStatus::Completed,
                created_at: 4,
                ..task("taxes")
            },
        ]
    }

    #[test]
    fn default_view_groups_everything() {
        let view = project(&sample(), &ViewOptions::default());

        let statuses: Vec<TaskStatus> = view.groups.iter().map(|g| g.status).collect();
        assert_eq!(
            statuses,
            vec![TaskStatus::InProgress, TaskStatus::Pending, TaskStatus::Completed]
        );
        assert_eq!(view.groups[0].tasks[0].subtasks[0].task.id, "report-draft");
    }

    #[test]
    fn counts_ignore_filter_and_search() {
        let tasks = sample();
        let unfiltered = project(&tasks, &ViewOptions::default()).counts;

        let narrowed = project(
            &tasks,
            &ViewOptions {
                filter: StatusFilter::Only(TaskStatus::Completed),
                search: SearchCriteria {
                    search_text: "nothing matches this".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
        );

        assert!(narrowed.groups.is_empty());
        assert_eq!(narrowed.counts, unfiltered);
        assert_eq!(unfiltered.all, 4);
    }

    #[test]
    fn filtered_out_parent_leaves_orphan_root() {
        let view = project(
            &sample(),
            &ViewOptions {
                filter: StatusFilter::Only(TaskStatus::Pending),
                ..Default::default()
            },
        );

        assert_eq!(view.groups.len(), 1);
        let ids: Vec<&str> = view.groups[0].tasks.iter().map(|n| n.task.id.as_str()).collect();
        assert_eq!(ids, vec!["report-draft", "milk"]);
    }

    #[test]
    fn search_narrows_before_grouping() {
        let view = project(
            &sample(),
            &ViewOptions {
                search: SearchCriteria {
                    search_text: "MILK".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
        );

        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].tasks[0].task.id, "milk");
    }
}
