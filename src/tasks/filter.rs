//! Status filter and free-text/priority search over the flat task list.

use crate::error::TaskError;
use crate::types::{Priority, Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which statuses the list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<TaskStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| {
                TaskError::invalid_value(
                    "filter",
                    format!(
                        "Invalid filter '{}'. Valid filters: all, pending, in_progress, completed",
                        s
                    ),
                )
            })
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = TaskError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

/// One entry of the priority search set; `None` selects tasks without a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityFilter(pub Option<Priority>);

impl FromStr for PriorityFilter {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            return Ok(PriorityFilter(None));
        }
        s.parse::<Priority>().map(|p| PriorityFilter(Some(p)))
    }
}

/// Criteria entered in the search dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub include_done: bool,
    #[serde(default)]
    pub priorities: Vec<PriorityFilter>,
}

impl SearchCriteria {
    /// Search narrows the list only when at least one field is set.
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty() || self.include_done || !self.priorities.is_empty()
    }

    /// Whether `task` passes these criteria. Inactive criteria pass everything.
    pub fn matches(&self, task: &Task) -> bool {
        if !self.is_active() {
            return true;
        }

        if !self.search_text.is_empty() {
            let needle = self.search_text.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }

        if !self.priorities.is_empty()
            && !self.priorities.iter().any(|p| p.0 == task.priority)
        {
            return false;
        }

        if !self.include_done && task.status == TaskStatus::Completed {
            return false;
        }

        true
    }
}

/// Apply search criteria, then the status filter, preserving input order.
pub fn filter_tasks(tasks: &[Task], filter: StatusFilter, search: &SearchCriteria) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| search.matches(t))
        .filter(|t| filter.matches(t.status))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::test_support::task;

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn text(s: &str) -> SearchCriteria {
        SearchCriteria {
            search_text: s.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            Task { title: "Buy MILK".into(), ..task("title-match") },
            Task {
                title: "Groceries".into(),
                description: Some("eggs, milk, bread".into()),
                ..task("desc-match")
            },
            Task {
                title: "Milk the cows".into(),
                status: TaskStatus::Completed,
                ..task("done-match")
            },
            Task { title: "Walk the dog".into(), ..task("no-match") },
        ]
    }

    #[test]
    fn inactive_search_is_a_no_op() {
        let tasks = sample();
        let criteria = SearchCriteria::default();

        assert!(!criteria.is_active());
        assert_eq!(filter_tasks(&tasks, StatusFilter::All, &criteria).len(), tasks.len());
    }

    #[test]
    fn text_matches_title_or_description_excluding_done() {
        let found = filter_tasks(&sample(), StatusFilter::All, &text("milk"));

        assert_eq!(ids(&found), vec!["title-match", "desc-match"]);
    }

    #[test]
    fn include_done_keeps_completed_matches() {
        let criteria = SearchCriteria {
            include_done: true,
            ..text("milk")
        };

        let found = filter_tasks(&sample(), StatusFilter::All, &criteria);

        assert_eq!(ids(&found), vec!["title-match", "desc-match", "done-match"]);
    }

    #[test]
    fn include_done_alone_activates_search_without_narrowing() {
        let criteria = SearchCriteria {
            include_done: true,
            ..Default::default()
        };

        assert!(criteria.is_active());
        assert_eq!(filter_tasks(&sample(), StatusFilter::All, &criteria).len(), 4);
    }

    #[test]
    fn priority_set_is_an_or_filter_including_none() {
        let tasks = vec![
            Task { priority: Some(Priority::High), ..task("high") },
            Task { priority: Some(Priority::Low), ..task("low") },
            task("unset"),
        ];
        let criteria = SearchCriteria {
            priorities: vec![PriorityFilter(Some(Priority::High)), PriorityFilter(None)],
            ..Default::default()
        };

        let found = filter_tasks(&tasks, StatusFilter::All, &criteria);

        assert_eq!(ids(&found), vec!["high", "unset"]);
    }

    #[test]
    fn status_filter_applies_after_search() {
        let criteria = SearchCriteria {
            include_done: true,
            ..text("milk")
        };

        let found = filter_tasks(
            &sample(),
            StatusFilter::Only(TaskStatus::Completed),
            &criteria,
        );

        assert_eq!(ids(&found), vec!["done-match"]);
    }

    #[test]
    fn specific_status_filter_matches_exactly() {
        let tasks = vec![
            Task { status: TaskStatus::InProgress, ..task("doing") },
            task("todo"),
        ];

        let found = filter_tasks(
            &tasks,
            StatusFilter::Only(TaskStatus::Pending),
            &SearchCriteria::default(),
        );

        assert_eq!(ids(&found), vec!["todo"]);
    }

    #[test]
    fn parses_filters() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "completed".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(TaskStatus::Completed)
        );
        assert_eq!("none".parse::<PriorityFilter>().unwrap(), PriorityFilter(None));
        assert!("urgent".parse::<PriorityFilter>().is_err());
    }

    #[test]
    fn status_filter_serializes_as_plain_string() {
        let json = serde_json::to_string(&StatusFilter::Only(TaskStatus::InProgress)).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let back: StatusFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(back, StatusFilter::All);
    }
}
