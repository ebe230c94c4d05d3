//! Core types for taskflow.

use crate::error::{TaskError, TaskResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Display order for grouped views.
    pub const DISPLAY_ORDER: [TaskStatus; 3] = [
        TaskStatus::InProgress,
        TaskStatus::Pending,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Next status in the tap cycle: pending → in_progress → completed → pending.
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" | "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(TaskError::invalid_value(
                "status",
                format!(
                    "Invalid status '{}'. Valid statuses: pending, in_progress, completed",
                    other
                ),
            )),
        }
    }
}

/// Task priority. Absence of a priority is modelled as `Option<Priority>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(TaskError::invalid_value(
                "priority",
                format!("Invalid priority '{}'. Valid priorities: high, medium, low", other),
            )),
        }
    }
}

/// How often a recurring task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(TaskError::invalid_value(
                "frequency",
                format!("Invalid frequency '{}'. Valid frequencies: daily, weekly, monthly", other),
            )),
        }
    }
}

/// Recurrence configuration stored alongside a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub enabled: bool,
    pub frequency: Frequency,
}

impl Recurrence {
    pub fn every(frequency: Frequency) -> Self {
        Self {
            enabled: true,
            frequency,
        }
    }
}

/// A task record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub recurring: Option<Recurrence>,
    pub has_subtasks: bool,
    pub order: i32,
    pub depth: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Task {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether completing this task spawns a fresh instance.
    pub fn is_recurring(&self) -> bool {
        self.recurring.is_some_and(|r| r.enabled)
    }
}

/// Fields for inserting a task. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub user_id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub recurring: Option<Recurrence>,
    pub has_subtasks: bool,
    pub order: i32,
    pub depth: i32,
}

/// Partial update of a task record.
///
/// Outer `None` leaves a field unchanged; `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub priority: Option<Option<Priority>>,
    pub recurring: Option<Option<Recurrence>>,
    pub has_subtasks: Option<bool>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// User-editable fields, as entered in the create/edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub recurring: Option<Recurrence>,
}

impl TaskInput {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Reject input the form would not submit.
    pub fn validate(&self) -> TaskResult<()> {
        if self.title.trim().is_empty() {
            return Err(TaskError::missing_field("title"));
        }
        Ok(())
    }

    /// Empty descriptions are stored as absent.
    pub fn description(&self) -> Option<String> {
        if self.description.is_empty() {
            None
        } else {
            Some(self.description.clone())
        }
    }
}

/// Parse a due date given either as `YYYY-MM-DD` (midnight UTC) or RFC 3339.
pub fn parse_due_date(s: &str) -> TaskResult<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TaskError::invalid_value("due_date", format!("Invalid due date '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn status_cycle_wraps_around() {
        assert_eq!(TaskStatus::Pending.next(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::InProgress.next(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.next(), TaskStatus::Pending);
    }

    #[test]
    fn status_parses_both_spellings() {
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("In-Progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn recurrence_round_trips_through_json() {
        let json = serde_json::to_string(&Recurrence::every(Frequency::Weekly)).unwrap();
        assert_eq!(json, r#"{"enabled":true,"frequency":"weekly"}"#);
    }

    #[test]
    fn validate_rejects_blank_titles() {
        assert!(TaskInput::titled("   ").validate().is_err());
        assert!(TaskInput::titled("Buy milk").validate().is_ok());
    }

    #[test]
    fn parse_due_date_accepts_plain_dates() {
        let due = parse_due_date("2024-01-01").unwrap();
        assert_eq!((due.year(), due.month(), due.day()), (2024, 1, 1));
        assert_eq!(due.hour(), 0);
    }

    #[test]
    fn parse_due_date_normalizes_offsets_to_utc() {
        let due = parse_due_date("2024-01-01T23:30:00-05:00").unwrap();
        assert_eq!((due.month(), due.day(), due.hour()), (1, 2, 4));
    }

    #[test]
    fn parse_due_date_rejects_garbage() {
        let err = parse_due_date("next tuesday").unwrap_err();
        assert_eq!(err.field.as_deref(), Some("due_date"));
    }

}
