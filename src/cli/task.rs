//! Task editing subcommands: add, edit, status, cycle, delete, show.

use crate::error::TaskResult;
use crate::types::{Frequency, Priority, Recurrence, Task, TaskInput, TaskStatus, parse_due_date};
use clap::Args;

/// Arguments naming a single task
#[derive(Args, Debug)]
pub struct TaskIdArgs {
    /// Task ID
    pub id: String,
}

/// Arguments for the add subcommand
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task title
    pub title: String,

    /// Longer description
    #[arg(short = 'm', long)]
    pub description: Option<String>,

    /// Due date, YYYY-MM-DD or RFC 3339
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,

    /// Priority: high, medium or low
    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// Repeat on completion: daily, weekly or monthly
    #[arg(short, long, value_name = "FREQUENCY")]
    pub repeat: Option<Frequency>,

    /// Create as a subtask of this task
    #[arg(long, value_name = "ID")]
    pub parent: Option<String>,
}

impl AddArgs {
    pub fn to_input(&self) -> TaskResult<TaskInput> {
        Ok(TaskInput {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            due_date: self.due.as_deref().map(parse_due_date).transpose()?,
            priority: self.priority,
            recurring: self.repeat.map(Recurrence::every),
        })
    }
}

/// Arguments for the edit subcommand. Omitted fields keep their value.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Task ID
    pub id: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description; an empty string clears it
    #[arg(short = 'm', long)]
    pub description: Option<String>,

    /// New due date, YYYY-MM-DD or RFC 3339
    #[arg(long, value_name = "DATE", conflicts_with = "clear_due")]
    pub due: Option<String>,

    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,

    /// New priority: high, medium or low
    #[arg(short, long, conflicts_with = "clear_priority")]
    pub priority: Option<Priority>,

    /// Remove the priority
    #[arg(long)]
    pub clear_priority: bool,

    /// Repeat on completion: daily, weekly or monthly
    #[arg(short, long, value_name = "FREQUENCY", conflicts_with = "no_repeat")]
    pub repeat: Option<Frequency>,

    /// Stop repeating
    #[arg(long)]
    pub no_repeat: bool,
}

impl EditArgs {
    /// Merge the flags over the task's current values.
    pub fn to_input(&self, current: &Task) -> TaskResult<TaskInput> {
        let due_date = if self.clear_due {
            None
        } else {
            match self.due.as_deref() {
                Some(due) => Some(parse_due_date(due)?),
                None => current.due_date,
            }
        };

        let priority = if self.clear_priority {
            None
        } else {
            self.priority.or(current.priority)
        };

        let recurring = if self.no_repeat {
            None
        } else {
            self.repeat.map(Recurrence::every).or(current.recurring)
        };

        Ok(TaskInput {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .clone()
                .or_else(|| current.description.clone())
                .unwrap_or_default(),
            due_date,
            priority,
            recurring,
        })
    }
}

/// Arguments for the status subcommand
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Task ID
    pub id: String,

    /// New status: pending, in_progress or completed
    pub status: TaskStatus,
}
