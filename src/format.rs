//! Output formatting for task views, as markdown or JSON.

use crate::tasks::{TaskCounts, TaskView, flatten};
use crate::types::{Task, TaskStatus};
use anyhow::Result;
use std::str::FromStr;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    #[default]
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = crate::error::TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(crate::error::TaskError::invalid_value(
                "format",
                format!("Invalid format '{}'. Valid formats: markdown, json", other),
            )),
        }
    }
}

fn status_heading(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::InProgress => "In Progress",
        TaskStatus::Pending => "Pending",
        TaskStatus::Completed => "Completed",
    }
}

fn checkbox(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Completed => "[x]",
    }
}

/// One list line for a task, without indentation.
pub fn format_task_line(task: &Task) -> String {
    let mut line = format!("{} {} `{}`", checkbox(task.status), task.title, task.id);

    if let Some(priority) = task.priority {
        line.push_str(&format!(" !{}", priority));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!(" (due {})", due.format("%Y-%m-%d")));
    }
    if let Some(recurring) = task.recurring.filter(|r| r.enabled) {
        line.push_str(&format!(" ↻{}", recurring.frequency.as_str()));
    }

    line
}

/// Counts line used as the list header.
pub fn format_counts(counts: &TaskCounts) -> String {
    format!(
        "all: {} · pending: {} · in progress: {} · completed: {}",
        counts.all, counts.pending, counts.in_progress, counts.completed
    )
}

/// Grouped view as markdown, subtasks indented under their parent.
pub fn format_view_markdown(view: &TaskView) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Tasks ({})\n", format_counts(&view.counts)));

    if view.groups.is_empty() {
        md.push_str("\nNo tasks\n");
        return md;
    }

    for group in &view.groups {
        md.push_str(&format!("\n## {}\n", status_heading(group.status)));
        for (depth, task) in flatten(&group.tasks) {
            md.push_str(&"  ".repeat(depth));
            md.push_str("- ");
            md.push_str(&format_task_line(task));
            md.push('\n');
        }
    }

    md
}

/// Single task with all fields, as markdown.
pub fn format_task_markdown(task: &Task) -> String {
    let mut md = String::new();

    md.push_str(&format!("## Task: {}\n", task.title));
    md.push_str(&format!("- **id**: `{}`\n", task.id));
    md.push_str(&format!("- **status**: {}\n", task.status));

    if let Some(priority) = task.priority {
        md.push_str(&format!("- **priority**: {}\n", priority));
    }
    if let Some(due) = task.due_date {
        md.push_str(&format!("- **due**: {}\n", due.format("%Y-%m-%d")));
    }
    if let Some(ref parent_id) = task.parent_id {
        md.push_str(&format!("- **parent_id**: `{}`\n", parent_id));
    }
    if let Some(recurring) = task.recurring.filter(|r| r.enabled) {
        md.push_str(&format!("- **repeats**: {}\n", recurring.frequency.as_str()));
    }
    if let Some(ref desc) = task.description {
        md.push_str("\n### Description\n");
        md.push_str(desc);
        md.push('\n');
    }

    md
}

/// Dashboard card: up to a handful of active tasks.
pub fn format_summary_markdown(tasks: &[&Task], counts: &TaskCounts) -> String {
    let mut md = String::from("# Tasks\n");
    if tasks.is_empty() {
        md.push_str("\nNo active tasks\n");
    } else {
        md.push('\n');
        for task in tasks {
            md.push_str("- ");
            md.push_str(&format_task_line(task));
            md.push('\n');
        }
    }
    md.push_str(&format!("\n{}\n", format_counts(counts)));
    md
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
