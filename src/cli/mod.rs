//! CLI command definitions for taskflow
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod list;
pub mod task;

use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use list::ListArgs;
use std::path::PathBuf;
use task::{AddArgs, EditArgs, StatusArgs, TaskIdArgs};

/// Hierarchical task manager with status propagation and recurring tasks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Act as this user (overrides config)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a task, or a subtask with --parent
    Add(AddArgs),

    /// Edit title, description, due date, priority or recurrence
    Edit(EditArgs),

    /// Set a task's status, propagating to parent and subtasks
    Status(StatusArgs),

    /// Advance a task: pending → in_progress → completed → pending
    Cycle(TaskIdArgs),

    /// Permanently delete a task
    Delete(TaskIdArgs),

    /// Show tasks grouped by status
    List(ListArgs),

    /// Show the most relevant active tasks and status counts
    Summary {
        /// Number of tasks to show
        #[arg(short = 'n', long, default_value_t = 3)]
        limit: usize,

        /// Output format: markdown or json
        #[arg(long, default_value = "markdown")]
        format: OutputFormat,
    },

    /// Show one task in full
    Show(TaskIdArgs),
}
