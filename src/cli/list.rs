//! List subcommand: filter, sort and search options for the grouped view.

use crate::format::OutputFormat;
use crate::tasks::{PriorityFilter, SearchCriteria, SortMode, StatusFilter, ViewOptions};
use clap::Args;

/// Arguments for the list subcommand
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Status filter: all, pending, in_progress or completed
    #[arg(short, long)]
    pub filter: Option<StatusFilter>,

    /// Sort order: created, due_date or priority
    #[arg(short, long)]
    pub sort: Option<SortMode>,

    /// Case-insensitive text to find in titles and descriptions
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Keep completed tasks in search results
    #[arg(long)]
    pub include_done: bool,

    /// Only tasks with these priorities (comma-separated; "none" for unset)
    #[arg(short, long, value_delimiter = ',')]
    pub priority: Vec<PriorityFilter>,

    /// Output format: markdown or json
    #[arg(long, default_value = "markdown")]
    pub format: OutputFormat,
}

impl ListArgs {
    /// Layer the flags over `defaults` (usually the configured view).
    pub fn to_options(&self, defaults: &ViewOptions) -> ViewOptions {
        ViewOptions {
            filter: self.filter.unwrap_or(defaults.filter),
            sort: self.sort.unwrap_or(defaults.sort),
            search: SearchCriteria {
                search_text: self.search.clone().unwrap_or_default(),
                include_done: self.include_done,
                priorities: self.priority.clone(),
            },
        }
    }
}
