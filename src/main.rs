//! taskflow command-line front end
//!
//! Opens the configured task database, loads the signed-in user's tasks and
//! runs a single board operation per invocation.

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use taskflow::board::TaskBoard;
use taskflow::cli::list::ListArgs;
use taskflow::cli::task::{AddArgs, EditArgs};
use taskflow::cli::{Cli, Command};
use taskflow::config::Config;
use taskflow::db::Database;
use taskflow::error::TaskError;
use taskflow::format::{
    OutputFormat, format_summary_markdown, format_task_markdown, format_view_markdown, to_json,
};
use taskflow::logging::{self, LogTarget};
use taskflow::session::StaticSession;
use tracing::debug;

type Board = TaskBoard<Database, StaticSession>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut config = Config::load_or_default(cli.config.as_deref())?;

    // Override from CLI arguments
    if let Some(db_path) = &cli.database {
        config.store.db_path = db_path.clone();
    }
    if let Some(user) = &cli.user {
        config.session.user_id = Some(user.clone());
    }

    config.ensure_db_dir()?;
    debug!(db_path = %config.store.db_path.display(), "Opening database");
    let db = Database::open(&config.store.db_path)?;

    let session = StaticSession::from_option(config.session.user_id.clone());
    let mut board = TaskBoard::new(db, session).with_options(config.view.to_options());
    board.refresh().await?;

    match cli.command {
        Command::Add(args) => run_add(&mut board, args).await?,
        Command::Edit(args) => run_edit(&mut board, args).await?,
        Command::Status(args) => {
            board.change_status(&args.id, args.status).await?;
            print_task(&board, &args.id)?;
        }
        Command::Cycle(args) => {
            let status = board.cycle_status(&args.id).await?;
            println!("{} → {}", args.id, status);
        }
        Command::Delete(args) => {
            board.delete_task(&args.id).await?;
            println!("Deleted {}", args.id);
        }
        Command::List(args) => run_list(&mut board, args)?,
        Command::Summary { limit, format } => {
            let counts = board.counts();
            let tasks = board.summary(limit);
            match format {
                OutputFormat::Markdown => print!("{}", format_summary_markdown(&tasks, &counts)),
                OutputFormat::Json => {
                    println!("{}", to_json(&json!({ "tasks": tasks, "counts": counts }))?)
                }
            }
        }
        Command::Show(args) => print_task(&board, &args.id)?,
    }

    Ok(())
}

async fn run_add(board: &mut Board, args: AddArgs) -> Result<()> {
    let input = args.to_input()?;
    let created = match &args.parent {
        Some(parent_id) => board.add_subtask(parent_id, input).await?,
        None => board.create_task(input).await?,
    };
    print!("{}", format_task_markdown(&created));
    Ok(())
}

async fn run_edit(board: &mut Board, args: EditArgs) -> Result<()> {
    let current = board
        .get(&args.id)
        .ok_or_else(|| TaskError::task_not_found(&args.id))?;
    let input = args.to_input(current)?;
    board.edit_task(&args.id, input).await?;
    print_task(board, &args.id)
}

fn run_list(board: &mut Board, args: ListArgs) -> Result<()> {
    let options = args.to_options(board.options());
    board.set_filter(options.filter);
    board.set_sort(options.sort);
    board.set_search(options.search);

    let view = board.view();
    match args.format {
        OutputFormat::Markdown => print!("{}", format_view_markdown(&view)),
        OutputFormat::Json => println!("{}", to_json(&view)?),
    }
    Ok(())
}

fn print_task(board: &Board, task_id: &str) -> Result<()> {
    let task = board
        .get(task_id)
        .ok_or_else(|| TaskError::task_not_found(task_id))?;
    print!("{}", format_task_markdown(task));
    Ok(())
}
