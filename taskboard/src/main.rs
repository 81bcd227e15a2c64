//! Taskboard — kanban board client.
//!
//! Drives the board store against a running data service. Configuration
//! via CLI flags, environment variables, or config file
//! (`~/.config/taskboard/config.toml`).
//!
//! ```bash
//! # Print the board
//! cargo run --bin taskboard -- show
//!
//! # Create a task with an initial comment
//! cargo run --bin taskboard -- add "Write spec" --comment "due friday"
//!
//! # Move a task to another column
//! cargo run --bin taskboard -- move task-0189... done
//!
//! # Point at a non-default server
//! TASKBOARD_SERVER_URL=http://boards.internal:5000 cargo run --bin taskboard -- show
//! ```

use std::process::ExitCode;

use clap::Parser;

use taskboard::board::{BoardStore, NewTask, TaskEdit};
use taskboard::config::{CliArgs, ClientConfig, Command};
use taskboard::remote::http::HttpRemote;
use taskboard_proto::{ColumnId, TaskId};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliArgs::parse();

    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Command::Show);
    match run(&config, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads the board, runs one operation, and prints the result.
async fn run(config: &ClientConfig, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let remote = HttpRemote::new(&config.server_url);
    let mut store = BoardStore::new(remote, ColumnId::new(config.default_column.clone()));
    store.load().await?;

    match command {
        Command::Show => {}
        Command::Add {
            content,
            assigned_to,
            due,
            comment,
        } => {
            let id = store
                .create_task(NewTask {
                    content,
                    assigned_to,
                    due_date: due,
                    initial_comment: comment,
                })
                .await?;
            println!("created {id}");
        }
        Command::Edit {
            id,
            content,
            assigned_to,
            due,
        } => {
            store
                .update_task(TaskEdit {
                    id: TaskId::new(id),
                    content,
                    assigned_to,
                    due_date: due,
                })
                .await?;
        }
        Command::Rm { id } => {
            store.delete_task(&TaskId::new(id)).await?;
        }
        Command::Comment { id, text } => {
            store.add_comment(&TaskId::new(id), &text).await?;
        }
        Command::Move { id, column } => {
            // The CLI has no hover phase; a move is drag-start then drop.
            store.drag_start(TaskId::new(id));
            let outcome = store.drop_on(ColumnId::new(column)).await?;
            println!("{outcome:?}");
        }
    }

    print_board(&store);
    Ok(())
}

/// Prints the board column by column in render order.
fn print_board<R: taskboard::remote::RemoteService>(store: &BoardStore<R>) {
    let board = store.board();
    for column_id in &board.column_order {
        let Some(column) = board.columns.get(column_id) else {
            continue;
        };
        println!("{} ({})", column.title, column.task_ids.len());
        for task_id in &column.task_ids {
            let Some(task) = board.tasks.get(task_id) else {
                continue;
            };
            let assignee = task
                .assigned_to
                .as_deref()
                .map(|a| format!(" @{a}"))
                .unwrap_or_default();
            let due = task
                .due_date
                .map(|d| format!(" due {d}"))
                .unwrap_or_default();
            println!("  [{}] {}{assignee}{due}", task.id, task.content);
            for comment in &task.comments {
                println!("      - {}", comment.text);
            }
        }
    }
}
