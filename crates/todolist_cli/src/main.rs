//! Command-line front end for the to-do list.
//!
//! # Responsibility
//! - Stand in for the presentation layer: turn one user intent into one
//!   store call, then render the resulting list.
//! - Never mutate items directly; every change goes through `TodoStore`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;
use todolist_core::db::open_db;
use todolist_core::{
    core_version, init_logging, LogLevel, PersistStatus, SqliteKeyValueStore, TodoItem, TodoStore,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "todolist", version, about = "Single-list to-do manager")]
struct Cli {
    /// SQLite file holding the list.
    #[arg(long, default_value = "todolist.sqlite3")]
    db: PathBuf,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the list, newest first.
    List,
    /// Add an item at the top of the list.
    Add { title: String },
    /// Flip completion of the item with this id.
    Toggle { id: Uuid },
    /// Delete the items at these zero-based positions.
    Delete {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    /// Move the items at these positions before the item at `--to`.
    Move {
        #[arg(long)]
        to: usize,
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    /// Print the core version.
    Version,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or(LogLevel::default_for_build().as_str());
        init_logging(level, log_dir).context("initialize logging")?;
    }

    if let Command::Version = cli.command {
        println!("todolist_core version={}", core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db).with_context(|| format!("open {}", cli.db.display()))?;
    let mut store = TodoStore::load(SqliteKeyValueStore::new(&conn));

    match cli.command {
        Command::List | Command::Version => {}
        Command::Add { title } => {
            if store.add(title).is_none() {
                eprintln!("title is empty; nothing added");
            }
        }
        Command::Toggle { id } => {
            if !store.toggle(id) {
                eprintln!("no item with id {id}");
            }
        }
        Command::Delete { positions } => {
            let positions: BTreeSet<usize> = positions.into_iter().collect();
            let removed = store.delete(&positions);
            eprintln!("removed {removed} item(s)");
        }
        Command::Move { to, positions } => {
            let positions: BTreeSet<usize> = positions.into_iter().collect();
            if !store.move_items(&positions, to) {
                eprintln!("order unchanged");
            }
        }
    }

    if let PersistStatus::Failed(err) = store.last_persist() {
        eprintln!("warning: list not saved: {err}");
    }
    render(store.items());
    Ok(())
}

fn render(items: &[TodoItem]) {
    for (position, item) in items.iter().enumerate() {
        let mark = if item.is_completed { 'x' } else { ' ' };
        println!("{position:>3} [{mark}] {}  ({})", item.title, item.id);
    }
}
