//! Non-interactive command execution. Each handler loads the store,
//! applies one mutation through the same operations the TUI uses, and
//! saves if anything changed.

use std::path::Path;

use crate::cli::commands::{Cli, Commands};
use crate::cli::output::{self, ListFilter};
use crate::io::store_io::{self, StoreError};
use crate::io::config_io;
use crate::model::store::TaskStore;
use crate::model::task::{Priority, SortMode};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no task with ID {0}")]
    NotFound(u64),
    #[error("unknown sort mode '{0}' (expected default, priority, or alphabetical)")]
    BadSortMode(String),
    #[error("task text cannot be empty")]
    EmptyText,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config = config_io::load_config();
    let path = store_io::data_path(&config);
    let mut store = TaskStore::load(&path);

    let Some(command) = cli.command else {
        return Ok(());
    };

    match command {
        Commands::Add { text, priority } => {
            if text.trim().is_empty() {
                return Err(CliError::EmptyText);
            }
            let priority = match priority.as_deref() {
                Some(name) => Priority::parse(name).unwrap_or_else(|| {
                    eprintln!(
                        "warning: unknown priority '{}', using {}",
                        name,
                        config.default_priority.as_str()
                    );
                    config.default_priority
                }),
                None => config.default_priority,
            };
            let id = store.next_id;
            store.add(&text, priority);
            persist(&mut store, &path)?;
            println!("Added task [{}]: {}", id, text.trim());
        }

        Commands::List { filter } => {
            let filter = match filter.as_deref() {
                Some(name) => ListFilter::parse(name).unwrap_or_else(|| {
                    eprintln!("warning: unknown filter '{}', showing all", name);
                    ListFilter::All
                }),
                None => ListFilter::All,
            };
            if cli.json {
                let selected: Vec<_> = store
                    .tasks
                    .iter()
                    .filter(|t| match filter {
                        ListFilter::All => true,
                        ListFilter::Pending => !t.completed,
                        ListFilter::Completed => t.completed,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&selected)?);
            } else {
                print!("{}", output::format_list(&store.tasks, filter));
            }
        }

        Commands::Complete { id } => {
            let index = store.index_of(id).ok_or(CliError::NotFound(id))?;
            if store.tasks[index].completed {
                println!("Task [{}] is already completed", id);
            } else {
                store.toggle(index);
                persist(&mut store, &path)?;
                println!("Completed task [{}]", id);
            }
        }

        Commands::Delete { id } => {
            if !store.delete_by_id(id) {
                return Err(CliError::NotFound(id));
            }
            persist(&mut store, &path)?;
            println!("Deleted task [{}]", id);
        }

        Commands::Sort { mode } => {
            let mode = SortMode::parse(&mode).ok_or_else(|| CliError::BadSortMode(mode.clone()))?;
            store.set_sort_mode(mode);
            persist(&mut store, &path)?;
            println!("Sort mode set to {}", mode.as_str());
        }

        Commands::Count { filter } => {
            let pending = store.pending_count();
            let completed = store.completed_count();
            // "all_json" filter is the positional spelling of --json
            if cli.json || filter.as_deref() == Some("all_json") {
                println!(
                    "{}",
                    serde_json::json!({
                        "pending": pending,
                        "completed": completed,
                        "total": pending + completed,
                    })
                );
            } else {
                match filter.as_deref() {
                    Some("pending") => println!("{}", pending),
                    Some("completed") => println!("{}", completed),
                    Some("all") | None => {
                        println!("{}", output::format_counts(pending, completed));
                    }
                    Some(other) => {
                        eprintln!("warning: unknown filter '{}', showing all", other);
                        println!("{}", output::format_counts(pending, completed));
                    }
                }
            }
        }
    }
    Ok(())
}

fn persist(store: &mut TaskStore, path: &Path) -> Result<(), StoreError> {
    if store.take_dirty() {
        store.save(path)?;
    }
    Ok(())
}
