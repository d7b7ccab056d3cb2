use clap::{Parser, Subcommand};

/// Command-line interface. Run with no subcommand to open the
/// interactive terminal UI.
#[derive(Debug, Parser)]
#[command(name = "tasks", version, about = "A small task tracker with a terminal UI")]
pub struct Cli {
    /// Emit machine-readable JSON where supported
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task text
        text: String,
        /// Priority: high, normal, or low
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// List tasks
    List {
        /// Show only "pending" or "completed" tasks
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Mark a task as completed by ID
    Complete {
        /// Task ID as shown by `list`
        id: u64,
    },
    /// Delete a task by ID
    Delete {
        /// Task ID as shown by `list`
        id: u64,
    },
    /// Set the sort mode: default, priority, or alphabetical
    Sort { mode: String },
    /// Show pending/completed counts
    Count {
        /// "pending" or "completed" for a single number, "all_json" for
        /// the JSON shape
        filter: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_priority() {
        let cli = Cli::parse_from(["tasks", "add", "buy milk", "--priority", "high"]);
        match cli.command {
            Some(Commands::Add { text, priority }) => {
                assert_eq!(text, "buy milk");
                assert_eq!(priority.as_deref(), Some("high"));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::parse_from(["tasks"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::parse_from(["tasks", "list", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
