use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::task::Priority;

/// User configuration (~/.taskman/config.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding tasks.json
    #[serde(default = "default_data_directory")]
    pub data_directory: PathBuf,
    /// Priority given to new tasks when none is specified
    #[serde(default = "default_task_priority")]
    pub default_priority: Priority,
    /// Whether the mood animation starts enabled in the TUI
    #[serde(default = "default_mood_animation")]
    pub mood_animation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_directory: default_data_directory(),
            default_priority: Priority::Normal,
            mood_animation: true,
        }
    }
}

fn default_data_directory() -> PathBuf {
    home_dir().join(".taskman")
}

fn default_task_priority() -> Priority {
    Priority::Normal
}

fn default_mood_animation() -> bool {
    true
}

/// Best-effort home directory (HOME, falling back to cwd)
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
