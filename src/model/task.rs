use chrono::Local;
use serde::{Deserialize, Serialize};

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Priority {
    /// Sort rank: high tasks first
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Normal => 1,
            Priority::Low => 2,
        }
    }

    /// Cycle order used while composing a new task (Tab key)
    pub fn cycle_input(self) -> Priority {
        match self {
            Priority::Normal => Priority::High,
            Priority::High => Priority::Low,
            Priority::Low => Priority::Normal,
        }
    }

    /// Cycle order used on an existing task (Tab in the list)
    pub fn cycle_task(self) -> Priority {
        match self {
            Priority::Low => Priority::Normal,
            Priority::Normal => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }

    /// Parse a priority name (used by the CLI)
    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "high" => Some(Priority::High),
            "normal" => Some(Priority::Normal),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// How the task list is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Default,
    Priority,
    Alphabetical,
}

impl SortMode {
    /// Advance to the next mode: default → priority → alphabetical → default
    pub fn next(self) -> SortMode {
        match self {
            SortMode::Default => SortMode::Priority,
            SortMode::Priority => SortMode::Alphabetical,
            SortMode::Alphabetical => SortMode::Default,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::Priority => "priority",
            SortMode::Alphabetical => "alphabetical",
        }
    }

    pub fn parse(s: &str) -> Option<SortMode> {
        match s {
            "default" => Some(SortMode::Default),
            "priority" => Some(SortMode::Priority),
            "alphabetical" => Some(SortMode::Alphabetical),
            _ => None,
        }
    }
}

/// A single task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID, never reused even after deletion
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    /// RFC 3339 timestamp with timezone offset, set once at creation.
    /// Kept as a string so a malformed value degrades at display time
    /// instead of failing the whole load.
    #[serde(default)]
    pub created_at: String,
}

fn default_priority() -> Priority {
    Priority::Normal
}

impl Task {
    /// Create a new task stamped with the current local time
    pub fn new(id: u64, text: String, priority: Priority) -> Self {
        Task {
            id,
            text,
            completed: false,
            priority,
            created_at: Local::now().to_rfc3339(),
        }
    }
}
