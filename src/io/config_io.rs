use std::fs;
use std::path::PathBuf;

use crate::model::config::{Config, home_dir};

/// Path of the user config file
pub fn config_path() -> PathBuf {
    home_dir().join(".taskman").join("config.json")
}

/// Load the user config, degrading to defaults when the file is missing
/// or malformed.
pub fn load_config() -> Config {
    read_config_at(&config_path())
}

fn read_config_at(path: &std::path::Path) -> Config {
    fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}
