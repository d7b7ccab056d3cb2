use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::config::Config;
use crate::model::task::{SortMode, Task};

/// Error type for store persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize store: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// On-disk shape of tasks.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default = "default_next_id")]
    pub next_id: u64,
    #[serde(default)]
    pub sort_mode: SortMode,
}

fn default_next_id() -> u64 {
    1
}

/// Resolve the tasks.json path: TASKMAN_DATA_FILE env override, else the
/// configured data directory.
pub fn data_path(config: &Config) -> PathBuf {
    match std::env::var_os("TASKMAN_DATA_FILE") {
        Some(path) => PathBuf::from(path),
        None => config.data_directory.join("tasks.json"),
    }
}

/// Read the store file. Missing or malformed content yields None; the
/// caller degrades to an empty store.
pub fn read_store(path: &Path) -> Option<StoreFile> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write the store file atomically (temp file + rename), creating the
/// parent directory if needed.
pub fn write_store(path: &Path, file: &StoreFile) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(file)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Stage `content` in a temp file in the target directory, then rename
/// over `path`. Readers see either the old file or the new one, never a
/// partial write.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content)?;
    staged.flush()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
