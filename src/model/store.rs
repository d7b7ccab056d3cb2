use std::path::Path;

use crate::io::store_io::{self, StoreError, StoreFile};
use crate::model::task::{Priority, SortMode, Task};
use crate::ops::sort;

/// The task collection, its identity allocator, and the selection cursor.
///
/// `tasks` holds the *display* order: it is re-sorted after every mutation,
/// not kept as a secondary index. The selection cursor is session state and
/// is never persisted.
#[derive(Debug, Clone)]
pub struct TaskStore {
    pub tasks: Vec<Task>,
    pub next_id: u64,
    pub sort_mode: SortMode,
    /// Index into `tasks`; 0 when empty, otherwise always valid
    pub selected: usize,
    /// Set by every mutating operation, consumed by the persistence
    /// choke point (TUI loop / CLI handler) via `take_dirty`
    dirty: bool,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
            sort_mode: SortMode::Default,
            selected: 0,
            dirty: false,
        }
    }
}

impl TaskStore {
    /// Load the store from disk. A missing or malformed file falls back
    /// to an empty store with the ID counter reset — never an error.
    pub fn load(path: &Path) -> TaskStore {
        let mut store = match store_io::read_store(path) {
            Some(file) => TaskStore {
                tasks: file.tasks,
                next_id: file.next_id,
                sort_mode: file.sort_mode,
                selected: 0,
                dirty: false,
            },
            None => TaskStore::default(),
        };
        sort::sort_tasks(&mut store.tasks, store.sort_mode);
        store
    }

    /// Save the store to disk (atomic write)
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let file = StoreFile {
            tasks: self.tasks.clone(),
            next_id: self.next_id,
            sort_mode: self.sort_mode,
        };
        store_io::write_store(path, &file)
    }

    /// Add a task. Silent no-op if the text is empty after trimming —
    /// callers are expected to pre-validate.
    pub fn add(&mut self, text: &str, priority: Priority) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.tasks.push(Task::new(self.next_id, text.to_string(), priority));
        self.next_id += 1;
        self.resort();
        self.dirty = true;
    }

    /// Flip completion for the task at `index`; no-op out of range
    pub fn toggle(&mut self, index: usize) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.completed = !task.completed;
            self.resort();
            self.dirty = true;
        }
    }

    /// Replace the text of the task at `index` in place. Only the
    /// alphabetical mode orders by text, so only that mode re-sorts.
    pub fn edit(&mut self, index: usize, new_text: &str) {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return;
        }
        if let Some(task) = self.tasks.get_mut(index) {
            task.text = new_text.to_string();
            if self.sort_mode == SortMode::Alphabetical {
                self.resort();
            }
            self.dirty = true;
        }
    }

    /// Remove the task at `index`, repairing the selection cursor
    pub fn delete(&mut self, index: usize) {
        if index >= self.tasks.len() {
            return;
        }
        self.tasks.remove(index);
        if self.tasks.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len() - 1;
        }
        self.dirty = true;
    }

    /// Cycle the priority of the task at `index` (low → normal → high → low)
    pub fn cycle_priority(&mut self, index: usize) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.priority = task.priority.cycle_task();
            if self.sort_mode == SortMode::Priority {
                self.resort();
            }
            self.dirty = true;
        }
    }

    /// Advance the sort mode and re-sort
    pub fn cycle_sort_mode(&mut self) {
        self.sort_mode = self.sort_mode.next();
        self.resort();
        self.dirty = true;
    }

    /// Set the sort mode explicitly (CLI)
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.resort();
        self.dirty = true;
    }

    /// Resolve a task ID to its current display index
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn toggle_by_id(&mut self, id: u64) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.toggle(idx);
                true
            }
            None => false,
        }
    }

    pub fn delete_by_id(&mut self, id: u64) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                self.delete(idx);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// True if any mutation happened since the last `take_dirty`
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn resort(&mut self) {
        sort::sort_tasks(&mut self.tasks, self.sort_mode);
    }
}
