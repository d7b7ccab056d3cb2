use crate::model::task::{SortMode, Task};

/// Derive the canonical display order for `tasks` under `mode`.
///
/// Pending tasks always precede completed tasks, regardless of mode.
/// Within each partition the sort is stable, so equal keys keep their
/// relative (creation) order. Purely a function of (tasks, mode).
pub fn sort_tasks(tasks: &mut Vec<Task>, mode: SortMode) {
    let mut pending: Vec<Task> = Vec::with_capacity(tasks.len());
    let mut completed: Vec<Task> = Vec::new();
    for task in tasks.drain(..) {
        if task.completed {
            completed.push(task);
        } else {
            pending.push(task);
        }
    }

    match mode {
        // IDs are allocated monotonically, so this is creation order
        SortMode::Default => {
            pending.sort_by_key(|t| t.id);
            completed.sort_by_key(|t| t.id);
        }
        SortMode::Priority => {
            pending.sort_by_key(|t| t.priority.rank());
            completed.sort_by_key(|t| t.priority.rank());
        }
        SortMode::Alphabetical => {
            pending.sort_by_key(|t| t.text.to_lowercase());
            completed.sort_by_key(|t| t.text.to_lowercase());
        }
    }

    tasks.extend(pending);
    tasks.extend(completed);
}
