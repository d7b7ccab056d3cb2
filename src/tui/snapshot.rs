use crate::model::task::{Priority, SortMode};
use crate::mood::Mood;
use crate::tui::app::{App, Mode};

/// Characters of task text that participate in change detection. Edits
/// past this prefix still repaint via the cursor/buffer fields while the
/// edit panel is open, and the resort after commit changes the line set.
const TEXT_PREFIX_CHARS: usize = 20;

/// Everything the screen depends on, reduced to a cheap comparable value.
///
/// The event loop captures one of these per tick and repaints only when
/// it differs from the previously painted one (or a force flag is set).
/// Keeping the whole decision in a single `Eq` value means a new visual
/// input can never be forgotten in some ad-hoc hash computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RedrawSnapshot {
    tasks: Vec<TaskLine>,
    selected: usize,
    sort_mode: SortMode,
    width: u16,
    height: u16,
    mode: Mode,
    input_buffer: String,
    input_cursor: usize,
    input_priority: Priority,
    show_help: bool,
    mood: Option<(Mood, usize)>,
    streak: u32,
    status_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TaskLine {
    completed: bool,
    priority: Priority,
    prefix: String,
}

impl RedrawSnapshot {
    pub fn capture(app: &App, width: u16, height: u16) -> RedrawSnapshot {
        let tasks = app
            .store
            .tasks
            .iter()
            .map(|t| TaskLine {
                completed: t.completed,
                priority: t.priority,
                prefix: t.text.chars().take(TEXT_PREFIX_CHARS).collect(),
            })
            .collect();
        RedrawSnapshot {
            tasks,
            selected: app.store.selected,
            sort_mode: app.store.sort_mode,
            width,
            height,
            mode: app.mode,
            input_buffer: app.input_buffer.clone(),
            input_cursor: app.input_cursor,
            input_priority: app.input_priority,
            show_help: app.show_help,
            mood: app
                .mood
                .is_enabled()
                .then(|| (app.mood.mood(), app.mood.frame())),
            streak: app.mood.streak(),
            status_message: app.status_message.clone(),
        }
    }
}
