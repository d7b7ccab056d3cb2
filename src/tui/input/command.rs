//! Key handling, split in two: `map_key` turns a raw key event into a
//! `Command` according to the active mode, and `apply` executes the
//! command against the application state. Every state change the UI can
//! make goes through a `Command`, so the whole transition table is
//! testable without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{App, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    OpenNewTask,
    OpenEdit,
    OpenConfirmDelete,
    ToggleDone,
    CycleSort,
    CycleTaskPriority,
    ToggleHelp,
    ToggleMood,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,
    Insert(char),
    Backspace,
    CursorLeft,
    CursorRight,
    CyclePriorityChoice,
    Commit,
    Cancel,
    ConfirmDelete,
    CancelDelete,
}

/// Map a key press to a command under the given mode; `None` means the
/// key is ignored.
pub fn map_key(mode: Mode, key: KeyEvent) -> Option<Command> {
    match mode {
        Mode::Normal => map_normal(key),
        Mode::Input | Mode::Edit => map_text_entry(mode, key),
        Mode::ConfirmDelete => Some(match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Command::ConfirmDelete,
            _ => Command::CancelDelete,
        }),
    }
}

fn map_normal(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('n') => Some(Command::OpenNewTask),
        KeyCode::Char('e') => Some(Command::OpenEdit),
        KeyCode::Char('d') => Some(Command::OpenConfirmDelete),
        KeyCode::Char(' ') => Some(Command::ToggleDone),
        KeyCode::Char('s') => Some(Command::CycleSort),
        KeyCode::Char('h') | KeyCode::Char('?') => Some(Command::ToggleHelp),
        KeyCode::Char('x') => Some(Command::ToggleMood),
        KeyCode::Tab => Some(Command::CycleTaskPriority),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::MoveDown),
        KeyCode::PageUp => Some(Command::PageUp),
        KeyCode::PageDown => Some(Command::PageDown),
        KeyCode::Home => Some(Command::JumpTop),
        KeyCode::End => Some(Command::JumpBottom),
        _ => None,
    }
}

fn map_text_entry(mode: Mode, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc => Some(Command::Cancel),
        KeyCode::Enter => Some(Command::Commit),
        KeyCode::Backspace => Some(Command::Backspace),
        KeyCode::Left => Some(Command::CursorLeft),
        KeyCode::Right => Some(Command::CursorRight),
        // Priority is fixed while editing an existing task
        KeyCode::Tab if mode == Mode::Input => Some(Command::CyclePriorityChoice),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Command::Insert(c))
        }
        _ => None,
    }
}

pub fn apply(app: &mut App, command: Command) {
    match command {
        Command::Quit => app.should_quit = true,

        Command::OpenNewTask => {
            app.mode = Mode::Input;
            app.input_buffer.clear();
            app.input_cursor = 0;
            app.input_priority = app.default_priority;
        }
        Command::OpenEdit => {
            if let Some(task) = app.store.tasks.get(app.store.selected) {
                app.input_buffer = task.text.clone();
                app.input_cursor = app.input_buffer.len();
                app.mode = Mode::Edit;
            }
        }
        Command::OpenConfirmDelete => {
            if !app.store.is_empty() {
                app.mode = Mode::ConfirmDelete;
            }
        }

        Command::ToggleDone => {
            let idx = app.store.selected;
            if let Some(task) = app.store.tasks.get(idx) {
                let now_done = !task.completed;
                app.store.toggle(idx);
                app.set_status(if now_done { "Task completed" } else { "Task reopened" });
            }
        }
        Command::CycleSort => {
            app.store.cycle_sort_mode();
            app.set_status(format!("Sorted by {}", app.store.sort_mode.as_str()));
        }
        Command::CycleTaskPriority => {
            let idx = app.store.selected;
            if idx < app.store.len() {
                app.store.cycle_priority(idx);
                app.force_redraw = true;
            }
        }
        Command::ToggleHelp => app.show_help = !app.show_help,
        Command::ToggleMood => {
            app.mood.toggle();
            app.set_status(if app.mood.is_enabled() {
                "Mood animation on"
            } else {
                "Mood animation off"
            });
            app.force_redraw = true;
        }

        Command::MoveUp => {
            app.store.selected = app.store.selected.saturating_sub(1);
        }
        Command::MoveDown => {
            if app.store.selected + 1 < app.store.len() {
                app.store.selected += 1;
            }
        }
        Command::PageUp => {
            app.store.selected = app.store.selected.saturating_sub(app.page_jump);
        }
        Command::PageDown => {
            if !app.store.is_empty() {
                app.store.selected =
                    (app.store.selected + app.page_jump).min(app.store.len() - 1);
            }
        }
        Command::JumpTop => app.store.selected = 0,
        Command::JumpBottom => {
            if !app.store.is_empty() {
                app.store.selected = app.store.len() - 1;
            }
        }

        Command::Insert(c) => {
            app.input_buffer.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }
        Command::Backspace => {
            let prev = prev_boundary(&app.input_buffer, app.input_cursor);
            if prev < app.input_cursor {
                app.input_buffer.replace_range(prev..app.input_cursor, "");
                app.input_cursor = prev;
            }
        }
        Command::CursorLeft => {
            app.input_cursor = prev_boundary(&app.input_buffer, app.input_cursor);
        }
        Command::CursorRight => {
            app.input_cursor = next_boundary(&app.input_buffer, app.input_cursor);
        }
        Command::CyclePriorityChoice => {
            app.input_priority = app.input_priority.cycle_input();
        }

        Command::Commit => {
            let text = app.input_buffer.trim().to_string();
            if !text.is_empty() {
                match app.mode {
                    Mode::Input => {
                        app.store.add(&text, app.input_priority);
                        app.set_status("Task added");
                    }
                    Mode::Edit => {
                        let idx = app.store.selected;
                        app.store.edit(idx, &text);
                        app.set_status("Task updated");
                    }
                    Mode::Normal | Mode::ConfirmDelete => {}
                }
            }
            app.close_input();
        }
        Command::Cancel => {
            app.close_input();
            app.set_status("Cancelled");
        }

        Command::ConfirmDelete => {
            app.store.delete(app.store.selected);
            app.mode = Mode::Normal;
            app.set_status("Task deleted");
        }
        Command::CancelDelete => {
            app.mode = Mode::Normal;
            app.set_status("Delete cancelled");
        }
    }
}

/// Largest grapheme boundary strictly before `pos` (0 if none)
fn prev_boundary(s: &str, pos: usize) -> usize {
    s.grapheme_indices(true)
        .map(|(i, _)| i)
        .take_while(|&i| i < pos)
        .last()
        .unwrap_or(0)
}

/// Smallest grapheme boundary strictly after `pos` (len if none)
fn next_boundary(s: &str, pos: usize) -> usize {
    s.grapheme_indices(true)
        .map(|(i, g)| i + g.len())
        .find(|&end| end > pos)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Priority, SortMode};
    use crate::tui::app::test_app;
    use crossterm::event::KeyEvent;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(texts: &[&str]) -> App {
        let mut app = test_app();
        for t in texts {
            app.store.add(t, Priority::Normal);
        }
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            apply(app, Command::Insert(c));
        }
    }

    #[test]
    fn normal_mode_key_map() {
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Char('n'))), Some(Command::OpenNewTask));
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Char('e'))), Some(Command::OpenEdit));
        assert_eq!(
            map_key(Mode::Normal, key(KeyCode::Char('d'))),
            Some(Command::OpenConfirmDelete)
        );
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Char(' '))), Some(Command::ToggleDone));
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Char('s'))), Some(Command::CycleSort));
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Char('h'))), Some(Command::ToggleHelp));
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Char('x'))), Some(Command::ToggleMood));
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Tab)), Some(Command::CycleTaskPriority));
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Char('k'))), Some(Command::MoveUp));
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Char('j'))), Some(Command::MoveDown));
        assert_eq!(map_key(Mode::Normal, key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn text_entry_key_map() {
        assert_eq!(map_key(Mode::Input, key(KeyCode::Esc)), Some(Command::Cancel));
        assert_eq!(map_key(Mode::Input, key(KeyCode::Enter)), Some(Command::Commit));
        assert_eq!(
            map_key(Mode::Input, key(KeyCode::Char('q'))),
            Some(Command::Insert('q'))
        );
        assert_eq!(
            map_key(Mode::Input, key(KeyCode::Tab)),
            Some(Command::CyclePriorityChoice)
        );
        // Tab does nothing while editing, priority is not part of an edit
        assert_eq!(map_key(Mode::Edit, key(KeyCode::Tab)), None);
        assert_eq!(
            map_key(Mode::Edit, key(KeyCode::Char('é'))),
            Some(Command::Insert('é'))
        );
    }

    #[test]
    fn control_chords_are_ignored_in_text_entry() {
        let chord = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(Mode::Input, chord), None);
    }

    #[test]
    fn confirm_delete_accepts_only_y() {
        assert_eq!(
            map_key(Mode::ConfirmDelete, key(KeyCode::Char('y'))),
            Some(Command::ConfirmDelete)
        );
        assert_eq!(
            map_key(Mode::ConfirmDelete, key(KeyCode::Char('Y'))),
            Some(Command::ConfirmDelete)
        );
        assert_eq!(
            map_key(Mode::ConfirmDelete, key(KeyCode::Char('n'))),
            Some(Command::CancelDelete)
        );
        assert_eq!(
            map_key(Mode::ConfirmDelete, key(KeyCode::Esc)),
            Some(Command::CancelDelete)
        );
    }

    #[test]
    fn new_task_flow_adds_and_returns_to_normal() {
        let mut app = app_with(&[]);
        apply(&mut app, Command::OpenNewTask);
        assert_eq!(app.mode, Mode::Input);

        type_text(&mut app, "buy milk");
        apply(&mut app, Command::CyclePriorityChoice);
        assert_eq!(app.input_priority, Priority::High);
        apply(&mut app, Command::Commit);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks[0].text, "buy milk");
        assert_eq!(app.store.tasks[0].priority, Priority::High);
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn committing_blank_input_adds_nothing() {
        let mut app = app_with(&[]);
        apply(&mut app, Command::OpenNewTask);
        type_text(&mut app, "   ");
        apply(&mut app, Command::Commit);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.store.is_empty());
    }

    #[test]
    fn cancel_discards_typed_text() {
        let mut app = app_with(&[]);
        apply(&mut app, Command::OpenNewTask);
        type_text(&mut app, "never mind");
        apply(&mut app, Command::Cancel);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.store.is_empty());
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn edit_flow_prefills_and_replaces_text() {
        let mut app = app_with(&["old text"]);
        apply(&mut app, Command::OpenEdit);
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.input_buffer, "old text");
        assert_eq!(app.input_cursor, app.input_buffer.len());

        for _ in 0.."old text".len() {
            apply(&mut app, Command::Backspace);
        }
        type_text(&mut app, "new text");
        apply(&mut app, Command::Commit);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.tasks[0].text, "new text");
    }

    #[test]
    fn edit_on_empty_store_is_a_no_op() {
        let mut app = app_with(&[]);
        apply(&mut app, Command::OpenEdit);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = app_with(&["doomed"]);
        apply(&mut app, Command::OpenConfirmDelete);
        assert_eq!(app.mode, Mode::ConfirmDelete);
        apply(&mut app, Command::CancelDelete);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.len(), 1);

        apply(&mut app, Command::OpenConfirmDelete);
        apply(&mut app, Command::ConfirmDelete);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.store.is_empty());
    }

    #[test]
    fn delete_on_empty_store_is_a_no_op() {
        let mut app = app_with(&[]);
        apply(&mut app, Command::OpenConfirmDelete);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn toggle_reports_direction_in_status() {
        let mut app = app_with(&["a"]);
        apply(&mut app, Command::ToggleDone);
        assert_eq!(app.status_message.as_deref(), Some("Task completed"));
        apply(&mut app, Command::ToggleDone);
        assert_eq!(app.status_message.as_deref(), Some("Task reopened"));
    }

    #[test]
    fn selection_movement_clamps_at_both_ends() {
        let mut app = app_with(&["a", "b", "c"]);
        apply(&mut app, Command::MoveUp);
        assert_eq!(app.store.selected, 0);
        apply(&mut app, Command::MoveDown);
        apply(&mut app, Command::MoveDown);
        apply(&mut app, Command::MoveDown);
        assert_eq!(app.store.selected, 2);
        apply(&mut app, Command::JumpTop);
        assert_eq!(app.store.selected, 0);
        apply(&mut app, Command::JumpBottom);
        assert_eq!(app.store.selected, 2);
    }

    #[test]
    fn page_movement_uses_page_jump() {
        let texts: Vec<String> = (0..30).map(|i| format!("task {}", i)).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut app = app_with(&refs);
        app.page_jump = 10;

        apply(&mut app, Command::PageDown);
        assert_eq!(app.store.selected, 10);
        apply(&mut app, Command::PageDown);
        apply(&mut app, Command::PageDown);
        assert_eq!(app.store.selected, 29);
        apply(&mut app, Command::PageUp);
        assert_eq!(app.store.selected, 19);
    }

    #[test]
    fn movement_on_empty_store_keeps_selection_at_zero() {
        let mut app = app_with(&[]);
        apply(&mut app, Command::MoveDown);
        apply(&mut app, Command::PageDown);
        apply(&mut app, Command::JumpBottom);
        assert_eq!(app.store.selected, 0);
    }

    #[test]
    fn cycle_sort_advances_mode_and_reports() {
        let mut app = app_with(&["a"]);
        apply(&mut app, Command::CycleSort);
        assert_eq!(app.store.sort_mode, SortMode::Priority);
        assert_eq!(app.status_message.as_deref(), Some("Sorted by priority"));
    }

    #[test]
    fn cycle_task_priority_forces_a_redraw() {
        let mut app = app_with(&["a"]);
        apply(&mut app, Command::CycleTaskPriority);
        assert_eq!(app.store.tasks[0].priority, Priority::High);
        assert!(app.force_redraw);
    }

    #[test]
    fn help_toggles() {
        let mut app = app_with(&[]);
        apply(&mut app, Command::ToggleHelp);
        assert!(app.show_help);
        apply(&mut app, Command::ToggleHelp);
        assert!(!app.show_help);
    }

    #[test]
    fn mood_toggle_flips_and_forces_redraw() {
        let mut app = app_with(&[]);
        assert!(!app.mood.is_enabled());
        apply(&mut app, Command::ToggleMood);
        assert!(app.mood.is_enabled());
        assert!(app.force_redraw);
        assert_eq!(app.status_message.as_deref(), Some("Mood animation on"));
    }

    #[test]
    fn cursor_moves_by_grapheme_in_multibyte_text() {
        let mut app = app_with(&[]);
        apply(&mut app, Command::OpenNewTask);
        type_text(&mut app, "aé🦕");
        assert_eq!(app.input_cursor, app.input_buffer.len());

        apply(&mut app, Command::CursorLeft);
        apply(&mut app, Command::Insert('x'));
        assert_eq!(app.input_buffer, "aéx🦕");

        apply(&mut app, Command::CursorRight);
        apply(&mut app, Command::Backspace);
        assert_eq!(app.input_buffer, "aéx");
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut app = app_with(&[]);
        apply(&mut app, Command::OpenNewTask);
        type_text(&mut app, "ab");
        apply(&mut app, Command::CursorLeft);
        apply(&mut app, Command::CursorLeft);
        apply(&mut app, Command::Backspace);
        assert_eq!(app.input_buffer, "ab");
        assert_eq!(app.input_cursor, 0);
    }

    #[test]
    fn boundary_helpers() {
        let s = "a🦕b";
        assert_eq!(prev_boundary(s, 0), 0);
        assert_eq!(prev_boundary(s, 1), 0);
        assert_eq!(prev_boundary(s, 5), 1);
        assert_eq!(next_boundary(s, 0), 1);
        assert_eq!(next_boundary(s, 1), 5);
        assert_eq!(next_boundary(s, s.len()), s.len());
    }
}
