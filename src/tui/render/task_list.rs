use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::model::task::{Priority, Task};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::time::humanize_time_delta;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    if app.store.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No tasks yet — press n to add one",
            Style::default().fg(theme.dim),
        )))
        .alignment(Alignment::Center);
        let y = area.y + area.height / 2;
        f.render_widget(hint, Rect::new(area.x, y, area.width, 1));
        return;
    }

    let pending = app.store.pending_count();
    let has_separator = pending > 0 && pending < app.store.len();

    let mut items: Vec<ListItem> = Vec::with_capacity(app.store.len() + 1);
    for (i, task) in app.store.tasks.iter().enumerate() {
        if has_separator && i == pending {
            items.push(ListItem::new(Line::from(Span::styled(
                "─".repeat(area.width as usize),
                Style::default().fg(theme.dim),
            ))));
        }
        items.push(ListItem::new(task_line(task, theme, area.width as usize)));
    }

    // The separator shifts display indices for the completed block
    let display_selected = if has_separator && app.store.selected >= pending {
        app.store.selected + 1
    } else {
        app.store.selected
    };

    let list = List::new(items)
        .highlight_style(Style::default().bg(theme.selection_bg))
        .highlight_symbol("▸ ");
    let mut state = ListState::default();
    state.select(Some(display_selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn task_line<'a>(task: &Task, theme: &Theme, width: usize) -> Line<'a> {
    let (marker, marker_style) = if task.completed {
        ("✓ ", Style::default().fg(theme.green))
    } else {
        ("· ", Style::default().fg(theme.dim))
    };
    let glyph = priority_glyph(task.priority);
    let glyph_style = if task.completed {
        Style::default().fg(theme.dim)
    } else {
        Style::default().fg(theme.priority_color(task.priority))
    };
    let text_style = if task.completed {
        Style::default()
            .fg(theme.dim)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text)
    };

    let age = humanize_time_delta(&task.created_at);
    // highlight symbol (2) + marker (2) + glyph (2) + gap before age
    let fixed = 2 + marker.width() + 2 + age.width() + 1;
    let text_budget = width.saturating_sub(fixed).max(4);
    let text = truncate_to_width(&task.text, text_budget);
    let pad = text_budget.saturating_sub(text.width());

    Line::from(vec![
        Span::styled(marker.to_string(), marker_style),
        Span::styled(format!("{} ", glyph), glyph_style),
        Span::styled(text, text_style),
        Span::raw(" ".repeat(pad + 1)),
        Span::styled(age, Style::default().fg(theme.dim)),
    ])
}

fn priority_glyph(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "▲",
        Priority::Normal => "•",
        Priority::Low => "▽",
    }
}

/// Truncate to at most `max` display columns, ending in an ellipsis when
/// anything was cut. Splits on grapheme boundaries, never inside one.
pub(crate) fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if used + w > budget {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn long_text_gets_an_ellipsis_within_budget() {
        let t = truncate_to_width("a very long task description", 10);
        assert!(t.ends_with('…'));
        assert!(t.width() <= 10);
    }

    #[test]
    fn wide_graphemes_are_not_split() {
        // each dino is 2 columns; a budget of 4 leaves room for one plus
        // the ellipsis
        let t = truncate_to_width("🦕🦕🦕", 4);
        assert_eq!(t, "🦕…");
        assert!(t.width() <= 4);
    }

    #[test]
    fn priority_glyphs_are_distinct() {
        assert_ne!(priority_glyph(Priority::High), priority_glyph(Priority::Normal));
        assert_ne!(priority_glyph(Priority::Normal), priority_glyph(Priority::Low));
    }
}
