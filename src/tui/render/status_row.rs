use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::App;

const HINTS: &str = "n:new e:edit d:del space:done s:sort h:help q:quit";

/// Bottom row: a transient status message beats a celebration beats a
/// motivation nudge beats the key hints. The mood's compact status is
/// right-aligned when it fits.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = area.width as usize;

    let (left, left_style) = if let Some(msg) = &app.status_message {
        (msg.clone(), Style::default().fg(theme.yellow))
    } else if let Some(msg) = app.mood.celebration_message(&app.store.tasks) {
        (msg.to_string(), Style::default().fg(theme.green))
    } else if let Some(msg) = app.mood.motivation_message(&app.store.tasks) {
        (msg, Style::default().fg(theme.cyan))
    } else {
        (HINTS.to_string(), Style::default().fg(theme.dim))
    };

    let right = app.mood.compact_status(&app.store.tasks, width / 3);
    let mut spans = vec![Span::styled(format!(" {}", left), left_style)];
    let used = left.width() + 1;
    let right_w = right.width();
    if right_w > 0 && used + right_w + 1 < width {
        spans.push(Span::raw(" ".repeat(width - used - right_w - 1)));
        spans.push(Span::styled(right, Style::default().fg(theme.dim)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
