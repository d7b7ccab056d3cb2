use ratatui::Frame;
use ratatui::layout::Position;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, Mode};
use crate::tui::render::centered_rect;
use crate::tui::render::task_list::truncate_to_width;

const PANEL_WIDTH: u16 = 56;

/// Floating panel for composing or editing a task
pub fn render_input(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let title = match app.mode {
        Mode::Edit => " Edit Task ",
        _ => " New Task ",
    };
    let area = centered_rect(PANEL_WIDTH, 5, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.panel_bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![Line::from(Span::styled(
        app.input_buffer.clone(),
        Style::default().fg(theme.panel_text),
    ))];
    if app.mode == Mode::Input {
        lines.push(Line::from(vec![
            Span::styled("priority: ", Style::default().fg(theme.dim)),
            Span::styled(
                app.input_priority.as_str(),
                Style::default().fg(theme.priority_color(app.input_priority)),
            ),
            Span::styled("  (Tab to change)", Style::default().fg(theme.dim)),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter to save · Esc to cancel",
            Style::default().fg(theme.dim),
        )));
    }
    f.render_widget(Paragraph::new(lines), inner);

    let cursor_cols = app.input_buffer[..app.input_cursor].width() as u16;
    f.set_cursor_position(Position::new(
        inner.x + cursor_cols.min(inner.width.saturating_sub(1)),
        inner.y,
    ));
}

/// Floating confirmation panel for deletion
pub fn render_confirm(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(PANEL_WIDTH, 5, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Delete Task? ",
            Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.panel_bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = app
        .store
        .tasks
        .get(app.store.selected)
        .map(|t| truncate_to_width(&t.text, inner.width as usize))
        .unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(text, Style::default().fg(theme.panel_text))),
        Line::from(Span::styled(
            "y to delete · any other key to keep it",
            Style::default().fg(theme.dim),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}
