use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::render::centered_rect;

const BINDINGS: &[(&str, &str)] = &[
    ("n", "new task"),
    ("e", "edit selected task"),
    ("space", "toggle done"),
    ("d", "delete (asks first)"),
    ("Tab", "cycle priority"),
    ("s", "cycle sort mode"),
    ("↑/k ↓/j", "move selection"),
    ("PgUp/PgDn", "move by a page"),
    ("Home/End", "jump to top/bottom"),
    ("x", "toggle mood animation"),
    ("h", "toggle this help"),
    ("q", "quit"),
];

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let height = BINDINGS.len() as u16 + 2;
    let area = centered_rect(40, height, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Keys ",
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.panel_bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<10}", key),
                    Style::default().fg(theme.highlight),
                ),
                Span::styled((*action).to_string(), Style::default().fg(theme.panel_text)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}
