//! Screen layout and drawing. All functions take the app state by
//! reference and paint into a ratatui frame; nothing here mutates state.

mod help_overlay;
mod panel;
mod status_row;
mod task_list;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::tui::theme::Theme;

/// Below this size the UI degrades to a quit-only notice
pub const MIN_WIDTH: u16 = 50;
pub const MIN_HEIGHT: u16 = 10;

pub fn render(f: &mut Frame, app: &App) {
    let [header, stats, list, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_header(f, app, header);
    render_stats(f, app, stats);
    task_list::render(f, app, list);
    status_row::render(f, app, status);

    match app.mode {
        Mode::Input | Mode::Edit => panel::render_input(f, app),
        Mode::ConfirmDelete => panel::render_confirm(f, app),
        Mode::Normal => {}
    }
    if app.show_help {
        help_overlay::render(f, app);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        " ◇ TASKMAN ◇ ",
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    )];
    let sprite = app.mood.current_sprite();
    if !sprite.is_empty() {
        spans.push(Span::raw(sprite.to_string()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled(
            format!(" {} active", app.store.pending_count()),
            Style::default().fg(theme.text),
        ),
        Span::styled(" · ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("{} done", app.store.completed_count()),
            Style::default().fg(theme.green),
        ),
        Span::styled(" · ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("sort: {}", app.store.sort_mode.as_str()),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

pub fn render_too_small(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let lines = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(theme.red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("need at least {}x{}", MIN_WIDTH, MIN_HEIGHT),
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            "press q to quit",
            Style::default().fg(theme.dim),
        )),
    ];
    let y = area.height.saturating_sub(3) / 2;
    let target = Rect::new(area.x, area.y + y, area.width, 3.min(area.height));
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        target,
    );
}

/// Fixed-size rectangle centered in `area`, clamped to fit
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered_rect(60, 6, area);
        assert_eq!(r, Rect::new(10, 9, 60, 6));

        let clamped = centered_rect(200, 50, area);
        assert_eq!(clamped, area);
    }
}
