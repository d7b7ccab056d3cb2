use ratatui::style::Color;

use crate::model::task::Priority;

/// Color theme for the TUI. Built once at startup and handed to the
/// renderer; nothing here is global or mutable.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub blue: Color,
    pub selection_bg: Color,
    pub panel_bg: Color,
    pub panel_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Rgb(0xC8, 0xC8, 0xC8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x6A, 0x6A, 0x6A),
            highlight: Color::Rgb(0x44, 0xDD, 0xFF),
            red: Color::Rgb(0xE0, 0x50, 0x50),
            yellow: Color::Rgb(0xE0, 0xC0, 0x50),
            green: Color::Rgb(0x50, 0xD0, 0x80),
            cyan: Color::Rgb(0x50, 0xC0, 0xC0),
            blue: Color::Rgb(0x60, 0x90, 0xE0),
            selection_bg: Color::Rgb(0x2A, 0x3A, 0x4A),
            panel_bg: Color::Rgb(0x20, 0x20, 0x30),
            panel_text: Color::Rgb(0xE8, 0xE8, 0xE8),
        }
    }
}

impl Theme {
    /// Color for a pending task of the given priority
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.red,
            Priority::Normal => self.yellow,
            Priority::Low => self.cyan,
        }
    }
}
