//! Colors and text styles.
//!
//! The palette is DawnBringer's 16-color set, restricted to the entries the
//! installer uses.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

pub mod palette {
    use ratatui::style::Color;

    pub const VOID: Color = Color::Rgb(0x14, 0x0c, 0x1c);
    pub const BLUE: Color = Color::Rgb(0x30, 0x34, 0x6d);
    pub const GREY: Color = Color::Rgb(0x4e, 0x4a, 0x4e);
    pub const GREEN: Color = Color::Rgb(0x34, 0x65, 0x24);
    pub const RED: Color = Color::Rgb(0xd0, 0x46, 0x48);
    pub const WHITE: Color = Color::Rgb(0xde, 0xee, 0xd6);
    pub const DIM: Color = Color::Rgb(0x66, 0x66, 0x66);

    pub const RAINBOW: [Color; 6] = [
        Color::Rgb(0xd0, 0x46, 0x48),
        Color::Rgb(0xd2, 0x7d, 0x2c),
        Color::Rgb(0xda, 0xd4, 0x5e),
        Color::Rgb(0x6d, 0xaa, 0x2c),
        Color::Rgb(0x59, 0x7d, 0xce),
        Color::Rgb(0x57, 0x42, 0x90),
    ];
}

/// Every style the screen uses.
#[derive(Debug, Clone)]
pub struct Theme {
    pub app: Style,
    pub title: &'static [Color],
    pub version: Style,
    pub normal: Style,
    pub selected: Style,
    pub cursor: Style,
    pub hint: Style,
    pub success: Style,
    pub error: Style,
    pub spinner: Style,
    pub log_border: Style,
    pub log_text: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let base = Style::default().bg(palette::VOID);
        Self {
            app: base.fg(palette::WHITE),
            title: &palette::RAINBOW,
            version: base.fg(palette::GREY),
            normal: base.fg(palette::BLUE),
            selected: base.fg(palette::WHITE).add_modifier(Modifier::BOLD),
            cursor: base.fg(palette::RED),
            hint: base.fg(palette::GREY),
            success: base.fg(palette::GREEN).add_modifier(Modifier::BOLD),
            error: base.fg(palette::RED).add_modifier(Modifier::BOLD),
            spinner: base.fg(palette::RED),
            log_border: base.fg(palette::GREY),
            log_text: base.fg(palette::DIM),
        }
    }
}

impl Theme {
    /// `text` with each character colored by cycling through the title colors.
    pub fn rainbow(&self, text: &str) -> Vec<Span<'static>> {
        if self.title.is_empty() {
            return vec![Span::styled(text.to_string(), self.app)];
        }
        text.chars()
            .zip(self.title.iter().cycle())
            .map(|(c, color)| Span::styled(c.to_string(), self.app.fg(*color)))
            .collect()
    }
}
