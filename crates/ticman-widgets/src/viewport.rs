//! Scrollable, bordered text area for command transcripts.

use std::cell::Cell;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{
    Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;
use ticman_core::command::Command;
use ticman_core::component::Component;

/// Most lines a viewport holds; the scroll offset is a `u16`.
pub const MAX_LINES: usize = u16::MAX as usize;

/// Messages for the viewport component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Scroll up by the given number of lines.
    ScrollUp(u16),
    /// Scroll down by the given number of lines.
    ScrollDown(u16),
    /// Scroll up by one visible page.
    PageUp,
    /// Scroll down by one visible page.
    PageDown,
    /// Jump to the first line.
    GotoTop,
    /// Jump to the last line.
    GotoBottom,
}

/// Style configuration for the viewport.
#[derive(Debug, Clone)]
pub struct ViewportStyle {
    /// Border style.
    pub border: Style,
    /// Style of the content text.
    pub text: Style,
    /// Style applied to the vertical scrollbar.
    pub scrollbar: Style,
}

impl Default for ViewportStyle {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::DarkGray),
            text: Style::default().fg(Color::Gray),
            scrollbar: Style::default().fg(Color::DarkGray),
        }
    }
}

/// A bordered, vertically scrollable block of plain text.
///
/// Lines are not wrapped, so one content line is one screen row and the
/// scroll offset is exact. The visible height is only known once the
/// viewport has been drawn; it is recorded during `view` and used to clamp
/// scrolling afterwards.
#[derive(Debug)]
pub struct Viewport {
    content: String,
    offset: u16,
    style: ViewportStyle,
    visible_height: Cell<u16>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create an empty viewport.
    pub fn new() -> Self {
        Self {
            content: String::new(),
            offset: 0,
            style: ViewportStyle::default(),
            visible_height: Cell::new(0),
        }
    }

    /// Set the viewport style configuration.
    pub fn with_style(mut self, style: ViewportStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the content. The scroll offset is kept (and clamped on draw).
    ///
    /// Only the last [`MAX_LINES`] lines are kept, since scroll offsets are
    /// `u16`. Older lines are dropped from the front.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let mut content = content.into();
        let lines = content.lines().count();
        if lines > MAX_LINES {
            let cut: usize = content
                .split_inclusive('\n')
                .take(lines - MAX_LINES)
                .map(str::len)
                .sum();
            content.drain(..cut);
        }
        self.content = content;
    }

    /// The current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current vertical scroll offset, clamped to the content.
    pub fn y_offset(&self) -> u16 {
        self.offset.min(self.max_offset())
    }

    /// Whether the last line is visible.
    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Total number of content lines.
    pub fn total_line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Scroll to the very top.
    pub fn goto_top(&mut self) {
        self.offset = 0;
    }

    /// Scroll so the last line is visible. Clamped when drawn.
    pub fn goto_bottom(&mut self) {
        self.offset = u16::MAX;
    }

    fn total_lines(&self) -> u16 {
        u16::try_from(self.total_line_count()).unwrap_or(u16::MAX)
    }

    fn max_offset(&self) -> u16 {
        self.total_lines().saturating_sub(self.visible_height.get())
    }

    fn page(&self) -> u16 {
        self.visible_height.get().max(1)
    }
}

impl Component for Viewport {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        // Relative scrolls start from where the view actually is, not from a
        // pending goto_bottom() sentinel.
        let current = self.y_offset();
        self.offset = match msg {
            Message::ScrollUp(n) => current.saturating_sub(n),
            Message::ScrollDown(n) => current.saturating_add(n).min(self.max_offset()),
            Message::PageUp => current.saturating_sub(self.page()),
            Message::PageDown => current.saturating_add(self.page()).min(self.max_offset()),
            Message::GotoTop => 0,
            Message::GotoBottom => u16::MAX,
        };
        Command::none()
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.style.border);

        let inner = block.inner(area);
        self.visible_height.set(inner.height);

        let offset = self.y_offset();
        let paragraph = Paragraph::new(self.content.as_str())
            .style(self.style.text)
            .block(block)
            .scroll((offset, 0));
        frame.render_widget(paragraph, area);

        if self.total_lines() > inner.height {
            let mut state = ScrollbarState::new(self.max_offset() as usize).position(offset as usize);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight).style(self.style.scrollbar);
            frame.render_stateful_widget(scrollbar, area, &mut state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn numbered(n: usize) -> String {
        (1..=n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
    }

    /// Draw into a box with `rows` inner rows so the visible height is known.
    fn draw(vp: &Viewport, rows: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(30, rows + 2)).unwrap();
        terminal.draw(|f| vp.view(f, f.area())).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn goto_bottom_shows_last_line() {
        let mut vp = Viewport::new();
        vp.set_content(numbered(20));
        vp.goto_bottom();
        let screen = draw(&vp, 5);
        assert!(screen.contains("line 20"));
        assert!(!screen.contains("line 15"));
        assert_eq!(vp.y_offset(), 15);
        assert!(vp.at_bottom());
    }

    #[test]
    fn scroll_up_from_bottom_moves_one_line() {
        let mut vp = Viewport::new();
        vp.set_content(numbered(20));
        vp.goto_bottom();
        draw(&vp, 5);
        vp.update(Message::ScrollUp(1));
        assert_eq!(vp.y_offset(), 14);
        assert!(!vp.at_bottom());
    }

    #[test]
    fn scrolling_is_clamped() {
        let mut vp = Viewport::new();
        vp.set_content(numbered(8));
        draw(&vp, 5);
        vp.update(Message::ScrollUp(3));
        assert_eq!(vp.y_offset(), 0);
        vp.update(Message::PageDown);
        vp.update(Message::PageDown);
        assert_eq!(vp.y_offset(), 3);
    }

    #[test]
    fn oversized_content_keeps_the_newest_lines() {
        let mut vp = Viewport::new();
        vp.set_content(numbered(MAX_LINES + 10));
        assert_eq!(vp.total_line_count(), MAX_LINES);
        assert!(vp.content().starts_with("line 11\n"));

        vp.goto_bottom();
        let out = draw(&vp, 3);
        assert!(out.contains(&format!("line {}", MAX_LINES + 10)));
    }

    #[test]
    fn short_content_is_always_at_bottom() {
        let mut vp = Viewport::new();
        vp.set_content("only line");
        draw(&vp, 5);
        assert!(vp.at_bottom());
        assert_eq!(vp.total_line_count(), 1);
    }
}
