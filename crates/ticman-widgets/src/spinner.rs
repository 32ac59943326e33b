//! Animated busy indicator.

use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use ticman_core::command::Command;
use ticman_core::component::Component;
use ticman_core::subscription::{subscribe, Subscription};
use ticman_core::subscriptions::Every;

/// Built-in spinner frame sets.
pub mod frames {
    /// Compact braille dot spinner, ten frames.
    pub const MINI_DOT: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    /// Classic ASCII line spinner: |, /, -, \.
    pub const LINE: &[&str] = &["|", "/", "-", "\\"];
}

/// Messages for the spinner component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Advance the spinner to its next frame.
    Tick,
}

/// A spinner that cycles through its frames while spinning.
///
/// The tick timer is a subscription, so it only exists while the spinner is
/// spinning; a stopped spinner costs nothing.
#[derive(Debug, Clone)]
pub struct Spinner {
    frames: &'static [&'static str],
    frame_index: usize,
    style: Style,
    interval: Duration,
    spinning: bool,
    id: &'static str,
}

impl Spinner {
    /// Create a stopped spinner with the given subscription identifier,
    /// [`frames::MINI_DOT`] and one frame every 83 ms.
    pub fn new(id: &'static str) -> Self {
        Self {
            frames: frames::MINI_DOT,
            frame_index: 0,
            style: Style::default().fg(Color::Red),
            interval: Duration::from_millis(83),
            spinning: false,
            id,
        }
    }

    /// Set the frame set used by this spinner.
    pub fn with_frames(mut self, frames: &'static [&'static str]) -> Self {
        self.frames = frames;
        self.frame_index = 0;
        self
    }

    /// Set the style applied to the spinner glyph.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Start animating from the first frame.
    pub fn start(&mut self) {
        self.spinning = true;
        self.frame_index = 0;
    }

    /// Stop animating.
    pub fn stop(&mut self) {
        self.spinning = false;
    }

    /// Whether the spinner is currently animating.
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// The current frame, styled, for embedding in a larger line.
    pub fn span(&self) -> Span<'static> {
        let glyph = self.frames.get(self.frame_index).copied().unwrap_or(" ");
        Span::styled(glyph, self.style)
    }
}

impl Component for Spinner {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Tick => {
                if self.spinning && !self.frames.is_empty() {
                    self.frame_index = (self.frame_index + 1) % self.frames.len();
                }
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if self.spinning && area.width > 0 && area.height > 0 {
            frame.render_widget(Paragraph::new(self.span()), area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.spinning {
            vec![subscribe(Every::new(self.interval, self.id)).map(|_| Message::Tick)]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_and_wraps() {
        let mut spinner = Spinner::new("test").with_frames(frames::LINE);
        spinner.start();
        for _ in 0..5 {
            spinner.update(Message::Tick);
        }
        assert_eq!(spinner.span().content, "/");
    }

    #[test]
    fn stopped_spinner_ignores_ticks_and_has_no_timer() {
        let mut spinner = Spinner::new("test").with_frames(frames::LINE);
        spinner.update(Message::Tick);
        assert_eq!(spinner.span().content, "|");
        assert!(spinner.subscriptions().is_empty());
    }

    #[test]
    fn start_rewinds_to_first_frame() {
        let mut spinner = Spinner::new("test").with_frames(frames::LINE);
        spinner.start();
        spinner.update(Message::Tick);
        spinner.stop();
        spinner.start();
        assert_eq!(spinner.span().content, "|");
        assert_eq!(spinner.subscriptions().len(), 1);
    }
}
