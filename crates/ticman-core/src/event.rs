use crossterm::event::KeyEvent;

/// Terminal events produced by the runtime's input subscription.
///
/// Delivered through [`terminal_events`](crate::subscriptions::terminal_events),
/// which maps each `TerminalEvent` into the application's `Message` type.
///
/// # Example
///
/// ```rust,ignore
/// use ticman_core::{terminal_events, TerminalEvent};
///
/// terminal_events(|ev| match ev {
///     TerminalEvent::Key(k) => Some(Msg::Key(k)),
///     TerminalEvent::Resize(w, h) => Some(Msg::Resize(w, h)),
///     TerminalEvent::InputLost(err) => Some(Msg::InputLost(err)),
///     TerminalEvent::Other => None,
/// })
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Reading from the terminal failed; no further events will arrive.
    InputLost(String),
    /// Mouse, focus and paste events, which the installer does not use.
    Other,
}

impl From<crossterm::event::Event> for TerminalEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => TerminalEvent::Key(k),
            crossterm::event::Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            _ => TerminalEvent::Other,
        }
    }
}
