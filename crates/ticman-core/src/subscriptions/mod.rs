//! Built-in subscription sources.
//!
//! - **Terminal events** ([`terminal_events`]) -- key presses and resizes,
//!   plus a final [`TerminalEvent::InputLost`](crate::TerminalEvent::InputLost)
//!   if the terminal can no longer be read.
//! - **Timers** ([`Every`]) -- repeating ticks, used for animation.

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
