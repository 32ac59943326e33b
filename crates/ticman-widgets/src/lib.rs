//! Widgets for the **ticman** installer UI.
//!
//! Every widget implements [`ticman_core::Component`], so it can be embedded
//! in a [`ticman_core::Model`] and placed anywhere in a [`ratatui`] layout.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`key`] | Key bindings with hint labels |
//! | [`spinner`] | Animated busy indicator driven by a timer subscription |
//! | [`viewport`] | Bordered, scrollable text area for command transcripts |

pub mod key;
pub mod spinner;
pub mod viewport;
