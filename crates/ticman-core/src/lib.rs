//! Event-loop runtime for the **ticman** installer.
//!
//! `ticman-core` follows the [Elm Architecture]: the application is a
//! **init -> update -> view** cycle, and every side effect (running a child
//! process, quitting, animating) is described as data and carried out by the
//! runtime.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | A side effect for the runtime to perform |
//! | [`Subscription`] | Long-lived event source (terminal input, timers) |
//! | [`Program`] | Wires a [`Model`] to the terminal and drives the loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness with a step-by-step task queue |
//!
//! Messages are handled strictly one at a time. Background work only ever
//! talks to the model by sending a message back into the loop.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, Every};

/// Run an application with custom options, returning the final model.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
