use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` mirrors [`Model`](crate::Model) except that
/// [`view`](Component::view) receives the area to draw into, so a parent
/// decides where each child renders. Parents wrap the component's message in
/// one of their own variants and lift commands with [`Command::map`]:
///
/// ```rust,ignore
/// enum Msg { Spinner(spinner::Message) }
///
/// fn update(&mut self, msg: Msg) -> Command<Msg> {
///     match msg {
///         Msg::Spinner(m) => self.spinner.update(m).map(Msg::Spinner),
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area` of the [`Frame`].
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare active subscriptions for this component.
    ///
    /// The parent collects these and includes them, mapped, in its own
    /// [`Model::subscriptions`](crate::Model::subscriptions).
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
