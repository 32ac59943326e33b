use crate::event::TerminalEvent;
use crate::subscription::{Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;

/// Marker type identifying the terminal input subscription.
pub struct TerminalEvents;

enum Input {
    Pending,
    Open(EventStream),
    Closed,
}

/// Create a terminal events subscription that maps each event through `map`.
///
/// Returning `None` from `map` discards the event. The crossterm
/// [`EventStream`] is opened inside the subscription task, on first poll, so
/// calling this on every update cycle never touches the terminal reader.
/// A read error is delivered once as [`TerminalEvent::InputLost`] and ends
/// the stream.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::Key(key)),
///         TerminalEvent::Resize(w, h) => Some(Msg::Resize(w, h)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let events = futures::stream::unfold(Input::Pending, |state| async move {
        let mut events = match state {
            Input::Pending => EventStream::new(),
            Input::Open(events) => events,
            Input::Closed => return None,
        };
        match events.next().await {
            Some(Ok(event)) => Some((TerminalEvent::from(event), Input::Open(events))),
            Some(Err(err)) => Some((TerminalEvent::InputLost(err.to_string()), Input::Closed)),
            None => Some((
                TerminalEvent::InputLost("terminal input stream closed".to_string()),
                Input::Closed,
            )),
        }
    });
    let stream = events.filter_map(move |event| futures::future::ready(map(event)));

    Subscription::from_stream(SubscriptionId::of::<TerminalEvents>(), Box::pin(stream))
}
