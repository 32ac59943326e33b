use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::{Duration, Instant};

/// A repeating timer that fires at a fixed interval.
///
/// Each tick emits the current [`Instant`]. The `id` distinguishes several
/// timers; two `Every` values with the same id are the same subscription, so
/// returning it from every update keeps one timer running.
///
/// ```rust,ignore
/// let sub = subscribe(Every::new(Duration::from_millis(80), "spinner"))
///     .map(|_| Msg::Tick);
/// ```
pub struct Every {
    /// The interval between ticks.
    pub interval: Duration,
    /// A string identifier used to distinguish this timer from others.
    pub id: &'static str,
}

impl Every {
    /// Create a new repeating timer with the given interval and identifier.
    pub fn new(interval: Duration, id: &'static str) -> Self {
        Self { interval, id }
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::with_str::<Self>(self.id)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let start = tokio::time::Instant::now() + self.interval;
        let interval = tokio::time::interval_at(start, self.interval);
        let stream = tokio_stream::wrappers::IntervalStream::new(interval).map(|tick| tick.into_std());
        Box::pin(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_means_same_subscription() {
        let a = Every::new(Duration::from_millis(80), "spinner");
        let b = Every::new(Duration::from_millis(500), "spinner");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), Every::new(Duration::from_millis(80), "other").id());
    }

    #[tokio::test]
    async fn first_tick_waits_one_interval() {
        let started = Instant::now();
        let mut stream = Every::new(Duration::from_millis(20), "spinner").stream();
        let tick = stream.next().await;
        assert!(tick.is_some());
        assert!(started.elapsed() >= Duration::from_millis(15));
    }
}
