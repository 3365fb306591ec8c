//! Parse error notification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

/// Callback invoked with a human-readable parse error message.
pub type ParseErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle returned by [`ParseErrorEvent::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Publish/subscribe event fired when a parse runs into a recoverable
/// error, such as an include that cannot be read.
///
/// Notification is synchronous and happens at the point of failure. Having
/// no subscribers is fine; the parse outcome never depends on them.
/// Subscribing and notifying are safe from any thread, and a callback may
/// subscribe or unsubscribe while being notified.
#[derive(Default)]
pub struct ParseErrorEvent {
    subscribers: RwLock<Vec<(SubscriptionId, ParseErrorCallback)>>,
    next_id: AtomicU64,
}

static GLOBAL: LazyLock<ParseErrorEvent> = LazyLock::new(ParseErrorEvent::new);

impl ParseErrorEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide event used by the free parse functions.
    pub fn global() -> &'static ParseErrorEvent {
        &GLOBAL
    }

    /// Register a callback. It stays registered until unsubscribed.
    pub fn subscribe(&self, callback: impl Fn(&str) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let callback: ParseErrorCallback = Arc::new(callback);
        self.subscribers.write().push((id, callback));
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Invoke every subscriber with `message`, in subscription order.
    pub fn notify(&self, message: &str) {
        let callbacks: Vec<ParseErrorCallback> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(message);
        }
    }
}

impl std::fmt::Debug for ParseErrorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseErrorEvent")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn notify_without_subscribers() {
        ParseErrorEvent::new().notify("nobody listens");
    }

    #[test]
    fn subscribers_receive_messages_in_order() {
        let event = ParseErrorEvent::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&log);
        event.subscribe(move |msg| first.lock().push(format!("a:{msg}")));
        let second = Arc::clone(&log);
        event.subscribe(move |msg| second.lock().push(format!("b:{msg}")));

        event.notify("boom");
        assert_eq!(*log.lock(), vec!["a:boom", "b:boom"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let event = ParseErrorEvent::new();
        let count = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&count);
        let id = event.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        event.notify("one");
        assert!(event.unsubscribe(id));
        assert!(!event.unsubscribe(id));
        event.notify("two");

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(event.subscriber_count(), 0);
    }

    #[test]
    fn callback_may_subscribe_during_notify() {
        let event = Arc::new(ParseErrorEvent::new());
        let inner = Arc::clone(&event);
        event.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        event.notify("grow");
        assert_eq!(event.subscriber_count(), 2);
    }

    #[test]
    fn notify_from_many_threads() {
        let event = Arc::new(ParseErrorEvent::new());
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        event.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let event = Arc::clone(&event);
                std::thread::spawn(move || event.notify("concurrent"))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }
}
