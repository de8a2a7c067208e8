use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::EventHandler;

type StoredHandler = Arc<dyn Fn(&[Value]) + Send + Sync>;

/// Proof of a registered handler; required to unsubscribe it again.
#[derive(Debug)]
pub struct SubscriptionHandle {
    event: String,
    id: u64,
}

impl SubscriptionHandle {
    pub fn event(&self) -> &str {
        &self.event
    }
}

/// Fan-out registry for backend-originated events.
///
/// Keeps handlers per event name; dispatch invokes every handler
/// registered for that name, in registration order.
#[derive(Default)]
pub struct EventRouter {
    handlers: RwLock<HashMap<String, Vec<(u64, StoredHandler)>>>,
    next_id: AtomicU64,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, event: &str, handler: EventHandler) -> SubscriptionHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers
            .write()
            .unwrap()
            .entry(event.to_string())
            .or_default()
            .push((id, Arc::from(handler)));

        SubscriptionHandle {
            event: event.to_string(),
            id,
        }
    }

    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        let mut handlers = self.handlers.write().unwrap();
        if let Some(entries) = handlers.get_mut(&handle.event) {
            entries.retain(|(id, _)| *id != handle.id);
            if entries.is_empty() {
                handlers.remove(&handle.event);
            }
        }
    }

    pub fn dispatch(&self, event: &str, args: &[Value]) {
        // Handlers run outside the lock so they may subscribe or
        // unsubscribe without deadlocking.
        let entries: Vec<StoredHandler> = {
            let handlers = self.handlers.read().unwrap();
            match handlers.get(event) {
                Some(entries) => entries.iter().map(|(_, handler)| handler.clone()).collect(),
                None => {
                    tracing::debug!("no subscribers for event '{}'", event);
                    return;
                }
            }
        };
        for handler in entries {
            handler(args);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    #[test]
    fn dispatch_reaches_every_subscriber() {
        let router = EventRouter::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count = count.clone();
            router.subscribe(
                "tick",
                Box::new(move |_| {
                    count.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }

        router.dispatch("tick", &[json!("a")]);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let router = EventRouter::new();
        let count = Arc::new(AtomicUsize::new(0));

        let handle = {
            let count = count.clone();
            router.subscribe(
                "tick",
                Box::new(move |_| {
                    count.fetch_add(1, Ordering::SeqCst);
                }),
            )
        };

        router.dispatch("tick", &[]);
        router.unsubscribe(handle);
        router.dispatch("tick", &[]);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_without_subscribers_is_a_noop() {
        let router = EventRouter::new();
        router.dispatch("nobody-home", &[json!(1)]);
    }

    #[test]
    fn handlers_may_resubscribe_during_dispatch() {
        let router = Arc::new(EventRouter::new());
        let count = Arc::new(AtomicUsize::new(0));

        {
            let router = router.clone();
            let count = count.clone();
            router.clone().subscribe(
                "tick",
                Box::new(move |_| {
                    let count = count.clone();
                    router.subscribe(
                        "tick",
                        Box::new(move |_| {
                            count.fetch_add(1, Ordering::SeqCst);
                        }),
                    );
                }),
            );
        }

        router.dispatch("tick", &[]);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        router.dispatch("tick", &[]);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handlers_receive_arguments() {
        let router = EventRouter::new();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));

        {
            let seen = seen.clone();
            router.subscribe(
                "tick",
                Box::new(move |args| {
                    seen.lock().unwrap().push(args.to_vec());
                }),
            );
        }

        router.dispatch("tick", &[json!("one"), json!(true), json!(3)]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![json!("one"), json!(true), json!(3)]);
    }
}
