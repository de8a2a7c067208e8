use std::sync::Arc;

use serde_json::Value;
use yaku_bridge::{BridgeEvents, SubscriptionHandle};
use yaku_types::{AppEvent, Notification};

pub const TIMER_EVENT: &str = "timer_event";

/// Inbound channel from backend-originated events to toast
/// notifications. Independent of the capture pipeline.
///
/// Holds exactly one subscription and owns the obligation to remove it
/// again on teardown.
pub struct EventBridge<B: BridgeEvents + ?Sized> {
    bridge: Arc<B>,
    subscription: Option<SubscriptionHandle>,
}

impl<B: BridgeEvents + ?Sized> EventBridge<B> {
    pub fn attach(bridge: Arc<B>, notify_tx: kanal::Sender<AppEvent>) -> Self {
        let subscription = bridge.subscribe(
            TIMER_EVENT,
            Box::new(move |args| {
                // The backend may emit faster than the presenter keeps
                // up; drop instead of blocking the dispatching thread.
                let _ = notify_tx.try_send(AppEvent::Notify(timer_notification(args)));
            }),
        );

        Self {
            bridge,
            subscription: Some(subscription),
        }
    }

    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            tracing::debug!("unsubscribing from '{}'", subscription.event());
            self.bridge.unsubscribe(subscription);
        }
    }
}

impl<B: BridgeEvents + ?Sized> Drop for EventBridge<B> {
    fn drop(&mut self) {
        self.detach();
    }
}

fn timer_notification(args: &[Value]) -> Notification {
    let arg1 = args.first().and_then(Value::as_str).unwrap_or_default();
    let arg2 = args.get(1).and_then(Value::as_bool).unwrap_or_default();
    let arg3 = args.get(2).and_then(Value::as_f64).unwrap_or_default();

    Notification {
        title: "Timer event".to_string(),
        body: format!("{arg1}, {arg2}, {arg3}"),
    }
}
