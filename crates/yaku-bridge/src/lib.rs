use serde_json::Value;

pub mod procs;
pub mod router;
pub mod ws;

pub use router::{EventRouter, SubscriptionHandle};
pub use ws::WsBridge;

/// Async request/response channel to the out-of-process backend
#[async_trait::async_trait]
pub trait RemoteBridge: Send + Sync {
    /// Invoke a named remote procedure with positional arguments.
    ///
    /// Resolves exactly once per invocation, with either the backend's
    /// result value or a [`BridgeError`]. The bridge never retries.
    async fn invoke(&self, procedure: &str, args: Vec<Value>) -> Result<Value, BridgeError>;
}

pub type EventHandler = Box<dyn Fn(&[Value]) + Send + Sync>;

/// Subscription side of the bridge: backend-originated events.
///
/// A handler runs zero or more times until its handle is passed back to
/// [`BridgeEvents::unsubscribe`]. The subscriber owns that obligation.
pub trait BridgeEvents: Send + Sync {
    fn subscribe(&self, event: &str, handler: EventHandler) -> SubscriptionHandle;
    fn unsubscribe(&self, handle: SubscriptionHandle);
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    #[error("backend unreachable: {0}")]
    TransportUnavailable(String),

    #[error("backend fault: {0}")]
    RemoteFault(String),

    #[error("remote call timed out")]
    Timeout,
}
