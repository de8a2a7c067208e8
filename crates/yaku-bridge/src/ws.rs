use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::router::{EventRouter, SubscriptionHandle};
use crate::{BridgeError, BridgeEvents, EventHandler, RemoteBridge};

type WsSink = futures_util::stream::SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type PendingMap = HashMap<u64, oneshot::Sender<Result<Value, BridgeError>>>;

/// Outbound call frame
#[derive(Serialize)]
struct CallFrame<'a> {
    id: u64,
    call: &'a str,
    args: &'a [Value],
}

/// Inbound frames: either a reply to one of our calls, or a
/// backend-originated event.
#[derive(Deserialize)]
#[serde(untagged)]
enum Inbound {
    Response {
        id: u64,
        #[serde(default)]
        result: Option<Value>,
        #[serde(default)]
        error: Option<String>,
    },
    Event {
        event: String,
        #[serde(default)]
        args: Vec<Value>,
    },
}

/// WebSocket transport for the remote-call bridge.
///
/// Correlates responses to calls by frame id, so each `invoke` resolves
/// exactly once: with the backend's result, with the backend's error,
/// or with a timeout after the configured bound.
pub struct WsBridge {
    sink: tokio::sync::Mutex<WsSink>,
    pending: Arc<Mutex<PendingMap>>,
    router: Arc<EventRouter>,
    next_id: AtomicU64,
    call_timeout: Duration,
    reader: JoinHandle<()>,
}

impl WsBridge {
    pub async fn connect(url: &str, call_timeout: Duration) -> Result<Self, BridgeError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|e| BridgeError::TransportUnavailable(e.to_string()))?;
        let (sink, mut read) = stream.split();

        let pending: Arc<Mutex<PendingMap>> = Arc::new(Mutex::new(HashMap::new()));
        let router = Arc::new(EventRouter::new());

        let reader = {
            let pending = pending.clone();
            let router = router.clone();

            tokio::spawn(async move {
                while let Some(frame) = read.next().await {
                    let Ok(frame) = frame else { break };
                    if !frame.is_text() {
                        continue;
                    }
                    let Ok(text) = frame.to_text() else { continue };

                    match serde_json::from_str::<Inbound>(text) {
                        Ok(Inbound::Response { id, result, error }) => {
                            let waiter = pending.lock().unwrap().remove(&id);
                            match waiter {
                                Some(tx) => {
                                    let outcome = match error {
                                        Some(message) => Err(BridgeError::RemoteFault(message)),
                                        None => Ok(result.unwrap_or(Value::Null)),
                                    };
                                    let _ = tx.send(outcome);
                                }
                                // Waiter already timed out or belongs to nobody.
                                None => tracing::debug!("dropping unmatched response id {}", id),
                            }
                        }
                        Ok(Inbound::Event { event, args }) => {
                            router.dispatch(&event, &args);
                        }
                        Err(e) => {
                            tracing::warn!("unparseable bridge frame: {}", e);
                        }
                    }
                }

                tracing::info!("bridge connection closed");
                let mut pending = pending.lock().unwrap();
                for (_, tx) in pending.drain() {
                    let _ = tx.send(Err(BridgeError::TransportUnavailable(
                        "connection closed".to_string(),
                    )));
                }
            })
        };

        Ok(Self {
            sink: tokio::sync::Mutex::new(sink),
            pending,
            router,
            next_id: AtomicU64::new(1),
            call_timeout,
            reader,
        })
    }
}

#[async_trait::async_trait]
impl RemoteBridge for WsBridge {
    async fn invoke(&self, procedure: &str, args: Vec<Value>) -> Result<Value, BridgeError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let frame = serde_json::to_string(&CallFrame {
            id,
            call: procedure,
            args: &args,
        })
        .map_err(|e| BridgeError::TransportUnavailable(e.to_string()))?;

        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().insert(id, tx);

        tracing::debug!("invoke '{}' (id {})", procedure, id);

        let sent = self.sink.lock().await.send(Message::text(frame)).await;
        if let Err(e) = sent {
            self.pending.lock().unwrap().remove(&id);
            return Err(BridgeError::TransportUnavailable(e.to_string()));
        }

        match tokio::time::timeout(self.call_timeout, rx).await {
            Ok(Ok(outcome)) => outcome,
            // Reader task dropped the sender: connection is gone.
            Ok(Err(_)) => Err(BridgeError::TransportUnavailable(
                "connection closed".to_string(),
            )),
            Err(_) => {
                self.pending.lock().unwrap().remove(&id);
                tracing::warn!("call '{}' (id {}) timed out", procedure, id);
                Err(BridgeError::Timeout)
            }
        }
    }
}

impl BridgeEvents for WsBridge {
    fn subscribe(&self, event: &str, handler: EventHandler) -> SubscriptionHandle {
        self.router.subscribe(event, handler)
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.router.unsubscribe(handle);
    }
}

impl Drop for WsBridge {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn call_frame_serializes_to_wire_shape() {
        let frame = CallFrame {
            id: 7,
            call: "translate_text",
            args: &[json!("Hello"), json!("en"), json!("ru")],
        };

        let encoded = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            encoded,
            json!({"id": 7, "call": "translate_text", "args": ["Hello", "en", "ru"]})
        );
    }

    #[test]
    fn response_frame_parses_as_response() {
        let inbound: Inbound =
            serde_json::from_str(r#"{"id": 3, "result": "ok", "error": null}"#).unwrap();
        match inbound {
            Inbound::Response { id, result, error } => {
                assert_eq!(id, 3);
                assert_eq!(result, Some(json!("ok")));
                assert!(error.is_none());
            }
            Inbound::Event { .. } => panic!("parsed as event"),
        }
    }

    #[test]
    fn error_response_carries_message() {
        let inbound: Inbound =
            serde_json::from_str(r#"{"id": 4, "error": "tesseract missing"}"#).unwrap();
        match inbound {
            Inbound::Response { error, .. } => {
                assert_eq!(error.as_deref(), Some("tesseract missing"));
            }
            Inbound::Event { .. } => panic!("parsed as event"),
        }
    }

    #[test]
    fn event_frame_parses_as_event() {
        let inbound: Inbound =
            serde_json::from_str(r#"{"event": "timer_event", "args": ["Hello", true, 2]}"#)
                .unwrap();
        match inbound {
            Inbound::Event { event, args } => {
                assert_eq!(event, "timer_event");
                assert_eq!(args, vec![json!("Hello"), json!(true), json!(2)]);
            }
            Inbound::Response { .. } => panic!("parsed as response"),
        }
    }
}
