use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::oneshot;
use yaku_bridge::{BridgeError, RemoteBridge};

enum Scripted {
    Ready(Result<Value, BridgeError>),
    Gated(oneshot::Receiver<()>, Result<Value, BridgeError>),
}

/// Bridge double with queued per-procedure results and a call log.
#[derive(Default)]
pub struct MockBridge {
    responses: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockBridge {
    pub fn expect(&self, procedure: &str, result: Result<Value, BridgeError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(procedure.to_string())
            .or_default()
            .push_back(Scripted::Ready(result));
    }

    /// Queue a result that is held back until the gate fires.
    pub fn expect_gated(
        &self,
        procedure: &str,
        result: Result<Value, BridgeError>,
    ) -> oneshot::Sender<()> {
        let (gate_tx, gate_rx) = oneshot::channel();
        self.responses
            .lock()
            .unwrap()
            .entry(procedure.to_string())
            .or_default()
            .push_back(Scripted::Gated(gate_rx, result));
        gate_tx
    }

    pub fn calls_for(&self, procedure: &str) -> Vec<Vec<Value>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == procedure)
            .map(|(_, args)| args.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl RemoteBridge for MockBridge {
    async fn invoke(&self, procedure: &str, args: Vec<Value>) -> Result<Value, BridgeError> {
        self.calls
            .lock()
            .unwrap()
            .push((procedure.to_string(), args));

        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get_mut(procedure)
            .and_then(VecDeque::pop_front);

        match scripted {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Gated(gate, result)) => {
                let _ = gate.await;
                result
            }
            None => Err(BridgeError::RemoteFault(format!(
                "unscripted call to '{procedure}'"
            ))),
        }
    }
}
