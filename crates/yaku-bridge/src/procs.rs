//! Typed wrappers for the remote procedures the backend exposes.
//!
//! The OCR payload arrives in whatever shape the backend's capture step
//! produced; it is collapsed to a plain string here so nothing
//! loosely-typed travels further into the app.

use serde_json::{Value, json};

use crate::{BridgeError, RemoteBridge};

const GET_SCREENSHOT_WITH_OCR: &str = "get_screenshot_with_ocr";
const TRANSLATE_TEXT: &str = "translate_text";

/// Capture the screen and run OCR on it, returning the extracted text.
///
/// An empty string means the capture worked but no text was found.
pub async fn capture_screen_text<B>(bridge: &B) -> Result<String, BridgeError>
where
    B: RemoteBridge + ?Sized,
{
    let payload = bridge.invoke(GET_SCREENSHOT_WITH_OCR, Vec::new()).await?;
    collapse_ocr_payload(payload)
}

/// Translate `text` between two catalog language codes.
pub async fn translate_text<B>(
    bridge: &B,
    text: &str,
    source: &str,
    target: &str,
) -> Result<String, BridgeError>
where
    B: RemoteBridge + ?Sized,
{
    let payload = bridge
        .invoke(
            TRANSLATE_TEXT,
            vec![json!(text), json!(source), json!(target)],
        )
        .await?;

    payload
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BridgeError::RemoteFault("translation result was not a string".to_string()))
}

fn collapse_ocr_payload(payload: Value) -> Result<String, BridgeError> {
    match payload {
        Value::String(text) => Ok(text),
        Value::Object(map) => {
            if map.get("success").and_then(Value::as_bool) == Some(true) {
                map.get("text")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        BridgeError::RemoteFault("screenshot result missing text".to_string())
                    })
            } else {
                let message = map
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("screen capture failed");
                Err(BridgeError::RemoteFault(message.to_string()))
            }
        }
        other => Err(BridgeError::RemoteFault(format!(
            "unexpected screenshot result: {other}"
        ))),
    }
}
