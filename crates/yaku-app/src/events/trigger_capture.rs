use std::sync::Arc;

use kanal::AsyncSender;
use yaku_bridge::RemoteBridge;
use yaku_core::{CaptureOutcome, CapturePipeline, FailureDetail, TriggerError};
use yaku_types::{AppEvent, FailureStage, OverlayContent};

/// Start a capture run without blocking the event loop.
///
/// The run itself is spawned; the pipeline's busy guard keeps a second
/// rapid trigger from starting an overlapping chain.
pub fn handle_capture_trigger<B>(
    pipeline: &Arc<CapturePipeline<B>>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) where
    B: RemoteBridge + ?Sized + 'static,
{
    let pipeline = pipeline.clone();
    let tx = app_to_ui_tx.clone();

    tokio::spawn(async move {
        let _ = tx
            .send(AppEvent::CaptureStatus {
                status: "Capturing screen...".to_string(),
                capturing: true,
            })
            .await;

        match pipeline.trigger().await {
            Ok(outcome) => {
                let _ = tx.send(AppEvent::ShowOverlay(overlay_content(outcome))).await;
                let _ = tx
                    .send(AppEvent::CaptureStatus {
                        status: "Ready".to_string(),
                        capturing: false,
                    })
                    .await;
            }
            Err(TriggerError::PipelineBusy) => {
                let _ = tx
                    .send(AppEvent::CaptureStatus {
                        status: "Capture already in progress".to_string(),
                        capturing: true,
                    })
                    .await;
            }
        }
    });
}

fn overlay_content(outcome: CaptureOutcome) -> OverlayContent {
    match outcome {
        CaptureOutcome::Succeeded { translated_text } => OverlayContent::Translation {
            text: translated_text,
        },
        CaptureOutcome::Failed(detail) => {
            let stage = match &detail {
                FailureDetail::OcrFailure(_) => FailureStage::Ocr,
                FailureDetail::TranslationFailure(_) => FailureStage::Translation,
            };
            OverlayContent::Failure {
                stage,
                message: detail.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use yaku_bridge::BridgeError;

    use super::*;

    #[test]
    fn success_maps_to_translation_content() {
        let content = overlay_content(CaptureOutcome::Succeeded {
            translated_text: "Привет".to_string(),
        });
        assert_eq!(
            content,
            OverlayContent::Translation {
                text: "Привет".to_string()
            }
        );
    }

    #[test]
    fn failures_keep_their_stage() {
        let ocr = overlay_content(CaptureOutcome::Failed(FailureDetail::OcrFailure(
            BridgeError::Timeout,
        )));
        assert!(matches!(
            ocr,
            OverlayContent::Failure {
                stage: FailureStage::Ocr,
                ..
            }
        ));

        let translation = overlay_content(CaptureOutcome::Failed(
            FailureDetail::TranslationFailure(BridgeError::RemoteFault("quota".to_string())),
        ));
        match translation {
            OverlayContent::Failure { stage, message } => {
                assert_eq!(stage, FailureStage::Translation);
                assert!(message.contains("quota"));
            }
            OverlayContent::Translation { .. } => panic!("expected a failure"),
        }
    }
}
