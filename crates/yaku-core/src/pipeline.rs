use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use uuid::Uuid;
use yaku_bridge::{BridgeError, RemoteBridge, procs};

use crate::language::{LanguagePair, SelectionError};

/// Where a capture run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Capturing,
    Translating,
    Succeeded,
    Failed,
}

/// One capture run, created on trigger and discarded on dismissal.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub id: Uuid,
    /// Language selection as it stood at trigger time. Later selection
    /// changes never affect a request already in flight.
    pub languages: LanguagePair,
    pub phase: Phase,
    pub extracted_text: Option<String>,
    pub outcome: Option<CaptureOutcome>,
}

#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    Succeeded { translated_text: String },
    Failed(FailureDetail),
}

/// Which leg of the run failed, wrapping the bridge-level cause.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FailureDetail {
    #[error("text recognition failed: {0}")]
    OcrFailure(#[source] BridgeError),

    #[error("translation failed: {0}")]
    TranslationFailure(#[source] BridgeError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    #[error("a capture is already in flight")]
    PipelineBusy,
}

/// The capture -> OCR -> translate state machine.
///
/// `Idle -> Capturing -> Translating -> {Succeeded, Failed} -> Idle`,
/// with at most one request in flight: a trigger during
/// Capturing/Translating is rejected with [`TriggerError::PipelineBusy`]
/// and leaves the running request untouched. There is no mid-flight
/// cancellation and no automatic retry; a failed run is re-triggered by
/// the user.
pub struct CapturePipeline<B: ?Sized> {
    bridge: Arc<B>,
    languages: RwLock<LanguagePair>,
    current: Mutex<Option<CaptureRequest>>,
    in_flight: AtomicBool,
}

impl<B: RemoteBridge + ?Sized> CapturePipeline<B> {
    pub fn new(bridge: Arc<B>, languages: LanguagePair) -> Self {
        Self {
            bridge,
            languages: RwLock::new(languages),
            current: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Change the source language for subsequent triggers.
    pub fn set_source(&self, code: &str) -> Result<(), SelectionError> {
        self.languages.write().unwrap().set_source(code)
    }

    /// Change the target language for subsequent triggers.
    pub fn set_target(&self, code: &str) -> Result<(), SelectionError> {
        self.languages.write().unwrap().set_target(code)
    }

    pub fn languages(&self) -> LanguagePair {
        self.languages.read().unwrap().clone()
    }

    pub fn phase(&self) -> Phase {
        self.current
            .lock()
            .unwrap()
            .as_ref()
            .map(|req| req.phase)
            .unwrap_or(Phase::Idle)
    }

    /// Snapshot of the current request, for status display.
    pub fn current_request(&self) -> Option<CaptureRequest> {
        self.current.lock().unwrap().clone()
    }

    /// Start a capture run and drive it to its terminal state.
    ///
    /// Rejected while another run is in flight. An unconsumed terminal
    /// request is discarded; its result already reached the presenter.
    pub async fn trigger(&self) -> Result<CaptureOutcome, TriggerError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::warn!("capture trigger rejected, pipeline busy");
            return Err(TriggerError::PipelineBusy);
        }

        let languages = self.languages.read().unwrap().clone();
        let request = CaptureRequest {
            id: Uuid::new_v4(),
            languages: languages.clone(),
            phase: Phase::Capturing,
            extracted_text: None,
            outcome: None,
        };
        let id = request.id;
        *self.current.lock().unwrap() = Some(request);

        tracing::info!(
            "capture {} started ({} -> {})",
            id,
            languages.source(),
            languages.target()
        );

        let outcome = self.run(id, &languages).await;
        self.finish(id, outcome.clone());
        self.in_flight.store(false, Ordering::Release);

        Ok(outcome)
    }

    /// Consume a terminal result, returning the pipeline to Idle.
    ///
    /// No-op while Idle or in flight: a running request cannot be
    /// cancelled, it always reaches Succeeded or Failed first.
    pub fn dismiss(&self) -> bool {
        let mut current = self.current.lock().unwrap();
        match current.as_ref().map(|req| req.phase) {
            Some(Phase::Succeeded) | Some(Phase::Failed) => {
                tracing::debug!("capture result consumed, pipeline idle");
                *current = None;
                true
            }
            _ => false,
        }
    }

    async fn run(&self, id: Uuid, languages: &LanguagePair) -> CaptureOutcome {
        let text = match procs::capture_screen_text(self.bridge.as_ref()).await {
            Ok(text) => text,
            Err(cause) => {
                tracing::warn!("capture {} failed during OCR: {}", id, cause);
                return CaptureOutcome::Failed(FailureDetail::OcrFailure(cause));
            }
        };

        // OCR finding nothing is a successful run with nothing to
        // translate, not a pipeline fault.
        if text.trim().is_empty() {
            tracing::info!("capture {} found no text", id);
            return CaptureOutcome::Succeeded {
                translated_text: String::new(),
            };
        }

        self.advance_to_translating(id, text.clone());

        match procs::translate_text(
            self.bridge.as_ref(),
            &text,
            languages.source(),
            languages.target(),
        )
        .await
        {
            Ok(translated_text) => CaptureOutcome::Succeeded { translated_text },
            Err(cause) => {
                tracing::warn!("capture {} failed during translation: {}", id, cause);
                CaptureOutcome::Failed(FailureDetail::TranslationFailure(cause))
            }
        }
    }

    fn advance_to_translating(&self, id: Uuid, extracted: String) {
        let mut current = self.current.lock().unwrap();
        match current.as_mut() {
            Some(req) if req.id == id => {
                req.extracted_text = Some(extracted);
                req.phase = Phase::Translating;
            }
            _ => tracing::debug!("discarding stale OCR result for request {}", id),
        }
    }

    fn finish(&self, id: Uuid, outcome: CaptureOutcome) {
        let mut current = self.current.lock().unwrap();
        match current.as_mut() {
            Some(req) if req.id == id => {
                req.phase = match outcome {
                    CaptureOutcome::Succeeded { .. } => Phase::Succeeded,
                    CaptureOutcome::Failed(_) => Phase::Failed,
                };
                req.outcome = Some(outcome);
            }
            _ => tracing::debug!("discarding stale result for request {}", id),
        }
    }
}
