use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// User picked a new source language for the next capture.
    SetSourceLanguage(String),
    /// User picked a new target language for the next capture.
    SetTargetLanguage(String),
    /// User pressed the capture button.
    TriggerCapture,
    /// User closed the overlay; the pipeline may return to idle.
    DismissOverlay,
    /// Terminal pipeline result, ready for the presenter.
    ShowOverlay(OverlayContent),
    /// Progress line for the capture button area.
    CaptureStatus { status: String, capturing: bool },
    /// Transient toast-style message, fire and forget.
    Notify(Notification),
    /// Stop the presenter loop.
    Close,
}

/// What the overlay renders once a capture run reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayContent {
    Translation { text: String },
    Failure { stage: FailureStage, message: String },
}

/// Which leg of the capture run failed, so the user knows what to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureStage {
    Ocr,
    Translation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}
