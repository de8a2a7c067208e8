pub mod language;
pub mod pipeline;

pub use language::{CATALOG, Language, LanguagePair, SelectionError};
pub use pipeline::{CaptureOutcome, CapturePipeline, CaptureRequest, FailureDetail, Phase, TriggerError};
