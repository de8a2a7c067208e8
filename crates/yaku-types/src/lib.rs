pub mod types;

pub use types::{AppEvent, FailureStage, Notification, OverlayContent};
