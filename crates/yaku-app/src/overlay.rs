use yaku_types::{FailureStage, OverlayContent};

/// Renders terminal capture results until the user dismisses them.
///
/// At most one overlay is visible; showing again replaces the content
/// rather than stacking.
#[derive(Default)]
pub struct OverlayPresenter {
    visible: Option<OverlayContent>,
}

impl OverlayPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, content: OverlayContent) {
        tracing::info!("[OVERLAY] {}", render(&content));
        self.visible = Some(content);
    }

    /// Hide the overlay; no effect when nothing is shown.
    pub fn dismiss(&mut self) -> bool {
        self.visible.take().is_some()
    }

    pub fn visible(&self) -> Option<&OverlayContent> {
        self.visible.as_ref()
    }
}

fn render(content: &OverlayContent) -> String {
    match content {
        OverlayContent::Translation { text } if text.is_empty() => {
            "No text found on screen".to_string()
        }
        OverlayContent::Translation { text } => text.clone(),
        OverlayContent::Failure { stage, message } => match stage {
            FailureStage::Ocr => format!("Screen capture failed: {message}"),
            FailureStage::Translation => format!("Translation failed: {message}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(text: &str) -> OverlayContent {
        OverlayContent::Translation {
            text: text.to_string(),
        }
    }

    #[test]
    fn show_replaces_instead_of_stacking() {
        let mut overlay = OverlayPresenter::new();
        overlay.show(translation("first"));
        overlay.show(translation("second"));

        assert_eq!(overlay.visible(), Some(&translation("second")));
        assert!(overlay.dismiss());
        assert!(overlay.visible().is_none());
    }

    #[test]
    fn dismiss_without_overlay_is_a_noop() {
        let mut overlay = OverlayPresenter::new();
        assert!(!overlay.dismiss());
    }

    #[test]
    fn failure_stages_render_distinct_messages() {
        let ocr = render(&OverlayContent::Failure {
            stage: FailureStage::Ocr,
            message: "backend fault: no display".to_string(),
        });
        let translation = render(&OverlayContent::Failure {
            stage: FailureStage::Translation,
            message: "remote call timed out".to_string(),
        });

        assert!(ocr.starts_with("Screen capture failed"));
        assert!(translation.starts_with("Translation failed"));
        assert_ne!(ocr, translation);
    }

    #[test]
    fn empty_translation_renders_nothing_to_translate() {
        assert_eq!(render(&translation("")), "No text found on screen");
    }
}
