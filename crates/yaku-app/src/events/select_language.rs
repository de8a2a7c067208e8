use std::sync::Arc;

use kanal::AsyncSender;
use yaku_bridge::RemoteBridge;
use yaku_core::CapturePipeline;
use yaku_types::{AppEvent, Notification};

#[derive(Debug, Clone, Copy)]
pub enum LanguageSide {
    Source,
    Target,
}

/// Apply a language selection; rejected codes never reach the pipeline
/// run, the prior selection stays active.
pub async fn handle_language_select<B>(
    pipeline: &Arc<CapturePipeline<B>>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    side: LanguageSide,
    code: &str,
) -> anyhow::Result<()>
where
    B: RemoteBridge + ?Sized,
{
    let result = match side {
        LanguageSide::Source => pipeline.set_source(code),
        LanguageSide::Target => pipeline.set_target(code),
    };

    match result {
        Ok(()) => {
            let languages = pipeline.languages();
            tracing::info!(
                "language selection now {} -> {}",
                languages.source(),
                languages.target()
            );
        }
        Err(e) => {
            tracing::warn!("language selection rejected: {}", e);
            let _ = app_to_ui_tx
                .send(AppEvent::Notify(Notification {
                    title: "Unknown language".to_string(),
                    body: e.to_string(),
                }))
                .await;
        }
    }

    Ok(())
}
