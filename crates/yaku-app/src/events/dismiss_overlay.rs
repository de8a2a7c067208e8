use std::sync::Arc;

use kanal::AsyncSender;
use yaku_bridge::RemoteBridge;
use yaku_core::CapturePipeline;
use yaku_types::AppEvent;

/// Consume the terminal result and hide the overlay.
pub async fn handle_overlay_dismiss<B>(
    pipeline: &Arc<CapturePipeline<B>>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    B: RemoteBridge + ?Sized,
{
    if pipeline.dismiss() {
        tracing::debug!("capture result dismissed");
    }
    let _ = app_to_ui_tx.send(AppEvent::DismissOverlay).await;
    Ok(())
}
