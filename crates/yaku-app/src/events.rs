use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use yaku_bridge::RemoteBridge;
use yaku_core::CapturePipeline;
use yaku_types::AppEvent;

pub mod dismiss_overlay;
pub mod select_language;
pub mod trigger_capture;

use dismiss_overlay::handle_overlay_dismiss;
use select_language::{LanguageSide, handle_language_select};
use trigger_capture::handle_capture_trigger;

/// App's main loop
pub async fn event_loop<B>(
    pipeline: Arc<CapturePipeline<B>>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    B: RemoteBridge + ?Sized + 'static,
{
    tracing::info!("event loop started, waiting for user actions");
    loop {
        let event = ui_to_app_rx.recv().await?;
        handle_event(&pipeline, &app_to_ui_tx, event).await?;
    }
}

async fn handle_event<B>(
    pipeline: &Arc<CapturePipeline<B>>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()>
where
    B: RemoteBridge + ?Sized + 'static,
{
    match event {
        AppEvent::SetSourceLanguage(code) => {
            handle_language_select(pipeline, app_to_ui_tx, LanguageSide::Source, &code).await?;
        }
        AppEvent::SetTargetLanguage(code) => {
            handle_language_select(pipeline, app_to_ui_tx, LanguageSide::Target, &code).await?;
        }
        AppEvent::TriggerCapture => {
            handle_capture_trigger(pipeline, app_to_ui_tx);
        }
        AppEvent::DismissOverlay => {
            handle_overlay_dismiss(pipeline, app_to_ui_tx).await?;
        }
        AppEvent::Close => {
            let _ = app_to_ui_tx.send(AppEvent::Close).await;
        }
        // Presenter-bound events have no business on this channel.
        _ => {}
    }

    Ok(())
}
