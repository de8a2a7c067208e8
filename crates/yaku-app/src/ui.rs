use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use yaku_types::AppEvent;

use crate::overlay::OverlayPresenter;

/// Presenter loop: owns the overlay and renders everything the app
/// side sends to the user.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut overlay = OverlayPresenter::new();

    loop {
        let event = tokio::select! {
            event = app_to_ui_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        match event {
            AppEvent::ShowOverlay(content) => overlay.show(content),
            AppEvent::DismissOverlay => {
                overlay.dismiss();
            }
            AppEvent::Notify(note) => {
                tracing::info!("[TOAST] {}: {}", note.title, note.body);
            }
            AppEvent::CaptureStatus { status, capturing } => {
                tracing::info!("capture status: {} (capturing: {})", status, capturing);
            }
            AppEvent::Close => break,
            // App-bound events have no business on this channel.
            _ => {}
        }
    }

    tracing::info!("presenter loop stopped");
    Ok(())
}
