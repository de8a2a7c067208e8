use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing_subscriber::EnvFilter;
use yaku_bridge::WsBridge;
use yaku_config::Config;
use yaku_core::{CapturePipeline, LanguagePair};

pub mod controller;
pub mod event_bridge;
pub mod events;
pub mod io;
pub mod overlay;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::event_bridge::EventBridge;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let state = Arc::new(AppState::new(Config::new()));

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    run(state, shutdown).await
}

pub async fn run(state: Arc<AppState>, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let (backend_url, call_timeout, languages) = {
        let config = state.config.read().await;
        let languages = LanguagePair::new(&config.languages.source, &config.languages.target)
            .unwrap_or_else(|e| {
                tracing::warn!("configured languages rejected ({}), using defaults", e);
                LanguagePair::default()
            });
        (
            config.network.backend_url.clone(),
            Duration::from_millis(config.network.call_timeout_ms),
            languages,
        )
    };

    tracing::info!("connecting to backend at {}", backend_url);
    let bridge = Arc::new(WsBridge::connect(&backend_url, call_timeout).await?);
    let pipeline = Arc::new(CapturePipeline::new(bridge.clone(), languages));

    let controller = AppController::new(state.clone()).await;
    let mut toasts = EventBridge::attach(bridge.clone(), controller.ui_sender());
    let mut tasks = controller.spawn_tasks(pipeline);

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::warn!("task exited"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    toasts.detach();
    controller.shutdown();
    Ok(())
}
