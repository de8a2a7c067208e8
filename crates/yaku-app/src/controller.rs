use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use yaku_bridge::RemoteBridge;
use yaku_core::CapturePipeline;
use yaku_types::AppEvent;

use crate::events::event_loop;
use crate::io::input_loop;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(ui_capacity: usize, app_capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(ui_capacity),  // notification bursts
            ui_to_app: kanal::bounded_async(app_capacity), // user interactions
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    cancel_token: CancellationToken,
}

impl AppController {
    pub async fn new(state: Arc<AppState>) -> Self {
        let (ui_capacity, app_capacity) = {
            let config = state.config.read().await;
            (config.ui_channel_capacity, config.app_channel_capacity)
        };

        Self {
            channels: ChannelSet::new(ui_capacity, app_capacity),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sync-side sender into the presenter channel, for components that
    /// must not block the thread they are called on.
    pub fn ui_sender(&self) -> kanal::Sender<AppEvent> {
        self.channels.app_to_ui.0.clone_sync()
    }

    pub fn spawn_tasks<B>(&self, pipeline: Arc<CapturePipeline<B>>) -> JoinSet<anyhow::Result<()>>
    where
        B: RemoteBridge + ?Sized + 'static,
    {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            pipeline,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // Presenter loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.cancel_token.child_token(),
        ));

        // Stdin command reader standing in for the panel UI
        tasks.spawn(input_loop(
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
