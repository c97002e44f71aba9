use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lingopop_gateway::DictionaryAi;
use lingopop_types::{AppEvent, UiUpdate};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_ui: (AsyncSender<UiUpdate>, AsyncReceiver<UiUpdate>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            ui_to_app: kanal::bounded_async(64),   // user commands and task results
            app_to_ui: kanal::bounded_async(256),  // frames and notices
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks<A>(&self, gateway: Arc<A>) -> JoinSet<anyhow::Result<()>>
    where
        A: DictionaryAi + 'static,
    {
        let mut tasks = JoinSet::new();

        // Event loop; background tasks feed results back through the
        // ui_to_app sender, so the loop stays the only state writer.
        tasks.spawn(event_loop(
            self.state.clone(),
            gateway,
            self.channels.ui_to_app.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // Display loop
        tasks.spawn(ui_loop(self.channels.app_to_ui.1.clone()));

        // Command input
        tasks.spawn(watcher_io(
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
