use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lingopop_core::view::Session;
use lingopop_gateway::DictionaryAi;
use lingopop_notebook::NotebookStore;
use lingopop_types::{AppEvent, UiUpdate};

use crate::render;
use crate::state::AppState;

pub mod chat;
pub mod lookup;
pub mod speak;
pub mod story;

/// App's main loop. Owns the session and the notebook outright; every
/// mutation, including results from spawned enrichment tasks, comes back
/// through the event channel.
pub async fn event_loop<A>(
    state: Arc<AppState>,
    gateway: Arc<A>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    self_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<UiUpdate>,
) -> anyhow::Result<()>
where
    A: DictionaryAi + 'static,
{
    let (notebook_path, native_code, target_code) = {
        let config = state.config.read().await;
        (
            config.storage.notebook_path.clone(),
            config.native_lang.clone(),
            config.target_lang.clone(),
        )
    };

    let mut store = NotebookStore::load(notebook_path);
    tracing::info!("notebook loaded with {} entries", store.len());

    let mut session = Session::new();
    if let Some(code) = native_code.as_deref() {
        if !session.select_native(code) {
            tracing::warn!("unknown native language code: {code}");
        }
    }
    if let Some(code) = target_code.as_deref() {
        if !session.select_target(code) {
            tracing::warn!("unknown or conflicting target language code: {code}");
        }
    }
    // both languages preconfigured: skip the setup screen
    if native_code.is_some() && target_code.is_some() {
        session.begin();
    }

    app_to_ui_tx
        .send(UiUpdate::Frame(render::frame(&session, &store)))
        .await?;

    loop {
        let event = ui_to_app_rx.recv().await?;

        if matches!(event, AppEvent::Quit) {
            tracing::info!("quit requested");
            let _ = app_to_ui_tx.send(UiUpdate::Shutdown).await;
            return Ok(());
        }

        handle_event(
            &state,
            &gateway,
            &mut session,
            &mut store,
            &self_tx,
            &app_to_ui_tx,
            event,
        )
        .await?;

        app_to_ui_tx
            .send(UiUpdate::Frame(render::frame(&session, &store)))
            .await?;
    }
}

async fn handle_event<A>(
    state: &Arc<AppState>,
    gateway: &Arc<A>,
    session: &mut Session,
    store: &mut NotebookStore,
    self_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<UiUpdate>,
    event: AppEvent,
) -> anyhow::Result<()>
where
    A: DictionaryAi + 'static,
{
    match event {
        AppEvent::NativeSelected(code) => {
            if !session.select_native(&code) {
                app_to_ui_tx
                    .send(UiUpdate::Notice(format!("Unknown language: {code}")))
                    .await?;
            }
        }
        AppEvent::TargetSelected(code) => {
            if !session.select_target(&code) {
                app_to_ui_tx
                    .send(UiUpdate::Notice(format!(
                        "Can't learn {code}: unknown code or same as your native language"
                    )))
                    .await?;
            }
        }
        AppEvent::Begin => {
            session.begin();
        }
        AppEvent::Lookup(text) => {
            lookup::handle_lookup(session, store, gateway, self_tx, app_to_ui_tx, text).await?;
        }
        AppEvent::ImageReady {
            generation,
            entry_id,
            image_url,
        } => {
            lookup::handle_image_ready(session, store, generation, entry_id, &image_url);
        }
        AppEvent::SaveWord => {
            if let Some(entry) = session.current_entry().cloned() {
                match store.insert(entry) {
                    Ok(true) => {
                        app_to_ui_tx
                            .send(UiUpdate::Notice("Saved to notebook".to_string()))
                            .await?;
                    }
                    Ok(false) => {
                        app_to_ui_tx
                            .send(UiUpdate::Notice("Already in your notebook".to_string()))
                            .await?;
                    }
                    Err(e) => {
                        tracing::error!("failed to persist notebook: {e}");
                        app_to_ui_tx
                            .send(UiUpdate::Notice("Could not save that word".to_string()))
                            .await?;
                    }
                }
            }
        }
        AppEvent::Speak(text) => {
            let text = if text.trim().is_empty() {
                session
                    .current_entry()
                    .map(|e| e.word.clone())
                    .unwrap_or_default()
            } else {
                text
            };
            if !text.is_empty() {
                let audio = state.config.read().await.audio;
                speak::spawn_speak(gateway, audio, text, session.target().voice);
            }
        }
        AppEvent::ChatSend(message) => {
            chat::handle_chat_send(session, store, gateway.as_ref(), app_to_ui_tx, message)
                .await?;
        }
        AppEvent::StoryTime => {
            story::handle_story_time(session, store, gateway.as_ref(), app_to_ui_tx).await?;
        }
        AppEvent::OpenNotebook => {
            session.open_notebook();
        }
        AppEvent::OpenEntry(index) => {
            if let Some(entry) = store.get(index) {
                session.open_entry(entry.clone());
            } else {
                app_to_ui_tx
                    .send(UiUpdate::Notice("No such notebook entry".to_string()))
                    .await?;
            }
        }
        AppEvent::OpenFlashcards => {
            if !session.open_flashcards(store.len()) {
                app_to_ui_tx
                    .send(UiUpdate::Notice(
                        "Save a word before studying".to_string(),
                    ))
                    .await?;
            }
        }
        AppEvent::NextCard => {
            session.next_card(store.len());
        }
        AppEvent::PrevCard => {
            session.prev_card();
        }
        AppEvent::FlipCard => {
            session.flip_card();
        }
        AppEvent::Back => {
            session.back();
        }
        AppEvent::Quit => {
            // handled by the caller
        }
    }

    Ok(())
}
