use std::sync::Arc;

use kanal::AsyncSender;
use lingopop_core::preprocess::normalize_query;
use lingopop_core::view::Session;
use lingopop_gateway::DictionaryAi;
use lingopop_notebook::NotebookStore;
use lingopop_types::{AppEvent, DictionaryEntry, UiUpdate};
use uuid::Uuid;

use crate::render;

/// The primary lookup: fetch text content, publish it immediately, then let
/// the illustration catch up in the background.
pub async fn handle_lookup<A>(
    session: &mut Session,
    store: &NotebookStore,
    gateway: &Arc<A>,
    self_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<UiUpdate>,
    raw: String,
) -> anyhow::Result<()>
where
    A: DictionaryAi + 'static,
{
    let word = normalize_query(&raw);
    if word.is_empty() {
        return Ok(());
    }

    let generation = session.begin_lookup();
    app_to_ui_tx
        .send(UiUpdate::Frame(render::frame(session, store)))
        .await?;

    let target = session.target();
    let native = session.native();

    match gateway.lookup(&word, target.name, native.name).await {
        Ok(content) => {
            let mut entry =
                DictionaryEntry::new(word, target.name.to_string(), native.name.to_string());
            entry.explanation = content.explanation;
            entry.examples = content.examples;
            entry.usage_note = content.usage_note;
            entry.image_prompt = content.image_prompt;

            let entry_id = entry.id;
            let prompt = if entry.image_prompt.is_empty() {
                entry.word.clone()
            } else {
                entry.image_prompt.clone()
            };

            session.publish_entry(entry);

            // Enrichment re-enters the loop as an event tagged with the
            // lookup generation; superseded results get dropped there.
            let gateway = Arc::clone(gateway);
            let tx = self_tx.clone();
            tokio::spawn(async move {
                if let Some(image_url) = gateway.generate_image(&prompt).await {
                    if let Err(e) = tx
                        .send(AppEvent::ImageReady {
                            generation,
                            entry_id,
                            image_url,
                        })
                        .await
                    {
                        tracing::error!("failed to deliver image result: {e}");
                    }
                }
            });
        }
        Err(e) => {
            tracing::error!("lookup failed: {e}");
            app_to_ui_tx
                .send(UiUpdate::Notice(
                    "Oops! Something went wrong searching for that word.".to_string(),
                ))
                .await?;
            session.fail_lookup();
        }
    }

    Ok(())
}

/// Merge a finished illustration into the session and, when the entry was
/// already saved, into the persisted notebook as well.
pub fn handle_image_ready(
    session: &mut Session,
    store: &mut NotebookStore,
    generation: u64,
    entry_id: Uuid,
    image_url: &str,
) {
    if !session.apply_image(generation, entry_id, image_url) {
        tracing::debug!("dropping superseded image for lookup generation {generation}");
        return;
    }

    match store.update_image(entry_id, image_url) {
        Ok(true) => tracing::debug!("notebook entry {entry_id} updated with image"),
        Ok(false) => {}
        Err(e) => tracing::error!("failed to persist image update: {e}"),
    }
}
