use kanal::AsyncSender;
use lingopop_core::view::Session;
use lingopop_gateway::{DictionaryAi, StoryError};
use lingopop_notebook::NotebookStore;
use lingopop_types::UiUpdate;

use crate::render;

/// Weave the saved words into a short story. Needs at least two saved
/// entries; failures degrade to a scripted apology, never an error screen.
pub async fn handle_story_time<A>(
    session: &mut Session,
    store: &NotebookStore,
    gateway: &A,
    app_to_ui_tx: &AsyncSender<UiUpdate>,
) -> anyhow::Result<()>
where
    A: DictionaryAi + ?Sized,
{
    if !session.open_story(store.len()) {
        app_to_ui_tx
            .send(UiUpdate::Notice(
                "Save at least two words to unlock story mode".to_string(),
            ))
            .await?;
        return Ok(());
    }

    app_to_ui_tx
        .send(UiUpdate::Frame(render::frame(session, store)))
        .await?;

    let words = store.words();
    let story = match gateway
        .generate_story(&words, session.target().name, session.native().name)
        .await
    {
        Ok(text) => text,
        Err(StoryError::Empty) => "Could not generate story.".to_string(),
        Err(e) => {
            tracing::warn!("story generation failed: {e}");
            "Sorry, couldn't write a story right now.".to_string()
        }
    };

    session.story_ready(story);
    Ok(())
}
