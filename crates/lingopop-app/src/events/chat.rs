use kanal::AsyncSender;
use lingopop_core::view::Session;
use lingopop_gateway::DictionaryAi;
use lingopop_notebook::NotebookStore;
use lingopop_types::{ChatMessage, UiUpdate};

use crate::render;

/// One chat turn about the entry on display. Failures never break the
/// conversation; they appear as a scripted reply in the transcript.
pub async fn handle_chat_send<A>(
    session: &mut Session,
    store: &NotebookStore,
    gateway: &A,
    app_to_ui_tx: &AsyncSender<UiUpdate>,
    message: String,
) -> anyhow::Result<()>
where
    A: DictionaryAi + ?Sized,
{
    let message = message.trim().to_string();
    if message.is_empty() {
        return Ok(());
    }
    let Some(entry) = session.current_entry().cloned() else {
        return Ok(());
    };

    // context is re-sent every call; the new message rides separately
    let history = session.transcript().to_vec();
    session.push_chat(ChatMessage::user(message.clone()));
    app_to_ui_tx
        .send(UiUpdate::Frame(render::frame(session, store)))
        .await?;

    let reply = match gateway.chat(&history, &message, &entry).await {
        Ok(text) if text.is_empty() => "I'm speechless!".to_string(),
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("chat turn failed: {e}");
            "Sorry, I got a bit confused. Try again?".to_string()
        }
    };

    session.push_chat(ChatMessage::assistant(reply));
    Ok(())
}
