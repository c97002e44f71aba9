use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One example sentence pair inside a dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub target: String,
    pub native: String,
}

/// A looked-up word with its generated content.
///
/// Created once per successful lookup. The only mutation after creation is
/// `image_url`, filled in when the background illustration arrives. Notebook
/// identity is the `word` field, not `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: Uuid,
    pub word: String,
    pub target_language: String,
    pub native_language: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<ExampleSentence>,
    #[serde(default)]
    pub usage_note: String,
    #[serde(default)]
    pub image_prompt: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Creation time, unix milliseconds.
    pub created_at: u64,
}

impl DictionaryEntry {
    pub fn new(word: String, target_language: String, native_language: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            word,
            target_language,
            native_language,
            explanation: String::new(),
            examples: Vec::new(),
            usage_note: String::new(),
            image_prompt: String::new(),
            image_url: None,
            created_at: unix_millis(),
        }
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Assistant,
}

/// One turn of the per-entry chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Events carried on the app channels.
#[derive(Debug, Clone)]
pub enum AppEvent {
    NativeSelected(String),
    TargetSelected(String),
    /// Leave setup for the search screen.
    Begin,
    Lookup(String),
    /// Background illustration finished for the lookup issued at `generation`.
    ImageReady {
        generation: u64,
        entry_id: Uuid,
        image_url: String,
    },
    SaveWord,
    Speak(String),
    ChatSend(String),
    StoryTime,
    OpenNotebook,
    OpenEntry(usize),
    OpenFlashcards,
    NextCard,
    PrevCard,
    FlipCard,
    Back,
    Quit,
}

/// Messages from the app loop to the display side.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Frame(String),
    Notice(String),
    Shutdown,
}
