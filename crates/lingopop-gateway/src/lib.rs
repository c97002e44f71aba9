use async_trait::async_trait;
use lingopop_types::{ChatMessage, DictionaryEntry, ExampleSentence};

pub mod gemini;

pub use gemini::GeminiClient;

/// Textual content of a successful lookup. Partially populated fields are
/// acceptable; parse success is the only hard requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupResponse {
    pub explanation: String,
    pub examples: Vec<ExampleSentence>,
    pub usage_note: String,
    pub image_prompt: String,
}

/// Generative-AI provider interface: five independent request/response
/// operations, no session state on the provider side.
#[async_trait]
pub trait DictionaryAi: Send + Sync {
    /// Explain a word or phrase in the native language.
    async fn lookup(
        &self,
        text: &str,
        target_lang: &str,
        native_lang: &str,
    ) -> Result<LookupResponse, LookupError>;

    /// Illustrate a concept. Returns a data URI, or `None` on any failure;
    /// an image never fails the surrounding lookup.
    async fn generate_image(&self, prompt: &str) -> Option<String>;

    /// Synthesize speech. Returns headerless signed 16-bit little-endian
    /// PCM; sample rate and channel count are configuration, not part of
    /// the payload.
    async fn synthesize_speech(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechError>;

    /// One chat turn about the entry under discussion. Stateless: the word
    /// context and the prior transcript are re-sent on every call.
    async fn chat(
        &self,
        history: &[ChatMessage],
        message: &str,
        entry: &DictionaryEntry,
    ) -> Result<String, ChatError>;

    /// A short story in the target language built from the saved words,
    /// translation appended.
    async fn generate_story(
        &self,
        words: &[String],
        target_lang: &str,
        native_lang: &str,
    ) -> Result<String, StoryError>;
}

/// Transport-level failure shared by all operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("missing or invalid structured payload: {0}")]
    Payload(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("no audio data in response")]
    NoAudio,

    #[error("invalid audio payload: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("service returned an empty story")]
    Empty,
}
