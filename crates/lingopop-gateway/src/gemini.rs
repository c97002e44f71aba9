use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use lingopop_config::gateway::GatewayConfig;
use lingopop_types::{ChatMessage, DictionaryEntry, ExampleSentence, Speaker};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    ApiError, ChatError, DictionaryAi, LookupError, LookupResponse, SpeechError, StoryError,
};

/// Client for the Generative Language REST API.
///
/// All five operations go through `models/{model}:generateContent`; the
/// request and response shapes stay private to this module.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GeminiClient {
    pub fn new(config: GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, config }
    }

    async fn generate(&self, model: &str, body: &Value) -> Result<GenerateContentResponse, ApiError> {
        let url = format!("{}/models/{}:generateContent", self.config.api_base, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        // read as text first so HTTP errors keep their body
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Service {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl DictionaryAi for GeminiClient {
    async fn lookup(
        &self,
        text: &str,
        target_lang: &str,
        native_lang: &str,
    ) -> Result<LookupResponse, LookupError> {
        let body = lookup_request(text, target_lang, native_lang);
        let response = self.generate(&self.config.text_model, &body).await?;

        let payload = response
            .first_text()
            .ok_or_else(|| LookupError::Payload("no text part in response".to_string()))?;

        let parsed: LookupPayload = serde_json::from_str(payload)
            .map_err(|e| LookupError::Payload(e.to_string()))?;

        Ok(LookupResponse {
            explanation: parsed.explanation,
            examples: parsed.examples,
            usage_note: parsed.usage_note,
            image_prompt: parsed.image_prompt,
        })
    }

    async fn generate_image(&self, prompt: &str) -> Option<String> {
        let body = image_request(prompt);

        match self.generate(&self.config.image_model, &body).await {
            Ok(response) => response.first_inline_data().map(|data| {
                let mime = data.mime_type.as_deref().unwrap_or("image/png");
                format!("data:{};base64,{}", mime, data.data)
            }),
            Err(e) => {
                tracing::warn!("image generation failed: {e}");
                None
            }
        }
    }

    async fn synthesize_speech(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechError> {
        let body = speech_request(text, voice);
        let response = self.generate(&self.config.tts_model, &body).await?;

        let audio = response.first_inline_data().ok_or(SpeechError::NoAudio)?;

        BASE64
            .decode(audio.data.as_bytes())
            .map_err(|e| SpeechError::Decode(e.to_string()))
    }

    async fn chat(
        &self,
        history: &[ChatMessage],
        message: &str,
        entry: &DictionaryEntry,
    ) -> Result<String, ChatError> {
        let body = chat_request(history, message, entry);
        let response = self.generate(&self.config.text_model, &body).await?;

        Ok(response.first_text().unwrap_or_default().trim().to_string())
    }

    async fn generate_story(
        &self,
        words: &[String],
        target_lang: &str,
        native_lang: &str,
    ) -> Result<String, StoryError> {
        let body = story_request(words, target_lang, native_lang);
        let response = self.generate(&self.config.text_model, &body).await?;

        match response.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Err(StoryError::Empty),
        }
    }
}

// --- request bodies ---

fn lookup_request(text: &str, target_lang: &str, native_lang: &str) -> Value {
    let prompt = format!(
        "Act as a cool, modern dictionary.\n\
         User Input: \"{text}\"\n\
         Target Language: {target_lang}\n\
         Native Language: {native_lang}\n\n\
         Provide:\n\
         1. Natural explanation in {native_lang}.\n\
         2. Two example sentences (target & native).\n\
         3. A \"usageNote\": Explain it like a friend. Mention cultural context, slang, \
         if it's rude/polite, or common mix-ups. Be brief, witty, and direct. NO textbook style.\n\
         4. An \"imagePrompt\" to visualize this concept effectively."
    );

    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "explanation": { "type": "STRING" },
                    "examples": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "target": { "type": "STRING" },
                                "native": { "type": "STRING" }
                            }
                        }
                    },
                    "usageNote": { "type": "STRING" },
                    "imagePrompt": { "type": "STRING" }
                },
                "required": ["explanation", "examples", "usageNote", "imagePrompt"]
            }
        }
    })
}

fn image_request(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "imageConfig": { "aspectRatio": "1:1" }
        }
    })
}

fn speech_request(text: &str, voice: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": text }] }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": voice }
                }
            }
        }
    })
}

fn chat_request(history: &[ChatMessage], message: &str, entry: &DictionaryEntry) -> Value {
    let preamble = format!(
        "We are discussing the word/phrase: \"{}\" (Target: {}).\n\
         Here is the definition I have: {}.\n\
         Usage note: {}.\n\
         Answer my future questions briefly and fun, like a language tutor buddy.",
        entry.word, entry.target_language, entry.explanation, entry.usage_note
    );

    let mut contents = vec![
        json!({ "role": "user", "parts": [{ "text": preamble }] }),
        json!({ "role": "model", "parts": [{ "text": "Got it! I'm ready to chat about this word. What's up?" }] }),
    ];

    for turn in history {
        let role = match turn.speaker {
            Speaker::User => "user",
            Speaker::Assistant => "model",
        };
        contents.push(json!({ "role": role, "parts": [{ "text": turn.text }] }));
    }

    contents.push(json!({ "role": "user", "parts": [{ "text": message }] }));

    json!({ "contents": contents })
}

fn story_request(words: &[String], target_lang: &str, native_lang: &str) -> Value {
    let word_list = words.join(", ");
    let prompt = format!(
        "Create a short, funny, and coherent story in {target_lang} using these words: {word_list}.\n\
         Also provide the translation in {native_lang} after the story.\n\
         Keep it simple, suitable for a language learner.\n\
         Highlight the key words in the text if possible (using markdown bold)."
    );

    json!({ "contents": [{ "parts": [{ "text": prompt }] }] })
}

// --- response shapes ---

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.as_deref())
    }

    fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.inline_data.as_ref())
    }
}

/// Structured lookup output as the model emits it.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LookupPayload {
    explanation: String,
    examples: Vec<ExampleSentence>,
    usage_note: String,
    image_prompt: String,
}

fn extract_error_message(body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    if trimmed.len() > 400 {
        let mut cut = 400;
        while !trimmed.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &trimmed[..cut])
    } else {
        trimmed.to_string()
    }
}
