use lingopop_types::{ChatMessage, DictionaryEntry};
use uuid::Uuid;

use crate::registry::{self, Language};

/// One variant per screen; each carries only what that screen needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Setup,
    Search,
    Result { loading: bool },
    Notebook,
    Story { loading: bool },
    Flashcards { index: usize, flipped: bool },
}

/// Transient per-session state: the active screen, selected languages, the
/// entry on display, the chat transcript and the generated story.
///
/// All transitions go through methods here; nothing outside this type flips
/// the view. The saved notebook lives elsewhere: `current_entry` may be a
/// fresh lookup result or a copy of a saved entry.
pub struct Session {
    view: View,
    native: Language,
    target: Language,
    current_entry: Option<DictionaryEntry>,
    transcript: Vec<ChatMessage>,
    story: Option<String>,
    /// Bumped on every lookup; image results carry the generation they were
    /// issued under so superseded ones can be dropped.
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::with_languages(registry::default_native(), registry::default_target())
    }

    pub fn with_languages(native: Language, target: Language) -> Self {
        Self {
            view: View::Setup,
            native,
            target,
            current_entry: None,
            transcript: Vec::new(),
            story: None,
            generation: 0,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn native(&self) -> Language {
        self.native
    }

    pub fn target(&self) -> Language {
        self.target
    }

    pub fn current_entry(&self) -> Option<&DictionaryEntry> {
        self.current_entry.as_ref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn story(&self) -> Option<&str> {
        self.story.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // --- setup ---

    pub fn select_native(&mut self, code: &str) -> bool {
        let Some(lang) = registry::get(code) else {
            return false;
        };
        self.native = lang;
        if self.target == lang {
            // keep the pair distinct
            if let Some(other) = registry::all().iter().find(|l| l.code != lang.code) {
                self.target = *other;
            }
        }
        true
    }

    /// Rejects unknown codes and the native language itself.
    pub fn select_target(&mut self, code: &str) -> bool {
        match registry::get(code) {
            Some(lang) if lang != self.native => {
                self.target = lang;
                true
            }
            _ => false,
        }
    }

    pub fn begin(&mut self) {
        if self.view == View::Setup {
            self.view = View::Search;
        }
    }

    // --- lookup ---

    /// Start a new lookup. Clears the chat transcript (the only action that
    /// does) and returns the generation the caller must tag enrichments with.
    pub fn begin_lookup(&mut self) -> u64 {
        self.generation += 1;
        self.transcript.clear();
        self.view = View::Result { loading: true };
        self.generation
    }

    pub fn publish_entry(&mut self, entry: DictionaryEntry) {
        self.current_entry = Some(entry);
        self.view = View::Result { loading: false };
    }

    /// Failed lookups fall back to the search screen; no entry is published.
    pub fn fail_lookup(&mut self) {
        self.view = View::Search;
    }

    /// Merge a finished illustration, but only if the displayed entry is
    /// still the one the request was issued for.
    pub fn apply_image(&mut self, generation: u64, entry_id: Uuid, image_url: &str) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.current_entry.as_mut() {
            Some(entry) if entry.id == entry_id => {
                entry.image_url = Some(image_url.to_string());
                true
            }
            _ => false,
        }
    }

    // --- notebook / story / flashcards ---

    pub fn open_notebook(&mut self) {
        self.view = View::Notebook;
    }

    /// Display a saved entry. The transcript survives; only a new lookup
    /// clears it.
    pub fn open_entry(&mut self, entry: DictionaryEntry) {
        self.current_entry = Some(entry);
        self.view = View::Result { loading: false };
    }

    /// Story mode needs at least two saved words.
    pub fn open_story(&mut self, notebook_len: usize) -> bool {
        if notebook_len < 2 {
            return false;
        }
        self.story = None;
        self.view = View::Story { loading: true };
        true
    }

    pub fn story_ready(&mut self, text: String) {
        self.story = Some(text);
        if matches!(self.view, View::Story { .. }) {
            self.view = View::Story { loading: false };
        }
    }

    pub fn open_flashcards(&mut self, notebook_len: usize) -> bool {
        if notebook_len == 0 {
            return false;
        }
        self.view = View::Flashcards {
            index: 0,
            flipped: false,
        };
        true
    }

    /// No-op on the last card. Navigation lands on the front face.
    pub fn next_card(&mut self, notebook_len: usize) {
        if let View::Flashcards { index, .. } = self.view {
            if index + 1 < notebook_len {
                self.view = View::Flashcards {
                    index: index + 1,
                    flipped: false,
                };
            }
        }
    }

    /// No-op on the first card.
    pub fn prev_card(&mut self) {
        if let View::Flashcards { index, .. } = self.view {
            if index > 0 {
                self.view = View::Flashcards {
                    index: index - 1,
                    flipped: false,
                };
            }
        }
    }

    pub fn flip_card(&mut self) {
        if let View::Flashcards { index, flipped } = self.view {
            self.view = View::Flashcards {
                index,
                flipped: !flipped,
            };
        }
    }

    pub fn back(&mut self) {
        self.view = match self.view {
            View::Result { .. } => View::Search,
            View::Notebook => View::Search,
            View::Story { .. } => View::Notebook,
            View::Flashcards { .. } => View::Notebook,
            other => other,
        };
    }

    // --- chat ---

    pub fn push_chat(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
