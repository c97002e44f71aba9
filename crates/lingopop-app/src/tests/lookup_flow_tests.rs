use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lingopop_core::view::{Session, View};
use lingopop_gateway::{
    ApiError, ChatError, DictionaryAi, LookupError, LookupResponse, SpeechError, StoryError,
};
use lingopop_notebook::NotebookStore;
use lingopop_types::{AppEvent, ExampleSentence, UiUpdate};
use tempfile::tempdir;
use tokio::time::timeout;

use crate::events::{chat, lookup, story};

#[derive(Default)]
struct FakeAi {
    fail_lookup: bool,
    fail_chat: bool,
    chat_reply: String,
    image: Option<String>,
}

#[async_trait]
impl DictionaryAi for FakeAi {
    async fn lookup(
        &self,
        text: &str,
        _target_lang: &str,
        native_lang: &str,
    ) -> Result<LookupResponse, LookupError> {
        if self.fail_lookup {
            return Err(LookupError::Api(ApiError::Service {
                status: 500,
                message: "boom".to_string(),
            }));
        }
        Ok(LookupResponse {
            explanation: format!("{text} explained in {native_lang}"),
            examples: vec![ExampleSentence {
                target: format!("{text}!"),
                native: "hello!".to_string(),
            }],
            usage_note: "casual".to_string(),
            image_prompt: format!("a picture of {text}"),
        })
    }

    async fn generate_image(&self, _prompt: &str) -> Option<String> {
        self.image.clone()
    }

    async fn synthesize_speech(&self, _text: &str, _voice: &str) -> Result<Vec<u8>, SpeechError> {
        Err(SpeechError::NoAudio)
    }

    async fn chat(
        &self,
        _history: &[lingopop_types::ChatMessage],
        _message: &str,
        _entry: &lingopop_types::DictionaryEntry,
    ) -> Result<String, ChatError> {
        if self.fail_chat {
            return Err(ChatError::Api(ApiError::Service {
                status: 500,
                message: "boom".to_string(),
            }));
        }
        Ok(self.chat_reply.clone())
    }

    async fn generate_story(
        &self,
        words: &[String],
        target_lang: &str,
        _native_lang: &str,
    ) -> Result<String, StoryError> {
        Ok(format!("A {target_lang} tale of {}", words.join(" and ")))
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    store: NotebookStore,
    session: Session,
    self_tx: kanal::AsyncSender<AppEvent>,
    self_rx: kanal::AsyncReceiver<AppEvent>,
    ui_tx: kanal::AsyncSender<UiUpdate>,
    ui_rx: kanal::AsyncReceiver<UiUpdate>,
}

impl Harness {
    fn new() -> Self {
        let dir = tempdir().expect("tempdir");
        let store = NotebookStore::load(dir.path().join("notebook.json"));
        let (self_tx, self_rx) = kanal::unbounded_async();
        let (ui_tx, ui_rx) = kanal::unbounded_async();
        Self {
            _dir: dir,
            store,
            session: Session::new(),
            self_tx,
            self_rx,
            ui_tx,
            ui_rx,
        }
    }
}

#[tokio::test]
async fn lookup_publishes_text_then_image_event() {
    let mut h = Harness::new();
    let gateway = Arc::new(FakeAi {
        image: Some("data:image/png;base64,aa".to_string()),
        ..Default::default()
    });

    lookup::handle_lookup(
        &mut h.session,
        &h.store,
        &gateway,
        &h.self_tx,
        &h.ui_tx,
        "hola".to_string(),
    )
    .await
    .expect("lookup failed");

    let entry = h.session.current_entry().expect("entry published").clone();
    assert_eq!(entry.word, "hola");
    assert!(entry.explanation.contains("hola"));
    assert!(entry.image_url.is_none());
    assert_eq!(h.session.view(), View::Result { loading: false });

    let event = timeout(Duration::from_secs(2), h.self_rx.recv())
        .await
        .expect("image event never arrived")
        .expect("channel closed");
    match event {
        AppEvent::ImageReady {
            generation,
            entry_id,
            image_url,
        } => {
            assert_eq!(generation, h.session.generation());
            assert_eq!(entry_id, entry.id);

            lookup::handle_image_ready(
                &mut h.session,
                &mut h.store,
                generation,
                entry_id,
                &image_url,
            );
            assert_eq!(
                h.session.current_entry().unwrap().image_url.as_deref(),
                Some("data:image/png;base64,aa")
            );
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn failed_lookup_notifies_and_returns_to_search() {
    let mut h = Harness::new();
    let gateway = Arc::new(FakeAi {
        fail_lookup: true,
        ..Default::default()
    });

    lookup::handle_lookup(
        &mut h.session,
        &h.store,
        &gateway,
        &h.self_tx,
        &h.ui_tx,
        "hola".to_string(),
    )
    .await
    .expect("handler errored");

    assert_eq!(h.session.view(), View::Search);
    assert!(h.session.current_entry().is_none());

    // loading frame first, then the failure notice
    let first = timeout(Duration::from_secs(2), h.ui_rx.recv())
        .await
        .expect("no frame")
        .expect("channel closed");
    assert!(matches!(first, UiUpdate::Frame(_)));

    let second = timeout(Duration::from_secs(2), h.ui_rx.recv())
        .await
        .expect("no notice")
        .expect("channel closed");
    match second {
        UiUpdate::Notice(text) => {
            assert_eq!(text, "Oops! Something went wrong searching for that word.");
        }
        other => panic!("unexpected update: {other:?}"),
    }
}

#[tokio::test]
async fn lookup_without_image_sends_no_event() {
    let mut h = Harness::new();
    let gateway = Arc::new(FakeAi::default());

    lookup::handle_lookup(
        &mut h.session,
        &h.store,
        &gateway,
        &h.self_tx,
        &h.ui_tx,
        "hola".to_string(),
    )
    .await
    .expect("lookup failed");

    assert!(h.session.current_entry().is_some());
    let result = timeout(Duration::from_millis(200), h.self_rx.recv()).await;
    assert!(result.is_err(), "no image event should have been sent");
}

#[tokio::test]
async fn stale_image_is_dropped_after_a_second_lookup() {
    let mut h = Harness::new();
    let gateway = Arc::new(FakeAi {
        image: Some("data:image/png;base64,old".to_string()),
        ..Default::default()
    });

    lookup::handle_lookup(
        &mut h.session,
        &h.store,
        &gateway,
        &h.self_tx,
        &h.ui_tx,
        "hola".to_string(),
    )
    .await
    .expect("first lookup failed");

    let stale = timeout(Duration::from_secs(2), h.self_rx.recv())
        .await
        .expect("no image event")
        .expect("channel closed");

    lookup::handle_lookup(
        &mut h.session,
        &h.store,
        &gateway,
        &h.self_tx,
        &h.ui_tx,
        "gracias".to_string(),
    )
    .await
    .expect("second lookup failed");

    if let AppEvent::ImageReady {
        generation,
        entry_id,
        image_url,
    } = stale
    {
        lookup::handle_image_ready(&mut h.session, &mut h.store, generation, entry_id, &image_url);
    } else {
        panic!("unexpected event: {stale:?}");
    }

    let entry = h.session.current_entry().expect("entry");
    assert_eq!(entry.word, "gracias");
    assert!(entry.image_url.is_none());
}

#[tokio::test]
async fn late_image_is_persisted_for_a_saved_entry() {
    let mut h = Harness::new();
    let gateway = Arc::new(FakeAi {
        image: Some("data:image/png;base64,aa".to_string()),
        ..Default::default()
    });

    lookup::handle_lookup(
        &mut h.session,
        &h.store,
        &gateway,
        &h.self_tx,
        &h.ui_tx,
        "hola".to_string(),
    )
    .await
    .expect("lookup failed");

    let entry = h.session.current_entry().expect("entry").clone();
    assert!(h.store.insert(entry.clone()).expect("insert failed"));

    let event = timeout(Duration::from_secs(2), h.self_rx.recv())
        .await
        .expect("no image event")
        .expect("channel closed");
    if let AppEvent::ImageReady {
        generation,
        entry_id,
        image_url,
    } = event
    {
        lookup::handle_image_ready(&mut h.session, &mut h.store, generation, entry_id, &image_url);
    } else {
        panic!("unexpected event: {event:?}");
    }

    let saved = h.store.get(0).expect("saved entry");
    assert_eq!(saved.image_url.as_deref(), Some("data:image/png;base64,aa"));

    // survives a reload from disk
    let reloaded = NotebookStore::load(h._dir.path().join("notebook.json"));
    assert_eq!(
        reloaded.get(0).unwrap().image_url.as_deref(),
        Some("data:image/png;base64,aa")
    );
}

#[tokio::test]
async fn chat_failure_becomes_a_scripted_reply() {
    let mut h = Harness::new();
    let gateway = FakeAi {
        fail_chat: true,
        ..Default::default()
    };

    let lookup_gateway = Arc::new(FakeAi::default());
    lookup::handle_lookup(
        &mut h.session,
        &h.store,
        &lookup_gateway,
        &h.self_tx,
        &h.ui_tx,
        "hola".to_string(),
    )
    .await
    .expect("lookup failed");

    chat::handle_chat_send(
        &mut h.session,
        &h.store,
        &gateway,
        &h.ui_tx,
        "is it formal?".to_string(),
    )
    .await
    .expect("chat handler errored");

    let transcript = h.session.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].text, "is it formal?");
    assert_eq!(transcript[1].text, "Sorry, I got a bit confused. Try again?");
}

#[tokio::test]
async fn empty_chat_reply_becomes_speechless() {
    let mut h = Harness::new();
    let gateway = Arc::new(FakeAi::default());

    lookup::handle_lookup(
        &mut h.session,
        &h.store,
        &gateway,
        &h.self_tx,
        &h.ui_tx,
        "hola".to_string(),
    )
    .await
    .expect("lookup failed");

    chat::handle_chat_send(
        &mut h.session,
        &h.store,
        gateway.as_ref(),
        &h.ui_tx,
        "hm".to_string(),
    )
    .await
    .expect("chat handler errored");

    assert_eq!(h.session.transcript()[1].text, "I'm speechless!");
}

#[tokio::test]
async fn story_requires_two_saved_words() {
    let mut h = Harness::new();
    let gateway = FakeAi::default();

    let entry = lingopop_types::DictionaryEntry::new(
        "hola".to_string(),
        "Spanish".to_string(),
        "English".to_string(),
    );
    h.store.insert(entry).expect("insert failed");

    story::handle_story_time(&mut h.session, &h.store, &gateway, &h.ui_tx)
        .await
        .expect("story handler errored");

    let update = timeout(Duration::from_secs(2), h.ui_rx.recv())
        .await
        .expect("no update")
        .expect("channel closed");
    assert!(matches!(update, UiUpdate::Notice(_)));
    assert!(h.session.story().is_none());

    let entry = lingopop_types::DictionaryEntry::new(
        "gracias".to_string(),
        "Spanish".to_string(),
        "English".to_string(),
    );
    h.store.insert(entry).expect("insert failed");

    story::handle_story_time(&mut h.session, &h.store, &gateway, &h.ui_tx)
        .await
        .expect("story handler errored");

    let story_text = h.session.story().expect("story set");
    assert!(story_text.contains("hola"));
    assert!(story_text.contains("gracias"));
    assert_eq!(h.session.view(), View::Story { loading: false });
}
