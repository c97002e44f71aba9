use std::fmt::Write;

use lingopop_core::registry;
use lingopop_core::view::{Session, View};
use lingopop_notebook::NotebookStore;
use lingopop_types::Speaker;

/// Render the active screen as a text frame.
pub fn frame(session: &Session, store: &NotebookStore) -> String {
    match session.view() {
        View::Setup => setup(session),
        View::Search => search(session, store),
        View::Result { loading } => result(session, store, loading),
        View::Notebook => notebook(session, store),
        View::Story { loading } => story(session, loading),
        View::Flashcards { index, flipped } => flashcards(store, index, flipped),
    }
}

fn setup(session: &Session) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== LingoPop ===");
    let _ = writeln!(out, "Learn a language one word at a time.\n");
    for lang in registry::all() {
        let _ = writeln!(out, "  {} {} ({})", lang.flag, lang.name, lang.code);
    }
    let _ = writeln!(
        out,
        "\nI speak {} {} and I'm learning {} {}",
        session.native().flag,
        session.native().name,
        session.target().flag,
        session.target().name,
    );
    let _ = writeln!(
        out,
        "commands: native <code> | learn <code> | start | quit"
    );
    out
}

fn search(session: &Session, store: &NotebookStore) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "--- {} {} ---",
        session.target().flag,
        session.target().name
    );
    let _ = writeln!(out, "What do you want to say?\n");
    let _ = writeln!(out, "commands: lookup <word> | notebook | quit");
    if !store.is_empty() {
        let _ = writeln!(out, "({} words in your notebook)", store.len());
    }
    out
}

fn result(session: &Session, store: &NotebookStore, loading: bool) -> String {
    if loading {
        return "Thinking...\n".to_string();
    }
    let Some(entry) = session.current_entry() else {
        return "Nothing to show yet.\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", entry.word);
    if store.contains(&entry.word) {
        let _ = writeln!(out, "[saved]");
    }
    let _ = writeln!(out, "\n{}\n", entry.explanation);
    if !entry.usage_note.is_empty() {
        let _ = writeln!(out, "Usage: {}\n", entry.usage_note);
    }
    for (i, example) in entry.examples.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, example.target);
        let _ = writeln!(out, "     {}", example.native);
    }
    match &entry.image_url {
        Some(_) => {
            let _ = writeln!(out, "\n[illustration ready]");
        }
        None => {
            let _ = writeln!(out, "\nGenerating art...");
        }
    }
    if !session.transcript().is_empty() {
        let _ = writeln!(out, "\n--- chat ---");
        for message in session.transcript() {
            let who = match message.speaker {
                Speaker::User => "you",
                Speaker::Assistant => "pop",
            };
            let _ = writeln!(out, "{who}: {}", message.text);
        }
    }
    let _ = writeln!(
        out,
        "\ncommands: save | say [text] | chat <message> | back"
    );
    out
}

fn notebook(session: &Session, store: &NotebookStore) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== Notebook ({} {}) ===",
        session.target().flag,
        session.target().name
    );
    if store.is_empty() {
        let _ = writeln!(out, "\nNo words saved yet. Look something up first!");
    } else {
        for (i, entry) in store.entries().iter().enumerate() {
            let gloss = entry.explanation.lines().next().unwrap_or("");
            let _ = writeln!(out, "  {}. {} - {}", i + 1, entry.word, gloss);
        }
    }
    let _ = writeln!(out, "\ncommands: open <n> | story | study | back");
    out
}

fn story(session: &Session, loading: bool) -> String {
    if loading {
        return "Weaving your words into a tale...\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "=== Story Time ===\n");
    let _ = writeln!(out, "{}", session.story().unwrap_or(""));
    let _ = writeln!(out, "\ncommands: say | back");
    out
}

fn flashcards(store: &NotebookStore, index: usize, flipped: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Flashcards {} / {} ===\n", index + 1, store.len());
    match store.get(index) {
        Some(entry) if flipped => {
            let _ = writeln!(out, "{}", entry.explanation);
            if let Some(example) = entry.examples.first() {
                let _ = writeln!(out, "\n  {}", example.target);
            }
        }
        Some(entry) => {
            let _ = writeln!(out, "  [ {} ]", entry.word);
        }
        None => {
            let _ = writeln!(out, "  (empty)");
        }
    }
    let _ = writeln!(out, "\ncommands: flip | next | prev | back");
    out
}
