use kanal::AsyncSender;
use lingopop_types::AppEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

/// Read commands from stdin and feed them into the app loop.
///
/// EOF is treated like `quit` so piped input shuts the app down cleanly.
pub async fn watcher_io(
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel_token: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::debug!("input watcher cancelled");
                return Ok(());
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if let Some(event) = parse_command(&line) {
                            let quitting = matches!(event, AppEvent::Quit);
                            ui_to_app_tx.send(event).await?;
                            if quitting {
                                return Ok(());
                            }
                        }
                    }
                    None => {
                        ui_to_app_tx.send(AppEvent::Quit).await?;
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Map one input line to an event. Unknown commands and blank lines are
/// dropped here rather than bothering the app loop.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "native" if !rest.is_empty() => Some(AppEvent::NativeSelected(rest.to_lowercase())),
        "learn" if !rest.is_empty() => Some(AppEvent::TargetSelected(rest.to_lowercase())),
        "start" | "go" => Some(AppEvent::Begin),
        "lookup" | "l" if !rest.is_empty() => Some(AppEvent::Lookup(rest.to_string())),
        "save" => Some(AppEvent::SaveWord),
        "say" => Some(AppEvent::Speak(rest.to_string())),
        "chat" if !rest.is_empty() => Some(AppEvent::ChatSend(rest.to_string())),
        "notebook" | "nb" => Some(AppEvent::OpenNotebook),
        "open" => rest
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(|n| AppEvent::OpenEntry(n - 1)),
        "story" => Some(AppEvent::StoryTime),
        "study" => Some(AppEvent::OpenFlashcards),
        "next" | "n" => Some(AppEvent::NextCard),
        "prev" | "p" => Some(AppEvent::PrevCard),
        "flip" | "f" => Some(AppEvent::FlipCard),
        "back" | "b" => Some(AppEvent::Back),
        "quit" | "exit" | "q" => Some(AppEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_keeps_the_whole_phrase() {
        match parse_command("lookup de nada") {
            Some(AppEvent::Lookup(text)) => assert_eq!(text, "de nada"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn open_is_one_based() {
        assert!(matches!(parse_command("open 1"), Some(AppEvent::OpenEntry(0))));
        assert!(matches!(parse_command("open 3"), Some(AppEvent::OpenEntry(2))));
        assert!(parse_command("open 0").is_none());
        assert!(parse_command("open x").is_none());
    }

    #[test]
    fn say_without_text_is_still_an_event() {
        match parse_command("say") {
            Some(AppEvent::Speak(text)) => assert!(text.is_empty()),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn language_codes_are_lowercased() {
        match parse_command("learn ES") {
            Some(AppEvent::TargetSelected(code)) => assert_eq!(code, "es"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn noise_is_dropped() {
        assert!(parse_command("").is_none());
        assert!(parse_command("   ").is_none());
        assert!(parse_command("frobnicate").is_none());
        assert!(parse_command("lookup").is_none());
        assert!(parse_command("chat").is_none());
    }

    #[test]
    fn aliases_match_their_commands() {
        assert!(matches!(parse_command("nb"), Some(AppEvent::OpenNotebook)));
        assert!(matches!(parse_command("f"), Some(AppEvent::FlipCard)));
        assert!(matches!(parse_command("q"), Some(AppEvent::Quit)));
    }
}
