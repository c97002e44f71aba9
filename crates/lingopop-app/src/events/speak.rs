use std::sync::Arc;

use lingopop_config::audio::AudioConfig;
use lingopop_gateway::DictionaryAi;

/// Fire-and-forget speech. Primary path synthesizes through the service and
/// plays the raw PCM; any failure falls through to the platform speech
/// engine and stops there.
pub fn spawn_speak<A>(gateway: &Arc<A>, audio: AudioConfig, text: String, voice: &'static str)
where
    A: DictionaryAi + 'static,
{
    let gateway = Arc::clone(gateway);

    tokio::spawn(async move {
        let pcm = match gateway.synthesize_speech(&text, voice).await {
            Ok(pcm) => pcm,
            Err(e) => {
                tracing::warn!("speech synthesis failed, using platform voice: {e}");
                fallback(text);
                return;
            }
        };

        let spoken = text.clone();
        let played = tokio::task::spawn_blocking(move || {
            lingopop_audio::play_pcm(&pcm, audio.sample_rate, audio.channels)
        })
        .await;

        match played {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!("audio playback failed, using platform voice: {e}");
                fallback(spoken);
            }
            Err(e) => {
                tracing::warn!("audio playback task failed: {e}");
                fallback(spoken);
            }
        }
    });
}

fn fallback(text: String) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = lingopop_audio::fallback_speak(&text) {
            tracing::warn!("platform speech fallback failed: {e}");
        }
    });
}
