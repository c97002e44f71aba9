use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("audio output unavailable: {0}")]
    Device(String),

    #[error("empty audio payload")]
    EmptyPayload,

    #[error("platform speech failed: {0}")]
    Speech(String),
}

/// Interpret headerless signed 16-bit little-endian PCM as normalized f32
/// samples. A trailing odd byte is ignored.
pub fn pcm_to_samples(data: &[u8]) -> Vec<f32> {
    data.chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect()
}

/// Play raw PCM through the default output device, blocking until the clip
/// ends. Sample rate and channel count come from the caller; the payload
/// carries no header to infer them from.
pub fn play_pcm(data: &[u8], sample_rate: u32, channels: u16) -> Result<(), PlaybackError> {
    let samples = pcm_to_samples(data);
    if samples.is_empty() {
        return Err(PlaybackError::EmptyPayload);
    }

    let (_stream, handle) =
        OutputStream::try_default().map_err(|e| PlaybackError::Device(e.to_string()))?;
    let sink = Sink::try_new(&handle).map_err(|e| PlaybackError::Device(e.to_string()))?;

    sink.append(SamplesBuffer::new(channels, sample_rate, samples));
    sink.sleep_until_end();

    Ok(())
}

/// Degraded substitute when synthesis or playback fails: hand the text to
/// the platform speech engine.
pub fn fallback_speak(text: &str) -> Result<(), PlaybackError> {
    let mut engine = tts::Tts::default().map_err(|e| PlaybackError::Speech(e.to_string()))?;
    engine
        .speak(text, true)
        .map_err(|e| PlaybackError::Speech(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_little_endian_pairs() {
        // 0x0000 -> 0.0, 0x7FFF -> ~1.0, 0x8000 -> -1.0
        let data = [0x00, 0x00, 0xFF, 0x7F, 0x00, 0x80];
        let samples = pcm_to_samples(&data);

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 0.99997).abs() < 1e-4);
        assert_eq!(samples[2], -1.0);
    }

    #[test]
    fn trailing_odd_byte_is_ignored() {
        let samples = pcm_to_samples(&[0x01, 0x00, 0x7F]);
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(matches!(
            play_pcm(&[], 24_000, 1),
            Err(PlaybackError::EmptyPayload)
        ));
    }
}
