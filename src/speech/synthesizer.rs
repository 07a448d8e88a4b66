//! [`SpeechSynthesizer`] trait, [`SpeechError`] and the never-failing
//! [`FallbackSynthesizer`] that turns audio into a data URI.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::logging::preview;
use crate::speech::audio::{encode_data_uri, AUDIO_MIME};

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("speech request timed out")]
    Timeout,

    #[error("speech API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse speech response: {0}")]
    Parse(String),

    /// The backend answered successfully but with zero bytes of audio.
    #[error("speech API returned empty audio")]
    EmptyAudio,
}

impl From<reqwest::Error> for SpeechError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SpeechError::Timeout
        } else {
            SpeechError::Request(e.to_string())
        }
    }
}

/// Reject a zero-length clip as [`SpeechError::EmptyAudio`].
pub fn require_audio(audio: Vec<u8>) -> Result<Vec<u8>, SpeechError> {
    if audio.is_empty() {
        Err(SpeechError::EmptyAudio)
    } else {
        Ok(audio)
    }
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` spoken in `language` (BCP-47 tag); returns MP3 bytes.
    /// A zero-length clip is reported as [`SpeechError::EmptyAudio`].
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError>;
}

// ---------------------------------------------------------------------------
// FallbackSynthesizer
// ---------------------------------------------------------------------------

/// Wraps any synthesizer; yields a `data:audio/mpeg;base64,…` URI or `None`.
pub struct FallbackSynthesizer {
    inner: Arc<dyn SpeechSynthesizer>,
}

impl FallbackSynthesizer {
    pub fn new(inner: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { inner }
    }

    pub async fn synthesize(&self, text: &str, language: &str) -> Option<String> {
        log::info!(
            "Generating speech for '{}' in language '{language}'",
            preview(text)
        );
        let result = self
            .inner
            .synthesize(text, language)
            .await
            .and_then(require_audio);
        match result {
            Ok(audio) => {
                log::info!("Generated and encoded audio ({} bytes)", audio.len());
                Some(encode_data_uri(AUDIO_MIME, &audio))
            }
            Err(e) => {
                log::error!("Text-to-speech error: {e}");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::audio::is_valid_base64;

    struct Bytes(Vec<u8>);

    #[async_trait]
    impl SpeechSynthesizer for Bytes {
        async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, SpeechError> {
            Ok(self.0.clone())
        }
    }

    struct Down;

    #[async_trait]
    impl SpeechSynthesizer for Down {
        async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, SpeechError> {
            Err(SpeechError::Status {
                status: 500,
                body: "internal".into(),
            })
        }
    }

    #[tokio::test]
    async fn audio_becomes_valid_data_uri() {
        let synth = FallbackSynthesizer::new(Arc::new(Bytes(vec![0xFF, 0xFB, 0x90, 0x00])));
        let uri = synth.synthesize("hello", "en").await.unwrap();

        assert!(uri.starts_with("data:audio/mpeg;base64,"));
        assert!(is_valid_base64(&uri));
    }

    #[tokio::test]
    async fn empty_audio_is_none() {
        let synth = FallbackSynthesizer::new(Arc::new(Bytes(Vec::new())));
        assert!(synth.synthesize("hello", "en").await.is_none());
    }

    #[test]
    fn require_audio_rejects_zero_bytes() {
        assert!(matches!(require_audio(Vec::new()), Err(SpeechError::EmptyAudio)));
        assert_eq!(require_audio(b"ID3".to_vec()).unwrap(), b"ID3");
    }

    struct Silent;

    #[async_trait]
    impl SpeechSynthesizer for Silent {
        async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, SpeechError> {
            Err(SpeechError::EmptyAudio)
        }
    }

    #[tokio::test]
    async fn empty_audio_error_is_none() {
        let synth = FallbackSynthesizer::new(Arc::new(Silent));
        assert!(synth.synthesize("hello", "en").await.is_none());
    }

    #[tokio::test]
    async fn backend_error_is_none() {
        let synth = FallbackSynthesizer::new(Arc::new(Down));
        assert!(synth.synthesize("hello", "en").await.is_none());
    }
}
