//! Backend selection by language tag.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SpeechBackend;
use crate::speech::synthesizer::{SpeechError, SpeechSynthesizer};

/// Sends `"en"` to one backend and every other tag to another.
pub struct LanguageRoutedSynthesizer {
    english: Arc<dyn SpeechSynthesizer>,
    other: Arc<dyn SpeechSynthesizer>,
}

impl LanguageRoutedSynthesizer {
    pub fn new(english: Arc<dyn SpeechSynthesizer>, other: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { english, other }
    }
}

#[async_trait]
impl SpeechSynthesizer for LanguageRoutedSynthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        if language == "en" {
            self.english.synthesize(text, language).await
        } else {
            self.other.synthesize(text, language).await
        }
    }
}

/// Pick the synthesizer for the configured policy.
pub fn select_backend(
    backend: SpeechBackend,
    google: Arc<dyn SpeechSynthesizer>,
    dwani: Arc<dyn SpeechSynthesizer>,
) -> Arc<dyn SpeechSynthesizer> {
    match backend {
        SpeechBackend::Routed => Arc::new(LanguageRoutedSynthesizer::new(google, dwani)),
        SpeechBackend::Google => google,
        SpeechBackend::Dwani => dwani,
    }
}
