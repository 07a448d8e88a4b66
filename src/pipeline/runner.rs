//! Symptom pipeline: detect → translate → generate → translate back →
//! speak.
//!
//! [`SymptomPipeline`] holds one never-failing wrapper per remote service
//! plus the retrying generator.  Only two outcomes are fatal: empty input
//! (checked before any remote call) and generation failure after retries.
//!
//! # Pipeline flow
//!
//! ```text
//! SymptomRequest
//!   └─▶ validate (non-empty after trim)             [validate]
//!   └─▶ hint ?: FallbackDetector::detect            [resolve-language]
//!   └─▶ lang != "en" ? translate → "en"             [translate-input]
//!   └─▶ RetryingGenerator::generate                 [generate]
//!         └─ Err → PipelineError::Generation
//!   └─▶ lang != "en" ? translate → lang             [localize]
//!         └─▶ FallbackSynthesizer::synthesize
//!               └─▶ base64 check → status message
//! ```

use thiserror::Error;

use crate::language::{FallbackDetector, FallbackTranslator};
use crate::llm::{GenerationError, RetryingGenerator};
use crate::logging::preview;
use crate::speech::{is_valid_base64, FallbackSynthesizer};

use super::state::{
    AudioStatus, LanguageSource, PipelineResult, PipelineStage, PipelineTrace, SymptomRequest,
    TranslationStep, WORKING_LANGUAGE,
};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Symptom text was empty or whitespace.
    #[error("Symptom description is required")]
    EmptyInput,

    /// Generation failed after the retry policy gave up.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

// ---------------------------------------------------------------------------
// SymptomPipeline
// ---------------------------------------------------------------------------

pub struct SymptomPipeline {
    detector: FallbackDetector,
    translator: FallbackTranslator,
    generator: RetryingGenerator,
    speech: FallbackSynthesizer,
}

impl SymptomPipeline {
    pub fn new(
        detector: FallbackDetector,
        translator: FallbackTranslator,
        generator: RetryingGenerator,
        speech: FallbackSynthesizer,
    ) -> Self {
        Self {
            detector,
            translator,
            generator,
            speech,
        }
    }

    /// Run one request through every stage.
    pub async fn run(&self, request: SymptomRequest) -> Result<PipelineResult, PipelineError> {
        log::debug!("[{}] '{}'", PipelineStage::Validate.label(), preview(&request.text));
        if request.text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let (language, language_source) = match request.language_hint {
            Some(hint) => (hint, LanguageSource::Hint),
            None => (
                self.detector.detect(&request.text).await,
                LanguageSource::Detected,
            ),
        };
        log::info!(
            "[{}] Working language: {language} ({language_source:?})",
            PipelineStage::ResolveLanguage.label()
        );

        let needs_translation = language != WORKING_LANGUAGE;

        let (prompt, input_translation) = if needs_translation {
            log::info!("[{}] {language} → {WORKING_LANGUAGE}", PipelineStage::TranslateInput.label());
            let translation = self.translator.translate(&request.text, WORKING_LANGUAGE).await;
            let step = TranslationStep::from(&translation);
            (translation.into_text(), step)
        } else {
            (request.text, TranslationStep::Skipped)
        };

        log::info!("[{}] Prompt: '{}'", PipelineStage::Generate.label(), preview(&prompt));
        let generated = self.generator.generate(&prompt).await.map_err(|e| {
            log::error!("[{}] {e}", PipelineStage::Generate.label());
            PipelineError::from(e)
        })?;
        let answer = generated.text.trim().to_string();

        let (result_text, output_translation) = if needs_translation {
            log::info!("[{}] {WORKING_LANGUAGE} → {language}", PipelineStage::Localize.label());
            let translation = self.translator.translate(&answer, &language).await;
            let step = TranslationStep::from(&translation);
            (translation.into_text().trim().to_string(), step)
        } else {
            (answer, TranslationStep::Skipped)
        };

        let speech_data = self.speech.synthesize(&result_text, &language).await;
        let audio_valid = speech_data
            .as_deref()
            .is_some_and(is_valid_base64);
        let status = AudioStatus::classify(speech_data.as_deref(), audio_valid);
        log::info!("[{}] {}", PipelineStage::Localize.label(), status.message());

        Ok(PipelineResult {
            result_text,
            language_code: language,
            speech_data,
            status_message: status.message().to_string(),
            audio_valid,
            trace: Some(PipelineTrace {
                language_source,
                input_translation,
                output_translation,
                generation_attempts: generated.attempts,
            }),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
