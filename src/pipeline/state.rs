//! Request, result and trace types for a single pipeline run.
//!
//! [`SymptomRequest`] is the validated input, [`PipelineResult`] the
//! response the HTTP layer serializes.  [`PipelineTrace`] rides along on
//! the result for logs and tests but is never sent to clients.

use serde::{Deserialize, Serialize};

use crate::language::Translation;

/// Working language of the generation step.
pub const WORKING_LANGUAGE: &str = "en";

// ---------------------------------------------------------------------------
// PipelineStage
// ---------------------------------------------------------------------------

/// The five ordered stages of a run.  Used only for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validate,
    ResolveLanguage,
    TranslateInput,
    Generate,
    Localize,
}

impl PipelineStage {
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::Validate => "validate",
            PipelineStage::ResolveLanguage => "resolve-language",
            PipelineStage::TranslateInput => "translate-input",
            PipelineStage::Generate => "generate",
            PipelineStage::Localize => "localize",
        }
    }
}

// ---------------------------------------------------------------------------
// SymptomRequest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SymptomRequest {
    pub text: String,
    /// Caller-supplied tag; skips detection when present.
    pub language_hint: Option<String>,
}

impl SymptomRequest {
    /// Blank hints are dropped so they never reach the translator as a tag.
    pub fn new(text: impl Into<String>, language_hint: Option<String>) -> Self {
        Self {
            text: text.into(),
            language_hint: language_hint.filter(|h| !h.trim().is_empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// AudioStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioStatus {
    Valid,
    InvalidEncoding,
    Missing,
}

impl AudioStatus {
    pub fn classify(speech_data: Option<&str>, valid: bool) -> Self {
        match (speech_data, valid) {
            (Some(_), true) => AudioStatus::Valid,
            (Some(_), false) => AudioStatus::InvalidEncoding,
            (None, _) => AudioStatus::Missing,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AudioStatus::Valid => "Audio generated successfully.",
            AudioStatus::InvalidEncoding => "Base64 encoding of audio data is invalid.",
            AudioStatus::Missing => "Failed to generate audio data.",
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineTrace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSource {
    Hint,
    Detected,
}

/// What happened at one translation point.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationStep {
    /// The working language was already English.
    Skipped,
    Translated,
    Passthrough { reason: String },
}

impl From<&Translation> for TranslationStep {
    fn from(t: &Translation) -> Self {
        match t {
            Translation::Translated(_) => TranslationStep::Translated,
            Translation::Passthrough { reason, .. } => TranslationStep::Passthrough {
                reason: reason.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineTrace {
    pub language_source: LanguageSource,
    pub input_translation: TranslationStep,
    pub output_translation: TranslationStep,
    pub generation_attempts: u32,
}

// ---------------------------------------------------------------------------
// PipelineResult
// ---------------------------------------------------------------------------

/// Serialized field names are the ones the browser frontend reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    #[serde(rename = "result")]
    pub result_text: String,
    #[serde(rename = "language")]
    pub language_code: String,
    pub speech_data: Option<String>,
    #[serde(rename = "message")]
    pub status_message: String,
    #[serde(rename = "isValidbase64")]
    pub audio_valid: bool,
    #[serde(skip)]
    pub trace: Option<PipelineTrace>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
