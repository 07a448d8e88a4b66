//! Translation: the [`Translator`] trait, the [`Translation`] outcome and
//! the never-failing [`FallbackTranslator`] wrapper.
//!
//! A failed translation hands back the original text.  Most callers only
//! want the text and use [`Translation::into_text`], which makes success and
//! failure indistinguishable; the variant is still there for anyone who
//! needs to tell them apart.

use std::sync::Arc;

use async_trait::async_trait;

use crate::language::error::LanguageError;
use crate::logging::preview;

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language` (BCP-47 tag).
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, LanguageError>;
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// Outcome of a guarded translation.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// The remote call succeeded.
    Translated(String),
    /// The remote call failed; `text` is the untouched input.
    Passthrough { text: String, reason: String },
}

impl Translation {
    pub fn into_text(self) -> String {
        match self {
            Translation::Translated(text) => text,
            Translation::Passthrough { text, .. } => text,
        }
    }
}

// ---------------------------------------------------------------------------
// FallbackTranslator
// ---------------------------------------------------------------------------

/// Wraps any [`Translator`]; on error returns the input unchanged as
/// [`Translation::Passthrough`].
pub struct FallbackTranslator {
    inner: Arc<dyn Translator>,
}

impl FallbackTranslator {
    pub fn new(inner: Arc<dyn Translator>) -> Self {
        Self { inner }
    }

    pub async fn translate(&self, text: &str, target_language: &str) -> Translation {
        match self.inner.translate(text, target_language).await {
            Ok(translated) => {
                log::info!("Translated to {target_language}: {}", preview(&translated));
                Translation::Translated(translated)
            }
            Err(e) => {
                log::error!("Translation to {target_language} failed: {e}. Returning original text.");
                Translation::Passthrough {
                    text: text.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
