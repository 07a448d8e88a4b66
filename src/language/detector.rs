//! Language detection: the [`LanguageDetector`] trait and the
//! never-failing [`FallbackDetector`] wrapper the pipeline uses.

use std::sync::Arc;

use async_trait::async_trait;

use crate::language::error::LanguageError;
use crate::logging::preview;

// ---------------------------------------------------------------------------
// LanguageDetector trait
// ---------------------------------------------------------------------------

/// Remote language identification.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn LanguageDetector>` across request tasks.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Return the most likely BCP-47 tag for `text` (e.g. `"fr"`, `"hi"`).
    async fn detect(&self, text: &str) -> Result<String, LanguageError>;
}

// ---------------------------------------------------------------------------
// FallbackDetector
// ---------------------------------------------------------------------------

/// Wraps any detector and substitutes a fixed tag on failure.
pub struct FallbackDetector {
    inner: Arc<dyn LanguageDetector>,
    fallback: String,
}

impl FallbackDetector {
    pub fn new(inner: Arc<dyn LanguageDetector>, fallback: impl Into<String>) -> Self {
        Self {
            inner,
            fallback: fallback.into(),
        }
    }

    /// Detect the language of `text`, or return the fallback tag.  Never
    /// fails.
    pub async fn detect(&self, text: &str) -> String {
        match self.inner.detect(text).await {
            Ok(tag) if !tag.trim().is_empty() => tag,
            Ok(_) => {
                log::warn!("No language detected, falling back to '{}'", self.fallback);
                self.fallback.clone()
            }
            Err(e) => {
                log::error!(
                    "Language detection error for '{}': {e}, falling back to '{}'",
                    preview(text),
                    self.fallback
                );
                self.fallback.clone()
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

    struct Fixed(&'static str);

    #[async_trait]
    impl LanguageDetector for Fixed {
        async fn detect(&self, _text: &str) -> Result<String, LanguageError> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    #[async_trait]
    impl LanguageDetector for Broken {
        async fn detect(&self, _text: &str) -> Result<String, LanguageError> {
            Err(LanguageError::Status {
                status: 403,
                body: "permission denied".into(),
            })
        }
    }

    #[tokio::test]
    async fn passes_through_detected_tag() {
        let detector = FallbackDetector::new(Arc::new(Fixed("hi")), "en");
        assert_eq!(detector.detect("मुझे बुखार है").await, "hi");
    }

    #[tokio::test]
    async fn error_yields_fallback() {
        let detector = FallbackDetector::new(Arc::new(Broken), "en");
        assert_eq!(detector.detect("anything").await, "en");
    }

    #[tokio::test]
    async fn blank_tag_yields_fallback() {
        let detector = FallbackDetector::new(Arc::new(Fixed("")), "en");
        assert_eq!(detector.detect("anything").await, "en");
    }
}
