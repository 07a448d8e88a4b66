//! Errors shared by the detection and translation clients.

use thiserror::Error;

/// Failure of a remote detect-language or translate call.
///
/// These never escape the pipeline: [`FallbackDetector`] and
/// [`FallbackTranslator`] absorb them.
///
/// [`FallbackDetector`]: crate::language::FallbackDetector
/// [`FallbackTranslator`]: crate::language::FallbackTranslator
#[derive(Debug, Error)]
pub enum LanguageError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the client timeout.
    #[error("translation request timed out")]
    Timeout,

    /// Non-success status (bad credentials, quota, unknown project …).
    #[error("translation API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("failed to parse translation response: {0}")]
    Parse(String),

    /// The API answered but with an empty result list.
    #[error("translation API returned no results")]
    EmptyResult,
}

impl From<reqwest::Error> for LanguageError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LanguageError::Timeout
        } else {
            LanguageError::Request(e.to_string())
        }
    }
}
