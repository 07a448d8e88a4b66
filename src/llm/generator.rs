//! Core [`TextGenerator`] trait, the [`ChunkStream`] it produces and
//! [`GenerationError`].

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// GenerationError
// ---------------------------------------------------------------------------

/// Errors that can occur while generating a triage answer.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The service is temporarily unreachable (HTTP 503, refused connection).
    #[error("generation service unavailable: {0}")]
    Unavailable(String),

    /// The request or stream did not finish in time (HTTP 504, client timeout).
    #[error("generation deadline exceeded")]
    DeadlineExceeded,

    /// Any other transport failure.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// Non-success status other than 503 / 504.
    #[error("generation API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A stream chunk was not the expected JSON.
    #[error("failed to parse generation chunk: {0}")]
    Parse(String),

    /// The prompt was refused by the model's safety layer.
    #[error("prompt blocked: {0}")]
    Blocked(String),

    /// Every permitted attempt failed; `source` is the last failure.
    #[error("generation failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: Box<GenerationError>,
    },
}

impl GenerationError {
    /// `true` for the failure kinds worth retrying: unavailable and
    /// deadline exceeded.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GenerationError::Unavailable(_) | GenerationError::DeadlineExceeded
        )
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            503 => GenerationError::Unavailable(body),
            504 => GenerationError::DeadlineExceeded,
            _ => GenerationError::Status { status, body },
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::DeadlineExceeded
        } else if e.is_connect() {
            GenerationError::Unavailable(e.to_string())
        } else {
            GenerationError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ChunkStream
// ---------------------------------------------------------------------------

/// Incremental text chunks in arrival order.  Finite and not restartable:
/// a failed stream is abandoned and a new request is made instead.
pub type ChunkStream = BoxStream<'static, Result<String, GenerationError>>;

/// Drain `stream` and concatenate its chunks.  The first error aborts the
/// collection and the partial text is dropped.
pub async fn collect_chunks(mut stream: ChunkStream) -> Result<String, GenerationError> {
    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        text.push_str(&chunk?);
    }
    Ok(text)
}

// ---------------------------------------------------------------------------
// TextGenerator trait
// ---------------------------------------------------------------------------

/// Streaming text generation with a fixed system instruction.
///
/// Implementors must be `Send + Sync` so they can be held behind
/// `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Open a generation stream for `prompt`.  Errors here mean the request
    /// itself failed; errors inside the stream mean it broke midway.
    async fn stream(&self, prompt: &str) -> Result<ChunkStream, GenerationError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
