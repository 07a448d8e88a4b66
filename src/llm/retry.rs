//! Bounded retry around a [`TextGenerator`].
//!
//! [`RetryingGenerator`] opens a stream, drains it to completion and returns
//! the concatenated text.  A failure anywhere in that attempt (opening the
//! request or midway through the stream) discards the partial text; the
//! next attempt starts from an empty buffer after a fixed delay.
//!
//! Only transient kinds ([`GenerationError::is_transient`]) are retried
//! unless [`RetryPolicy::retry_all_errors`] is set.

use std::sync::Arc;
use std::time::Duration;

use crate::config::GenerationConfig;
use crate::llm::generator::{collect_chunks, GenerationError, TextGenerator};

// ---------------------------------------------------------------------------
// RetryPolicy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first.  Zero is treated as one.
    pub max_attempts: u32,
    pub delay: Duration,
    /// Retry permanent failures too (bad credentials, blocked prompts …).
    pub retry_all_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            max_attempts: config.max_retries,
            delay: config.retry_delay(),
            retry_all_errors: config.retry_all_errors,
        }
    }

    pub fn should_retry(&self, err: &GenerationError) -> bool {
        self.retry_all_errors || err.is_transient()
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

// ---------------------------------------------------------------------------
// Generated
// ---------------------------------------------------------------------------

/// Text produced by a successful attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub text: String,
    /// 1-based number of the attempt that succeeded.
    pub attempts: u32,
}

// ---------------------------------------------------------------------------
// RetryingGenerator
// ---------------------------------------------------------------------------

pub struct RetryingGenerator {
    inner: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
}

impl RetryingGenerator {
    pub fn new(inner: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Generate a full answer for `prompt`.
    ///
    /// Returns the last error unchanged when it is not retryable, or
    /// [`GenerationError::Exhausted`] once every attempt has failed.
    pub async fn generate(&self, prompt: &str) -> Result<Generated, GenerationError> {
        let max = self.policy.attempts();

        let mut attempt = 1;
        loop {
            match self.attempt(prompt).await {
                Ok(text) => {
                    log::debug!("Generation raw response: {text}");
                    return Ok(Generated {
                        text,
                        attempts: attempt,
                    });
                }
                Err(e) if !self.policy.should_retry(&e) => {
                    log::error!("Attempt {attempt}/{max} failed with non-retryable error: {e}");
                    return Err(e);
                }
                Err(e) if attempt >= max => {
                    log::error!("Attempt {attempt}/{max} failed: {e}; giving up");
                    return Err(GenerationError::Exhausted {
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    log::warn!(
                        "Attempt {attempt}/{max} failed: {e}; retrying in {:?}",
                        self.policy.delay
                    );
                    tokio::time::sleep(self.policy.delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<String, GenerationError> {
        let stream = self.inner.stream(prompt).await?;
        collect_chunks(stream).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
