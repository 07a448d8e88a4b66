//! LLM generation module.
//!
//! This module provides:
//! * [`TextGenerator`]: async trait returning a [`ChunkStream`].
//! * [`VertexGenerator`]: Vertex AI `streamGenerateContent` backend.
//! * [`RetryingGenerator`] / [`RetryPolicy`]: bounded fixed-delay retry that
//!   drains the stream into one string.
//! * [`SYMPTOM_CHECKER_INSTRUCTION`] / [`GenerationParams`]: prompt and
//!   sampling parameters.
//! * [`SseDecoder`]: incremental server-sent-events line decoder.
//! * [`GenerationError`]: error variants for generation.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use symptom_checker::config::AppConfig;
//! use symptom_checker::llm::{
//!     RetryPolicy, RetryingGenerator, VertexGenerator, SYMPTOM_CHECKER_INSTRUCTION,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().unwrap();
//!     let vertex = VertexGenerator::new(
//!         reqwest::Client::new(),
//!         &config.google,
//!         &config.generation,
//!         SYMPTOM_CHECKER_INSTRUCTION,
//!     );
//!     let generator = RetryingGenerator::new(
//!         Arc::new(vertex),
//!         RetryPolicy::from_config(&config.generation),
//!     );
//!
//!     let answer = generator.generate("I have a headache, fever, and cough.").await.unwrap();
//!     println!("{}", answer.text);
//! }
//! ```

pub mod generator;
pub mod prompt;
pub mod retry;
pub mod sse;
pub mod vertex;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use generator::{collect_chunks, ChunkStream, GenerationError, TextGenerator};
pub use prompt::{GenerationParams, HarmCategory, SafetySetting, SYMPTOM_CHECKER_INSTRUCTION};
pub use retry::{Generated, RetryPolicy, RetryingGenerator};
pub use sse::SseDecoder;
pub use vertex::VertexGenerator;
