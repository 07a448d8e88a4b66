//! Symptom-checker orchestration.
//!
//! [`SymptomPipeline`] sequences detection, translation, generation and
//! speech for one [`SymptomRequest`] and produces a [`PipelineResult`].
//! It holds no per-request state and is shared behind an `Arc` by the HTTP
//! server.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use symptom_checker::config::AppConfig;
//! use symptom_checker::pipeline::{build_pipeline, SymptomRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let client = reqwest::Client::builder()
//!         .timeout(config.pipeline.request_timeout())
//!         .build()?;
//!     let pipeline = Arc::new(build_pipeline(client, &config));
//!
//!     let result = pipeline
//!         .run(SymptomRequest::new("I have a headache", None))
//!         .await?;
//!     println!("{} ({})", result.result_text, result.status_message);
//!     Ok(())
//! }
//! ```

pub mod runner;
pub mod state;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::language::{CloudTranslateClient, FallbackDetector, FallbackTranslator};
use crate::llm::{RetryPolicy, RetryingGenerator, VertexGenerator, SYMPTOM_CHECKER_INSTRUCTION};
use crate::speech::{select_backend, DwaniTts, FallbackSynthesizer, GoogleTts};

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{PipelineError, SymptomPipeline};
pub use state::{
    AudioStatus, LanguageSource, PipelineResult, PipelineStage, PipelineTrace, SymptomRequest,
    TranslationStep, WORKING_LANGUAGE,
};

/// Wire the production backends from `config`, sharing one HTTP client.
pub fn build_pipeline(client: reqwest::Client, config: &AppConfig) -> SymptomPipeline {
    let translate = Arc::new(CloudTranslateClient::new(client.clone(), &config.google));

    let vertex = VertexGenerator::new(
        client.clone(),
        &config.google,
        &config.generation,
        SYMPTOM_CHECKER_INSTRUCTION,
    );

    let google_tts = Arc::new(GoogleTts::new(client.clone(), &config.google, &config.speech));
    let dwani_tts = Arc::new(DwaniTts::new(client, &config.dwani));
    log::info!("Speech backend policy: {:?}", config.speech.backend);

    SymptomPipeline::new(
        FallbackDetector::new(translate.clone(), config.pipeline.fallback_language.clone()),
        FallbackTranslator::new(translate),
        RetryingGenerator::new(
            Arc::new(vertex),
            RetryPolicy::from_config(&config.generation),
        ),
        FallbackSynthesizer::new(select_backend(config.speech.backend, google_tts, dwani_tts)),
    )
}
