//! Application entry point: symptom checker HTTP service.
//!
//! # Startup sequence
//!
//! 1. Load `.env` if present.
//! 2. Initialise logging.
//! 3. Load and validate [`AppConfig`] (file, then environment overrides).
//! 4. Build one shared HTTP client with the configured timeout.
//! 5. Wire detector, translator, generator and speech backends into the
//!    pipeline.
//! 6. Serve until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use symptom_checker::{config::AppConfig, logging, pipeline::build_pipeline, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    log::info!(
        "Config loaded: model={}, speech={:?}, retries={}",
        config.generation.model,
        config.speech.backend,
        config.generation.max_retries
    );

    let client = reqwest::Client::builder()
        .timeout(config.pipeline.request_timeout())
        .build()
        .context("Failed to build HTTP client")?;

    let pipeline = Arc::new(build_pipeline(client, &config));

    server::serve(&config.server, pipeline).await
}
