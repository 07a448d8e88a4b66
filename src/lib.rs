//! Symptom checker: multilingual triage answers with synthesized speech.

pub mod config;
pub mod language;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod server;
pub mod speech;
