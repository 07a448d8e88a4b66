//! Configuration module for the symptom checker service.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each outbound
//! collaborator, `AppPaths` for the platform settings location, environment
//! overrides and TOML persistence.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, ConfigError, DwaniConfig, GenerationConfig, GoogleConfig, PipelineConfig,
    ServerConfig, SpeechBackend, SpeechConfig,
};
