//! Service settings structs, defaults, environment overrides and the TOML
//! settings file.
//!
//! Every section is `#[serde(default)]`, so a settings file only needs the
//! keys it changes.
//! Credentials normally arrive through the environment (see
//! [`AppConfig::apply_env`]); the TOML file is for non-secret tuning.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use thiserror::Error;

use super::AppPaths;

// ---------------------------------------------------------------------------
// Environment variable names
// ---------------------------------------------------------------------------

pub const ENV_PROJECT_ID: &str = "GCP_PROJECT_ID";
pub const ENV_ACCESS_TOKEN: &str = "GCP_ACCESS_TOKEN";
pub const ENV_DWANI_API_KEY: &str = "DWANI_API_KEY";
pub const ENV_DWANI_BASE_URL: &str = "DWANI_API_BASE_URL";
pub const ENV_HOST: &str = "SYMPTOM_CHECKER_HOST";
pub const ENV_PORT: &str = "SYMPTOM_CHECKER_PORT";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_CONFIG_PATH: &str = "SYMPTOM_CHECKER_CONFIG";

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Startup validation failures.  Any of these aborts the process.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A required value is absent or empty.
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    /// A value is present but cannot be parsed.
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

/// Inbound HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            allowed_origins: vec!["http://localhost:3000".into()],
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ---------------------------------------------------------------------------
// GoogleConfig
// ---------------------------------------------------------------------------

/// Google Cloud project, credentials and endpoint bases.
///
/// The base URLs exist so tests and private deployments can point at a
/// different host; production uses the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// Project identifier used in every Translate / Vertex AI resource path.
    pub project_id: String,
    /// OAuth2 bearer token.
        pub access_token: String,
    /// Resource location, `"global"` unless pinned to a region.
    pub location: String,
    pub translate_base_url: String,
    pub vertex_base_url: String,
    pub tts_base_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            access_token: String::new(),
            location: "global".into(),
            translate_base_url: "https://translation.googleapis.com".into(),
            vertex_base_url: "https://aiplatform.googleapis.com".into(),
            tts_base_url: "https://texttospeech.googleapis.com".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// DwaniConfig
// ---------------------------------------------------------------------------

/// Dwani speech API credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DwaniConfig {
    pub base_url: String,
        pub api_key: String,
}

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

/// LLM generation parameters and retry policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Vertex AI publisher model id.
    pub model: String,
    pub temperature: f32,
    /// Nucleus-sampling cutoff.
    pub top_p: f32,
    /// Fixed seed so identical prompts produce identical answers.
    pub seed: i32,
    pub max_output_tokens: u32,
    /// Total attempts, including the first one.
    pub max_retries: u32,
    /// Fixed pause between attempts.
    pub retry_delay_secs: u64,
    /// Retry every failure kind instead of only unavailable / deadline
    /// exceeded.  Also retries permanent failures such as bad credentials.
    pub retry_all_errors: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-001".into(),
            temperature: 0.7,
            top_p: 1.0,
            seed: 0,
            max_output_tokens: 1024,
            max_retries: 3,
            retry_delay_secs: 2,
            retry_all_errors: false,
        }
    }
}

impl GenerationConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Which text-to-speech backend serves a given language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackend {
    /// English through Google Cloud TTS, every other language through Dwani.
    #[default]
    Routed,
    /// Google Cloud TTS for every language.
    Google,
    /// Dwani for every language.
    Dwani,
}

/// Text-to-speech settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub backend: SpeechBackend,
    /// Google voice locale, e.g. `"en-US"`.
    pub google_language_code: String,
    /// Google voice name, e.g. `"en-US-Wavenet-D"`.
    pub google_voice: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            backend: SpeechBackend::default(),
            google_language_code: "en-US".into(),
            google_voice: "en-US-Wavenet-D".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Orchestrator-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Tag reported when detection fails.
    pub fallback_language: String,
    /// Per-request HTTP timeout applied to every outbound client.
    pub request_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fallback_language: "en".into(),
            request_timeout_secs: 60,
        }
    }
}

impl PipelineConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level service configuration, read from `settings.toml`.
///
/// Built once in `main` and passed by reference into every client
/// constructor; nothing reads the environment after startup.
///
/// ```rust,no_run
/// use symptom_checker::config::AppConfig;
///
/// let config = AppConfig::load().unwrap();
/// println!("listening on {}", config.server.bind_addr());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub google: GoogleConfig,
    pub dwani: DwaniConfig,
    pub generation: GenerationConfig,
    pub speech: SpeechConfig,
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load the settings file (if any), apply environment overrides and
    /// validate.
    ///
    /// The file is `$SYMPTOM_CHECKER_CONFIG` when set, else the
    /// platform-appropriate `settings.toml`.  A missing file yields defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| AppPaths::new().settings_file);

        let mut config = Self::load_from(&path)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Overlay values from the environment.  `lookup` returns `None` for
    /// unset variables; empty strings are ignored so they never clobber a
    /// file value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_PROJECT_ID) {
            self.google.project_id = v;
        }
        if let Some(v) = get(ENV_ACCESS_TOKEN) {
            self.google.access_token = v;
        }
        if let Some(v) = get(ENV_DWANI_API_KEY) {
            self.dwani.api_key = v;
        }
        if let Some(v) = get(ENV_DWANI_BASE_URL) {
            self.dwani.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get(ENV_HOST) {
            self.server.host = v;
        }
        if let Some(v) = get(ENV_PORT) {
            self.server.port = v.trim().parse().map_err(|_| ConfigError::Invalid {
                name: ENV_PORT,
                value: v.clone(),
            })?;
        }
        if let Some(v) = get(ENV_MODEL) {
            self.generation.model = v;
        }
        Ok(())
    }

    /// Check that every required value is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            (ENV_DWANI_API_KEY, &self.dwani.api_key),
            (ENV_DWANI_BASE_URL, &self.dwani.base_url),
            (ENV_PROJECT_ID, &self.google.project_id),
            (ENV_ACCESS_TOKEN, &self.google.access_token),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
