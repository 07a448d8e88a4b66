//! Platform settings location using the `dirs` crate.
//!
//! Layout:
//!
//!   Windows: %APPDATA%\symptom-checker\settings.toml
//!   macOS:   ~/Library/Application Support/symptom-checker/settings.toml
//!   Linux:   ~/.config/symptom-checker/settings.toml
//!
//! `SYMPTOM_CHECKER_CONFIG` overrides this path entirely.

use std::path::PathBuf;

/// Resolved configuration paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory holding `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "symptom-checker";

    /// Falls back to the current directory when the platform has no config
    /// directory (containers without `$HOME`).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);
        let settings_file = config_dir.join("settings.toml");

        Self {
            config_dir,
            settings_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
