//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use image_composer::TextConfig;

use super::defaults::{
    self, DEFAULT_FOREGROUND, FONT_CANDIDATES, IMAGES_DIR, LINE_SPACING, WRAP_CHARS,
};
use super::validation::validate_setting;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Searched for a background when `--background` is omitted.
    pub images_dir: PathBuf,
    pub default_foreground: PathBuf,
    pub text: TextConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                match validate_setting(key, &value) {
                    Ok(()) => return value,
                    Err(e) => match defaults::get_def(key) {
                        Some(def) => tracing::warn!("{}", def.rejection_message(&value, &e)),
                        None => tracing::warn!("Ignoring {key}={value:?}: {e}"),
                    },
                }
            }
            defaults::get_default(key).unwrap_or_default().to_string()
        };

        let mut font_candidates: Vec<PathBuf> = lookup(FONT_CANDIDATES)
            .map(|v| std::env::split_paths(&v).filter(|p| !p.as_os_str().is_empty()).collect())
            .unwrap_or_default();
        font_candidates.extend(defaults::platform_font_candidates());

        let text = TextConfig {
            wrap_chars: g(WRAP_CHARS).trim().parse().unwrap_or(18),
            line_spacing_ratio: g(LINE_SPACING).trim().parse().unwrap_or(0.2),
            font_candidates,
            ..TextConfig::default()
        };

        Self {
            images_dir: PathBuf::from(g(IMAGES_DIR)),
            default_foreground: PathBuf::from(g(DEFAULT_FOREGROUND)),
            text,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
