use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::card::{CardFonts, CardRenderer, CardTheme};
use crate::share::ShareOptions;

const DEFAULT_USER_AGENT: &str = "valentine-cli (X11; Linux x86_64)";

/// Settings shared by every command, read from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// JSON-lines letter store.
    pub store: PathBuf,
    /// Where downloaded cards are written.
    pub output_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_font: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_font: Option<PathBuf>,
    pub branding: String,
    pub deep_link_timeout_ms: u64,
    /// User agent the local platform reports when classifying itself.
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: PathBuf::from("letters.jsonl"),
            output_dir: PathBuf::from("."),
            display_font: None,
            body_font: None,
            branding: CardTheme::default().branding,
            deep_link_timeout_ms: 1500,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Card renderer using the configured fonts, falling back to the pixel face.
    pub fn renderer(&self) -> CardRenderer {
        let fonts = CardFonts::load_or_fallback(
            self.display_font.as_deref(),
            self.body_font.as_deref(),
        );
        CardRenderer::new(fonts, CardTheme::with_branding(self.branding.clone()))
    }

    pub fn share_options(&self) -> ShareOptions {
        ShareOptions {
            branding: self.branding.clone(),
            deep_link_timeout: Duration::from_millis(self.deep_link_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valentine.json");
        fs::write(&path, r#"{"branding": "@cupid", "deep_link_timeout_ms": 250}"#).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.branding, "@cupid");
        assert_eq!(config.store, PathBuf::from("letters.jsonl"));
        assert_eq!(config.share_options().deep_link_timeout, Duration::from_millis(250));
        assert_eq!(config.renderer().theme().branding, "@cupid");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"colour": "red"}"#).unwrap();
        assert!(AppConfig::load(&path).is_err());
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }
}
