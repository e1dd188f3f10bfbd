use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

use crate::ConfigError;

pub const API_URL_ENV: &str = "STAYHUB_API_URL";
pub const TOKEN_ENV: &str = "STAYHUB_TOKEN";

/// Partner client settings persisted as `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    pub request_timeout_secs: u64,
    pub draft_key_prefix: String,
    pub autosave_delay_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for wizard drafts. Defaults to `~/.stayhub/drafts`.
    pub drafts_dir: Option<PathBuf>,
    pub image: ImageSettings,
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".into(),
            auth_token: None,
            request_timeout_secs: 30,
            draft_key_prefix: "property_wizard_draft".into(),
            autosave_delay_ms: 800,
            drafts_dir: None,
            image: ImageSettings::default(),
            ui_color_enabled: true,
        }
    }
}

/// Upload compression parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Files at or below this size are uploaded untouched.
    pub threshold_bytes: u64,
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            threshold_bytes: 9_961_472,
            max_width: 1920,
            max_height: 1920,
            quality: 80,
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Drafts live under `home` unless a custom directory is configured.
    pub fn resolve_drafts_dir(&self, home: &std::path::Path) -> PathBuf {
        match &self.drafts_dir {
            Some(path) => path.clone(),
            None => home.join("drafts"),
        }
    }

    /// Applies `STAYHUB_API_URL` / `STAYHUB_TOKEN` from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    key: API_URL_ENV.into(),
                    value: url.into(),
                });
            }
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(token) = lookup(TOKEN_ENV) {
            let token = token.trim();
            self.auth_token = (!token.is_empty()).then(|| token.to_string());
        }
        Ok(())
    }
}
