//! Application wiring: configuration, draft storage and the backend client.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use stayhub_config::{Config, ConfigManager};
use stayhub_core::{
    BookingService, ListingService, WizardController, WizardSettings,
};
use stayhub_domain::PropertyCategory;
use stayhub_gateway::HttpGateway;
use stayhub_media::CompressionSettings;
use stayhub_storage_json::JsonDraftStore;
use tracing::info;

use crate::AppError;

/// Everything a host needs to run onboarding against one backend.
pub struct App {
    config: Config,
    config_manager: ConfigManager,
    drafts: Arc<JsonDraftStore>,
    gateway: Arc<HttpGateway>,
}

impl App {
    /// Loads configuration from `$STAYHUB_HOME` (or `~/.stayhub`).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_manager(ConfigManager::from_env()?)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, AppError> {
        Self::from_manager(ConfigManager::with_base_dir(base)?)
    }

    fn from_manager(config_manager: ConfigManager) -> Result<Self, AppError> {
        let config = config_manager.load_effective()?;
        let drafts_dir = config_manager.drafts_dir(&config);
        let drafts = Arc::new(JsonDraftStore::new(drafts_dir)?);
        let gateway = Arc::new(HttpGateway::with_options(
            config.api_base_url.clone(),
            config.auth_token.clone(),
            config.request_timeout(),
        )?);
        info!(
            api = %config.api_base_url,
            drafts = %drafts.drafts_dir().display(),
            "application ready"
        );
        Ok(Self {
            config,
            config_manager,
            drafts,
            gateway,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_dir(&self) -> &Path {
        self.config_manager.base_dir()
    }

    pub fn drafts(&self) -> &JsonDraftStore {
        &self.drafts
    }

    pub fn gateway(&self) -> Arc<HttpGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn wizard_settings(&self) -> WizardSettings {
        wizard_settings(&self.config)
    }

    pub fn compression_settings(&self) -> CompressionSettings {
        compression_settings(&self.config)
    }

    pub fn open_new_wizard(&self, category: PropertyCategory) -> WizardController {
        WizardController::open_new(
            category,
            self.gateway.clone(),
            self.drafts.clone(),
            &self.wizard_settings(),
        )
    }

    pub async fn open_existing_wizard(&self, property_id: &str) -> Result<WizardController, AppError> {
        Ok(WizardController::open_existing(
            property_id,
            self.gateway.clone(),
            self.drafts.clone(),
            &self.wizard_settings(),
        )
        .await?)
    }

    pub fn listing(&self) -> ListingService {
        ListingService::new(
            self.gateway.clone(),
            self.drafts.clone(),
            self.config.draft_key_prefix.clone(),
        )
    }

    pub fn bookings(&self) -> BookingService {
        BookingService::new(self.gateway.clone())
    }
}

pub fn wizard_settings(config: &Config) -> WizardSettings {
    WizardSettings {
        autosave_delay: config.autosave_delay(),
        draft_prefix: config.draft_key_prefix.clone(),
    }
}

pub fn compression_settings(config: &Config) -> CompressionSettings {
    CompressionSettings {
        threshold_bytes: config.image.threshold_bytes,
        max_width: config.image.max_width,
        max_height: config.image.max_height,
        quality: config.image.quality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_config() {
        let mut config = Config::default();
        config.autosave_delay_ms = 300;
        config.draft_key_prefix = "drafts".into();
        config.image.quality = 65;

        let wizard = wizard_settings(&config);
        assert_eq!(wizard.autosave_delay.as_millis(), 300);
        assert_eq!(wizard.draft_prefix, "drafts");
        assert_eq!(compression_settings(&config).quality, 65);
        assert_eq!(compression_settings(&config).max_width, 1920);
    }
}
