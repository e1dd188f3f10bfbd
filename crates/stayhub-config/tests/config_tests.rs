use std::collections::HashMap;

use stayhub_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_matches_client_defaults() {
    let cfg = Config::default();

    assert!(!cfg.api_base_url.is_empty());
    assert_eq!(cfg.draft_key_prefix, "property_wizard_draft");
    assert_eq!(cfg.autosave_delay().as_millis(), 800);
    assert_eq!(cfg.image.threshold_bytes, 9_961_472);
    assert_eq!((cfg.image.max_width, cfg.image.max_height), (1920, 1920));
    assert_eq!(cfg.image.quality, 80);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().join("home")).expect("manager");

    let mut cfg = Config::default();
    cfg.api_base_url = "https://partners.stayhub.test/api".to_string();
    cfg.auth_token = Some("secret".to_string());
    cfg.autosave_delay_ms = 1500;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(manager.config_path().exists());
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    std::fs::write(manager.config_path(), r#"{"autosave_delay_ms": 250}"#).expect("write");

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.autosave_delay_ms, 250);
    assert_eq!(loaded.image, Config::default().image);
    assert_eq!(manager.drafts_dir(&loaded), dir.path().join("drafts"));
}

#[test]
fn overrides_replace_url_and_token() {
    let env: HashMap<&str, &str> = [
        ("STAYHUB_API_URL", "https://api.stayhub.test/v1/"),
        ("STAYHUB_TOKEN", "  tok_123 "),
    ]
    .into();
    let mut cfg = Config::default();
    cfg.apply_overrides(|key| env.get(key).map(|v| v.to_string()))
        .expect("apply overrides");

    assert_eq!(cfg.api_base_url, "https://api.stayhub.test/v1");
    assert_eq!(cfg.auth_token.as_deref(), Some("tok_123"));
}

#[test]
fn malformed_url_override_is_rejected() {
    let mut cfg = Config::default();
    let err = cfg
        .apply_overrides(|key| (key == "STAYHUB_API_URL").then(|| "ftp://nope".to_string()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}
