use tempfile::TempDir;

use fitscube_core::config::{LoadPolicy, ViewerConfig};
use fitscube_core::error::FitscubeError;

#[test]
fn test_default_config_values() {
    let config = ViewerConfig::default();
    assert_eq!(config.progress_step, 1);
    assert!(!config.sort_entries);
    assert_eq!(config.load_policy, LoadPolicy::Restart);
    assert_eq!(config.max_zoom_steps, 7);
    assert_eq!(config.zoom_in_factor, 1.25);
    assert_eq!(config.zoom_out_factor, 0.75);
    assert_eq!(config.default_contrast, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_toml_roundtrip() {
    let config = ViewerConfig {
        progress_step: 5,
        sort_entries: true,
        load_policy: LoadPolicy::Reject,
        max_zoom_steps: 4,
        zoom_in_factor: 1.5,
        zoom_out_factor: 0.5,
        default_contrast: 30,
    };
    let text = config.to_toml().unwrap();
    assert!(text.contains("load_policy = \"Reject\""));
    assert_eq!(ViewerConfig::from_toml(&text).unwrap(), config);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = ViewerConfig::from_toml("sort_entries = true\n").unwrap();
    assert!(config.sort_entries);
    assert_eq!(config.progress_step, 1);
    assert_eq!(config.load_policy, LoadPolicy::Restart);
}

#[test]
fn test_invalid_values_rejected() {
    for text in [
        "progress_step = 0",
        "max_zoom_steps = 0",
        "zoom_in_factor = 0.9",
        "zoom_out_factor = 1.0",
    ] {
        assert!(
            matches!(ViewerConfig::from_toml(text), Err(FitscubeError::Config(_))),
            "{text}"
        );
    }
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fitscube.toml");
    let config = ViewerConfig {
        default_contrast: 12,
        ..ViewerConfig::default()
    };
    config.save(&path).unwrap();
    assert_eq!(ViewerConfig::load(&path).unwrap(), config);
}
