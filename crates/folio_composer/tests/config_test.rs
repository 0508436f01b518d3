//! Tests for composer configuration loading.

use folio_composer::{ComposerConfig, LimitsConfig};
use std::io::Write;

#[test]
fn test_load_bundled_defaults() {
    let config = ComposerConfig::load().unwrap();

    assert_eq!(config.limits.image_max_mb, 10);
    assert_eq!(config.limits.video_max_mb, 500);
    assert_eq!(config.limits.audio_max_mb, 50);
    assert_eq!(config.limits.pdf_max_mb, 50);
    assert_eq!(config.limits.caption_max_chars, 170);
    assert_eq!(config.gesture.reveal_width, 70);
    assert_eq!(config.gesture.open_threshold, 30);
    assert_eq!(config.text.bullet, '•');
    assert_eq!(config.layout.text_aspect_ratio, "4:5");
}

#[test]
fn test_bundled_defaults_match_default_impl() {
    let bundled = ComposerConfig::load().unwrap();
    assert_eq!(bundled, ComposerConfig::default());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(file, "[limits]\nvideo_max_mb = 200\n\n[submission]\ndiscard_orphans = false").unwrap();

    let config = ComposerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.limits.video_max_mb, 200);
    assert_eq!(config.limits.image_max_mb, 10);
    assert!(!config.submission.discard_orphans);
    assert_eq!(config.progress.ceiling, 90);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ComposerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.user_message().contains("Failed to read configuration"));
}

#[test]
fn test_malformed_toml_is_rejected() {
    assert!(ComposerConfig::from_toml_str("[gesture]\nreveal_width = \"wide\"").is_err());
}

#[test]
fn test_megabytes_are_binary() {
    assert_eq!(LimitsConfig::bytes(1), 1_048_576);
    assert_eq!(LimitsConfig::bytes(u64::MAX), u64::MAX);
}
