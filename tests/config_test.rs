//! 設定ファイルのテスト

use tempfile::tempdir;
use visionguide::config::{Config, DEFAULT_SERVER_URL};
use visionguide_common::RecognitionPage;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    assert_eq!(config.default_location, "New York");
    assert_eq!(config.default_page, None);
}

/// 保存先のフォルダがなくても作る
#[test]
fn test_save_creates_parent_dirs() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(".config").join("visionguide").join("config.json");

    let mut config = Config::default();
    config.set_server("http://192.168.0.10:5000").unwrap();
    config.default_page = Some(RecognitionPage::Architecture);
    config.save_to(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"default_page\": \"architecture\""));
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

/// 項目が欠けた古い設定ファイルも読める
#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"default_location": "Paris"}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.default_location, "Paris");
    assert_eq!(config.server_url, DEFAULT_SERVER_URL);
}

#[test]
fn test_broken_file_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}
