// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use std::path::PathBuf;
use supercam::Config;
use supercam::backends::camera::CaptureSource;
use supercam::errors::ConfigError;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(config.photo_dir.is_none(), "No photo dir override by default");
    assert!(
        matches!(config.capture_source, CaptureSource::TestPattern { .. }),
        "Virtual camera should default to the test pattern"
    );
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        photo_dir: Some(PathBuf::from("/srv/photos")),
        capture_source: CaptureSource::File(PathBuf::from("/srv/sensor.jpg")),
        ..Default::default()
    };
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::Parse(_, _))
    ));
}

#[test]
fn test_hand_written_capture_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "capture_source": { "test_pattern": { "width": 320, "height": 240 } } }"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(
        config.capture_source,
        CaptureSource::TestPattern {
            width: 320,
            height: 240
        }
    );
    assert!(config.capture_dir.is_none());
}
