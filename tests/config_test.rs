//! Configuration loading tests
//!
//! Tests that configuration files load correctly and provide expected
//! default values

use dsynth::audio::{AudioFormat, SampleWidth};
use dsynth::config::Config;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_missing_config_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dsynth.cfg");

    let config = Config::load_from(&path).expect("Failed to load config");
    assert!(path.exists());
    assert_eq!(config.path(), &path);

    assert_eq!(config.diphones_dir(), PathBuf::from("./diphones"));
    assert_eq!(config.dictionary_path(), PathBuf::from("./cmudict.dict"));
    assert!(!config.crossfade());
    assert_eq!(config.overlap_ms(), 10.0);
}

#[test]
fn test_config_values_are_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dsynth.cfg");
    fs::write(
        &path,
        "[paths]\ndiphones = /opt/voices/kal\n\n\
         [synth]\ncrossfade = true\noverlap_ms = 5\nsample_rate = 22050\n\n\
         [output]\nvolume = 80\nplayer = paplay\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.diphones_dir(), PathBuf::from("/opt/voices/kal"));
    assert!(config.crossfade());
    assert_eq!(config.volume().as_deref(), Some("80"));
    assert_eq!(config.player().as_deref(), Some("paplay"));

    let settings = config.synth_settings();
    assert!((settings.overlap_seconds - 0.005).abs() < 1e-12);
    assert_eq!(
        settings.fallback_format,
        AudioFormat::new(22_050, SampleWidth::I16)
    );
}

#[test]
fn test_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dsynth.cfg");

    let mut config = Config::load_from(&path).unwrap();
    config.set("synth", "crossfade", "true");
    config.save().unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert!(reloaded.crossfade());
}
