//! Integration tests for duostomp-config.
//!
//! These tests exercise config files on disk and feed loaded settings into a
//! booted pedal.

use duostomp_config::{ConfigError, PedalConfig, Settings, ValidationError};
use duostomp_core::UnitId;
use duostomp_core::units::reverb;
use duostomp_pedal::controls::{KNOB_2B, STOMP_2};
use duostomp_pedal::{BankRack, EffectRack, Pedal, SimPlatform};
use tempfile::TempDir;

#[test]
fn test_save_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("round.toml");

    let mut config = PedalConfig::new("Round trip").with_description("every group touched");
    config.settings.controls.sensitivity = 10;
    config.settings.filters.resonance = 1.2;
    config.settings.modulation.rate.max = 3.5;
    config.settings.pitch.deviations = [1.25, 1.5, 2.0, 3.0];
    config.settings.drive.makeup_gain = 0.5;
    config.settings.ambience.damping = 0.4;

    config.save(&path).unwrap();
    let loaded = PedalConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    loaded.validate().unwrap();
}

#[test]
fn test_save_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("pedal.toml");
    PedalConfig::default().save(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = PedalConfig::load(&path).unwrap_err();
    match err {
        ConfigError::ReadFile { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ReadFile, got {other:?}"),
    }
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[settings.ambience]\ndamping = 0.5\n").unwrap();

    let config = PedalConfig::load_validated(&path).unwrap();
    assert_eq!(config.name, "Stock");
    assert_eq!(config.settings.ambience.damping, 0.5);
    assert_eq!(config.settings.controls, Settings::default().controls);
    assert_eq!(config.settings.pitch, Settings::default().pitch);
}

#[test]
fn test_load_validated_rejects_bad_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[settings.pitch]\ndeviations = [0.0, 2.0, 3.0, 4.0]\n").unwrap();

    assert!(PedalConfig::load(&path).is_ok());
    let err = PedalConfig::load_validated(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::NotPositive { ref param, .. })
            if param == "pitch.deviations[0]"
    ));
}

#[test]
fn test_loaded_settings_drive_the_pedal() {
    let config = PedalConfig::from_toml(
        r#"
[settings.controls]
sensitivity = 2

[settings.ambience]
damping = 0.3
"#,
    )
    .unwrap();
    config.validate().unwrap();

    let mut sim = SimPlatform::new();
    sim.set_stomp(STOMP_2, true);
    sim.set_knob(KNOB_2B, 500);
    let mut pedal = Pedal::boot(sim, BankRack::new(), config.settings);
    assert_eq!(pedal.rack().get(UnitId::Reverb, reverb::DAMPING), 0.3);

    // A 3-count move clears the narrowed dead zone
    pedal.platform_mut().set_knob(KNOB_2B, 503);
    pedal.platform_mut().advance(300);
    pedal.tick(&mut (), &mut ());
    assert_eq!(pedal.state().knobs2.b.last_seen(), 503);
}
