//! Integration tests for gverb-config.
//!
//! These tests verify end-to-end functionality across modules: preset files
//! on disk driving a running reverb engine.

use gverb::{ReverbEngine, ReverbParameters};
use gverb_config::{
    ConfigError, ReverbPreset, ValidationError, factory_presets, get_factory_preset,
    validate_preset,
};
use gverb_core::Effect;
use tempfile::TempDir;

fn impulse_energy(engine: &mut ReverbEngine, len: usize) -> f64 {
    (0..len)
        .map(|i| {
            let (l, r) = engine.process(if i == 0 { 1.0 } else { 0.0 });
            f64::from(l) * f64::from(l) + f64::from(r) * f64::from(r)
        })
        .sum()
}

/// Save a preset, load it back and check both drive identical engines.
#[test]
fn test_preset_save_load_roundtrip() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let preset_path = temp_dir.path().join("nested").join("stairwell.toml");

    let original = ReverbPreset::from_parameters(
        "Stairwell",
        &ReverbParameters {
            roomsize: 12.0,
            revtime: 3.5,
            damping: 0.25,
            ..Default::default()
        },
    )
    .with_description("Concrete and glass")
    .with_sample_rate(44100);

    original.save(&preset_path).expect("should save preset");
    let loaded = ReverbPreset::load(&preset_path).expect("should load preset");
    assert_eq!(loaded, original);

    let mut a = original.engine();
    let mut b = loaded.engine();
    for i in 0..2000 {
        let input = (i as f32 * 0.05).sin() * 0.5;
        assert_eq!(a.process(input), b.process(input));
    }
}

/// A hand-written file with only some controls set.
#[test]
fn test_partial_preset_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("closet.toml");
    std::fs::write(
        &path,
        r#"
name = "Closet"

[parameters]
roomsize = 2.0
revtime = 0.4
"#,
    )
    .unwrap();

    let preset = ReverbPreset::load(&path).unwrap();
    assert!(validate_preset(&preset).is_ok());

    let params = preset.to_parameters();
    assert_eq!(params.roomsize, 2.0);
    assert_eq!(params.revtime, 0.4);
    assert_eq!(params.tail, ReverbParameters::default().tail);
}

/// Out-of-range files load, fail validation, and are clamped when applied.
#[test]
fn test_out_of_range_file() {
    let preset = ReverbPreset::from_toml(
        r#"
name = "Impossible"
[parameters]
roomsize = 5000.0
bandwidth = -2.0
"#,
    )
    .unwrap();

    match validate_preset(&preset) {
        Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected two violations, got {other:?}"),
    }

    let mut engine = ReverbEngine::new(48000.0);
    preset.apply_to(&mut engine);
    assert_eq!(engine.parameters().roomsize, 300.0);
    assert_eq!(engine.parameters().bandwidth, 0.0);
}

/// Strict loading rejects the same file that plain loading clamps.
#[test]
fn test_strict_load_rejects_out_of_range_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("too_big.toml");
    std::fs::write(
        &path,
        r#"
name = "Too Big"
[parameters]
roomsize = 5000.0
"#,
    )
    .unwrap();

    assert!(ReverbPreset::load(&path).is_ok());
    match ReverbPreset::load_strict(&path) {
        Err(ConfigError::Validation(ValidationError::OutOfRange { param, .. })) => {
            assert_eq!(param, "roomsize");
        }
        other => panic!("expected an out-of-range error, got {other:?}"),
    }

    let err = ReverbPreset::load_strict(&path).unwrap_err();
    assert!(err.to_string().starts_with("validation failed"), "got: {err}");
}

#[test]
fn test_strict_load_accepts_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hall.toml");
    let preset = get_factory_preset("nice_hall").unwrap();
    preset.save(&path).unwrap();
    assert_eq!(ReverbPreset::load_strict(&path).unwrap(), preset);
}

#[test]
fn test_missing_file_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = ReverbPreset::load(temp_dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

/// Every factory preset builds an engine that rings and stays finite.
#[test]
fn test_factory_presets_drive_engine() {
    for preset in factory_presets() {
        let mut engine = preset.engine();
        assert_eq!(engine.sample_rate(), 48000.0);

        let energy = impulse_energy(&mut engine, 4800);
        assert!(energy.is_finite(), "preset '{}' produced non-finite output", preset.name);
        assert!(energy > 0.0, "preset '{}' produced silence", preset.name);
    }
}

/// A big hall rings longer than a quick fix.
#[test]
fn test_factory_presets_differ() {
    let tail_energy = |name: &str| {
        let preset = get_factory_preset(name).unwrap();
        let mut engine = preset.engine();
        impulse_energy(&mut engine, 48000);
        impulse_energy(&mut engine, 48000)
    };
    assert!(tail_energy("nice_hall") > tail_energy("bright_small_hall"));
}

/// Switching presets on a running engine glides without blowing up.
#[test]
fn test_preset_switching_on_running_engine() {
    let mut engine = ReverbEngine::new(48000.0);
    for (i, preset) in factory_presets().iter().enumerate() {
        preset.apply_to(&mut engine);
        assert_eq!(engine.parameters(), preset.to_parameters());
        for n in 0..1000 {
            let (l, r) = engine.process(if (i + n) % 7 == 0 { 0.5 } else { 0.0 });
            assert!(l.is_finite() && r.is_finite());
        }
    }
}
