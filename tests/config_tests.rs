//! Integration tests for loading and validating world configuration.

use std::io::Write;

use blockworld::{TerrainMode, WorldConfig, WorldError};

#[test]
fn test_defaults() {
    let config = WorldConfig::default();
    assert_eq!(config.seed, 0);
    assert_eq!(config.chunk_size, 16);
    assert_eq!(config.max_height, 64);
    assert_eq!(config.base_height, 32);
    assert_eq!(config.height_variation, 16);
    assert_eq!(config.render_distance, 8);
    assert_eq!(config.unload_distance(), 10);
    assert_eq!(config.sea_level(), 27);
    assert_eq!(config.terrain_mode, TerrainMode::Noise);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = WorldConfig::from_json_str(r#"{ "seed": 1337, "terrain_mode": "flat" }"#)
        .expect("valid config");
    assert_eq!(config.seed, 1337);
    assert_eq!(config.terrain_mode, TerrainMode::Flat);
    assert_eq!(config.render_distance, 8);

    let empty = WorldConfig::from_json_str("{}").expect("valid config");
    assert_eq!(empty, WorldConfig::default());
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let cases = [
        r#"{ "chunk_size": 0 }"#,
        r#"{ "max_height": -4 }"#,
        r#"{ "base_height": 2 }"#,
        r#"{ "base_height": 64 }"#,
        r#"{ "height_variation": -1 }"#,
        r#"{ "base_height": 50, "height_variation": 14 }"#,
        r#"{ "render_distance": -1 }"#,
        r#"{ "unload_margin": -2 }"#,
    ];

    for json in cases {
        let result = WorldConfig::from_json_str(json);
        assert!(
            matches!(result, Err(WorldError::InvalidConfig(_))),
            "{json} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let result = WorldConfig::from_json_str(r#"{ "seed": "many" }"#);
    assert!(matches!(result, Err(WorldError::Parse(_))));

    let result = WorldConfig::from_json_str(r#"{ "terrain_mode": "hilly" }"#);
    assert!(matches!(result, Err(WorldError::Parse(_))));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "seed": 7, "render_distance": 3 }}"#).expect("write config");

    let config = WorldConfig::load(file.path()).expect("valid config file");
    assert_eq!(config.seed, 7);
    assert_eq!(config.render_distance, 3);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing.json");

    match WorldConfig::load(&path) {
        Err(WorldError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn test_config_round_trips_through_json() {
    let config = WorldConfig {
        seed: 99,
        terrain_mode: TerrainMode::Flat,
        ..Default::default()
    };
    let json = serde_json::to_string(&config).expect("serialize");
    assert_eq!(WorldConfig::from_json_str(&json).expect("parse"), config);
}

#[test]
fn test_lowest_terrain_must_stay_above_zero() {
    let dipping = WorldConfig {
        base_height: 10,
        height_variation: 12,
        ..Default::default()
    };
    assert!(matches!(dipping.validate(), Err(WorldError::InvalidConfig(_))));

    let touching = WorldConfig {
        base_height: 16,
        height_variation: 16,
        ..Default::default()
    };
    assert!(touching.validate().is_ok());
}

#[test]
fn test_trees_and_structures_must_fit_under_max_height() {
    let cramped = WorldConfig {
        max_height: 36,
        base_height: 20,
        height_variation: 15,
        ..Default::default()
    };
    assert!(matches!(cramped.validate(), Err(WorldError::InvalidConfig(_))));

    let snug = WorldConfig {
        max_height: 35,
        base_height: 20,
        height_variation: 6,
        ..Default::default()
    };
    assert!(snug.validate().is_ok());
    assert!(matches!(
        WorldConfig { max_height: 34, ..snug }.validate(),
        Err(WorldError::InvalidConfig(_))
    ));
}
