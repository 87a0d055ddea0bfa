use courtyard::{ConfigError, SceneConfig, TieBreak, Variant};
use tempfile::TempDir;

#[test]
fn config_round_trips_through_a_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("scene.json");

    let mut config = SceneConfig::preset(Variant::Animated);
    config.speed = 420.0;
    config.tie_break = TieBreak::FirstPressed;
    config.save(&path).unwrap();

    let loaded = SceneConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn load_reports_missing_and_malformed_files() {
    let tmp = TempDir::new().unwrap();

    let missing = tmp.path().join("missing.json");
    assert!(matches!(
        SceneConfig::load(&missing),
        Err(ConfigError::Io { .. })
    ));

    let broken = tmp.path().join("broken.json");
    std::fs::write(&broken, "{ \"speed\": ").unwrap();
    assert!(matches!(
        SceneConfig::load(&broken),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn load_rejects_invalid_values() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("slow.json");
    std::fs::write(&path, r#"{ "variant": "walled", "speed": -5.0 }"#).unwrap();

    let err = SceneConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "speed", .. }));
    assert!(err.to_string().contains("speed"));
}
