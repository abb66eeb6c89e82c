#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// SpinConfig
// =============================================================================

#[test]
fn spin_config_defaults_match_constants() {
    let cfg = SpinConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, SpinConfig::default());
    assert_eq!(cfg.pointer_deg, DEFAULT_POINTER_DEG);
    assert_eq!(cfg.spin_duration_ms, DEFAULT_SPIN_DURATION_MS);
    assert_eq!(cfg.min_turns, DEFAULT_MIN_TURNS);
    assert_eq!(cfg.max_turns, DEFAULT_MAX_TURNS);
    assert_eq!(cfg.confetti_ms, DEFAULT_CONFETTI_MS);
    assert_eq!(cfg.spin_duration(), Duration::from_secs(4));
}

#[test]
fn spin_config_parses_overrides() {
    let cfg = SpinConfig::from_lookup(lookup_from(&[
        ("SPINCHOICE_POINTER_DEG", "90"),
        ("SPINCHOICE_SPIN_DURATION_MS", " 1500 "),
        ("SPINCHOICE_MIN_TURNS", "2"),
        ("SPINCHOICE_MAX_TURNS", "3"),
        ("SPINCHOICE_CONFETTI_MS", "0"),
    ]))
    .unwrap();
    assert_eq!(cfg.pointer_deg, 90.0);
    assert_eq!(cfg.spin_duration_ms, 1500);
    assert_eq!(cfg.min_turns, 2);
    assert_eq!(cfg.max_turns, 3);
    assert_eq!(cfg.confetti_ms, 0);
}

#[test]
fn spin_config_rejects_unparseable_value() {
    let err = SpinConfig::from_lookup(lookup_from(&[("SPINCHOICE_MIN_TURNS", "five")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "SPINCHOICE_MIN_TURNS", value: "five".into() });
}

#[test]
fn spin_config_rejects_non_finite_pointer() {
    let err = SpinConfig::from_lookup(lookup_from(&[("SPINCHOICE_POINTER_DEG", "NaN")])).unwrap_err();
    assert!(err.to_string().contains("SPINCHOICE_POINTER_DEG"));
}

#[test]
fn validate_rejects_non_finite_pointer_built_in_code() {
    let config = SpinConfig { pointer_deg: f64::INFINITY, ..SpinConfig::default() };
    assert_eq!(config.validate(), Err(ConfigError::Invalid { key: "SPINCHOICE_POINTER_DEG", value: "inf".into() }));
    assert_eq!(SpinConfig::default().validate(), Ok(()));
}

#[test]
fn spin_config_rejects_inverted_turn_range() {
    let err = SpinConfig::from_lookup(lookup_from(&[("SPINCHOICE_MIN_TURNS", "8"), ("SPINCHOICE_MAX_TURNS", "6")]))
        .unwrap_err();
    assert_eq!(err, ConfigError::TurnRange { min: 8, max: 6 });
}

#[test]
fn spin_config_from_env_reads_process_env() {
    unsafe { std::env::set_var("SPINCHOICE_CONFETTI_MS", "1234") };
    let cfg = SpinConfig::from_env().unwrap();
    assert_eq!(cfg.confetti_ms, 1234);
    unsafe { std::env::remove_var("SPINCHOICE_CONFETTI_MS") };
}

// =============================================================================
// StoreConfig
// =============================================================================

#[test]
fn store_config_defaults() {
    let cfg = StoreConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, StoreConfig::default());
    assert_eq!(cfg.key, "spinChoice_categories");
    assert_eq!(cfg.dir, PathBuf::from(".spinchoice"));
}

#[test]
fn store_config_overrides() {
    let cfg = StoreConfig::from_lookup(lookup_from(&[
        ("SPINCHOICE_STORAGE_DIR", "/tmp/wheels"),
        ("SPINCHOICE_STORAGE_KEY", "my_wheels"),
    ]))
    .unwrap();
    assert_eq!(cfg.dir, PathBuf::from("/tmp/wheels"));
    assert_eq!(cfg.key, "my_wheels");
}

#[test]
fn store_config_rejects_path_like_key() {
    for bad in ["", "  ", "a/b", "..\\x"] {
        let err = StoreConfig::from_lookup(lookup_from(&[("SPINCHOICE_STORAGE_KEY", bad)])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SPINCHOICE_STORAGE_KEY", .. }), "{bad:?}");
    }
}
