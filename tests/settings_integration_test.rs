use weather_dashboard::settings::{Settings, SettingsStore};
use weather_dashboard::units::TemperatureUnit;

/// Test that a missing file yields defaults without creating anything
#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("weather-settings.json");

    let store = SettingsStore::open(&path);
    assert_eq!(store.settings(), &Settings::default());
    assert!(!path.exists());
}

/// Test that every change is written and read back on the next open
#[test]
fn test_changes_persist_across_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("weather-settings.json");

    let mut store = SettingsStore::open(&path);
    store
        .set_unit(TemperatureUnit::Fahrenheit)
        .expect("Failed to set unit");
    assert!(path.exists());

    assert!(store.toggle_favorite(9).expect("Failed to toggle"));
    assert!(store.toggle_favorite(2).expect("Failed to toggle"));
    assert!(!store.toggle_favorite(9).expect("Failed to toggle"));

    let reopened = SettingsStore::open(&path);
    assert_eq!(reopened.settings().unit, TemperatureUnit::Fahrenheit);
    assert_eq!(reopened.settings().favorites, vec![2]);
}

/// Test the on-disk JSON shape
#[test]
fn test_file_format() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("weather-settings.json");

    let mut store = SettingsStore::open(&path);
    store
        .update(|s| {
            s.unit = TemperatureUnit::Kelvin;
            s.favorites = vec![1, 14];
        })
        .expect("Failed to update");

    let raw = std::fs::read_to_string(&path).expect("Failed to read settings");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("Invalid JSON");
    assert_eq!(value["unit"], "K");
    assert_eq!(value["favorites"], serde_json::json!([1, 14]));
}

/// Test that corrupt data is treated as absent, never fatal
#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("weather-settings.json");
    std::fs::write(&path, "{\"unit\": \"F\", \"favorites\": [1,").expect("Failed to write");

    let mut store = SettingsStore::open(&path);
    assert_eq!(store.settings(), &Settings::default());

    // The next change overwrites the corrupt file
    store.toggle_favorite(3).expect("Failed to toggle");
    let reopened = SettingsStore::open(&path);
    assert_eq!(reopened.settings().favorites, vec![3]);
}

/// Test that a directory in place of the file is tolerated on open
#[test]
fn test_unreadable_path_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let store = SettingsStore::open(dir.path());
    assert_eq!(store.settings(), &Settings::default());
    assert_eq!(store.path(), dir.path());
}

/// Test that a failed write leaves the in-memory settings untouched
#[test]
fn test_failed_write_keeps_previous_settings() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").expect("Failed to write");
    let path = blocker.join("weather-settings.json");

    let mut store = SettingsStore::open(&path);
    assert!(store.toggle_favorite(5).is_err());
    assert!(store.set_unit(TemperatureUnit::Kelvin).is_err());

    assert_eq!(store.settings(), &Settings::default());
    assert!(!store.settings().is_favorite(5));
}
