//! Tests for config discovery and environment overrides.

use std::fs;

use depview_config::{CONFIG_FILE, ConfigDiscovery};
use serial_test::serial;
use tempfile::TempDir;

/// Sets environment variables for one test and removes them on drop.
///
/// Every test in this file touches the process environment (through
/// figment's `Env` provider), so they all run under `#[serial]`.
struct EnvGuard {
    vars: Vec<&'static str>,
}

impl EnvGuard {
    fn set(pairs: &[(&'static str, &str)]) -> Self {
        for (key, value) in pairs {
            // SAFETY: tests in this binary are serialized, so no other thread
            // reads or writes the environment concurrently.
            unsafe { std::env::set_var(key, value) };
        }
        Self {
            vars: pairs.iter().map(|(key, _)| *key).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            // SAFETY: see `EnvGuard::set`.
            unsafe { std::env::remove_var(var) };
        }
    }
}

#[test]
#[serial]
fn loads_discovered_file() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join(CONFIG_FILE),
        include_str!("common.toml"),
    )
    .expect("write config");

    let config = ConfigDiscovery::new(dir.path())
        .env_prefix("DEPVIEW_DISCOVERY_UNSET_")
        .load()
        .expect("load");
    assert_eq!(config.relations.len(), 3);
    assert_eq!(config.settings.log_level.as_deref(), Some("info"));
    assert!(config.resolve().is_ok());
}

#[test]
#[serial]
fn environment_overrides_file_values() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join(CONFIG_FILE),
        "[settings]\nlog_level = \"info\"\nparallel = false\n",
    )
    .expect("write config");

    let _env = EnvGuard::set(&[
        ("DEPVIEW_DISCOVERY_TEST_SETTINGS__PARALLEL", "true"),
        ("DEPVIEW_DISCOVERY_TEST_SETTINGS__LOG_LEVEL", "debug"),
    ]);

    let config = ConfigDiscovery::new(dir.path())
        .env_prefix("DEPVIEW_DISCOVERY_TEST_")
        .load()
        .expect("load");
    assert!(config.settings.parallel);
    assert_eq!(config.settings.log_level.as_deref(), Some("debug"));
}

#[test]
#[serial]
fn explicit_path_outside_root() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[settings]\nparallel = true\n").expect("write config");

    let config = ConfigDiscovery::new("/nonexistent")
        .load_from(&path)
        .expect("load");
    assert!(config.settings.parallel);
}
