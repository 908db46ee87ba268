use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::contact::SortOrder;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Poll cadences the app supports, in seconds, ascending.
pub const REFRESH_INTERVALS: [u64; 4] = [5, 10, 30, 60];

/// Snap an arbitrary interval to the nearest supported cadence. Ties round
/// down, so a value halfway between two choices polls more often.
pub fn nearest_refresh_interval(secs: u64) -> u64 {
    REFRESH_INTERVALS
        .iter()
        .copied()
        .min_by_key(|choice| choice.abs_diff(secs))
        .unwrap_or(REFRESH_INTERVALS[0])
}

/// The supported cadence after `secs`, wrapping from the longest back to the
/// shortest. Drives the interval-cycling key in the UI.
pub fn next_refresh_interval(secs: u64) -> u64 {
    let current = nearest_refresh_interval(secs);
    let index = REFRESH_INTERVALS
        .iter()
        .position(|&choice| choice == current)
        .unwrap_or(0);
    REFRESH_INTERVALS[(index + 1) % REFRESH_INTERVALS.len()]
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub sync: SyncConfig,
    pub ui: UiConfig,
}

/// Contact server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the contact API, without the /contacts path
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Background refresh settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Seconds between refreshes; snapped to 5, 10, 30 or 60
    pub refresh_interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: REFRESH_INTERVALS[0],
        }
    }
}

impl SyncConfig {
    /// The poll cadence, snapped to the supported set.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(nearest_refresh_interval(self.refresh_interval_secs))
    }
}

/// UI customization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Terminal event poll interval in milliseconds
    pub tick_rate_ms: u64,
    /// Start with the list sorted A to Z
    pub sort_ascending: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            sort_ascending: true,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from_ascending(self.sort_ascending)
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("rolodex");

        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path, or create it if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`; a missing file is written out with
    /// defaults so the user has something to edit.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path).context("Failed to read config file")?;

            let config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;

            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.base_url, "http://localhost:3000");
        assert_eq!(config.server.request_timeout_secs, 10);
        assert_eq!(config.sync.refresh_interval_secs, 5);
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(config.ui.sort_ascending);
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.server.base_url, deserialized.server.base_url);
        assert_eq!(
            config.sync.refresh_interval_secs,
            deserialized.sync.refresh_interval_secs
        );
        assert_eq!(config.ui.tick_rate_ms, deserialized.ui.tick_rate_ms);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial_toml = r#"
[server]
base_url = "http://192.168.1.20:4000"
"#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        // Custom value
        assert_eq!(config.server.base_url, "http://192.168.1.20:4000");
        // Default values
        assert_eq!(config.server.request_timeout_secs, 10);
        assert_eq!(config.sync.refresh_interval_secs, 5);
        assert!(config.ui.sort_ascending);
    }

    #[test]
    fn test_full_config_parsing() {
        let full_toml = r#"
[server]
base_url = "http://contacts.local:3000"
request_timeout_secs = 3

[sync]
refresh_interval_secs = 30

[ui]
tick_rate_ms = 250
sort_ascending = false
"#;

        let config: Config = toml::from_str(full_toml).unwrap();

        assert_eq!(config.server.base_url, "http://contacts.local:3000");
        assert_eq!(config.server.request_timeout_secs, 3);
        assert_eq!(config.sync.refresh_interval_secs, 30);
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert!(!config.ui.sort_ascending);
        assert_eq!(config.ui.sort_order(), SortOrder::Descending);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid [[ toml";
        let result: Result<Config, _> = toml::from_str(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_with_unknown_fields_is_ignored() {
        let toml_with_extra = r#"
[server]
base_url = "http://localhost:3000"
unknown_field = "should be ignored"

[unknown_section]
foo = "bar"
"#;

        // Unknown fields are ignored; we never set deny_unknown_fields.
        let result: Result<Config, _> = toml::from_str(toml_with_extra);
        assert!(result.is_ok());
    }

    #[test]
    fn test_nearest_interval_snaps_to_supported_set() {
        assert_eq!(nearest_refresh_interval(5), 5);
        assert_eq!(nearest_refresh_interval(60), 60);
        assert_eq!(nearest_refresh_interval(0), 5);
        assert_eq!(nearest_refresh_interval(7), 5);
        assert_eq!(nearest_refresh_interval(8), 10);
        assert_eq!(nearest_refresh_interval(600), 60);
        // Ties round down: 20 is as close to 10 as to 30.
        assert_eq!(nearest_refresh_interval(20), 10);
        assert_eq!(nearest_refresh_interval(45), 30);
    }

    #[test]
    fn test_next_interval_cycles_through_supported_set() {
        assert_eq!(next_refresh_interval(5), 10);
        assert_eq!(next_refresh_interval(10), 30);
        assert_eq!(next_refresh_interval(30), 60);
        assert_eq!(next_refresh_interval(60), 5);
        // Unsupported values snap before stepping.
        assert_eq!(next_refresh_interval(27), 60);
    }

    #[test]
    fn test_refresh_interval_accessor_clamps() {
        let sync = SyncConfig {
            refresh_interval_secs: 42,
        };
        assert_eq!(sync.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.base_url, "http://localhost:3000");
        assert!(path.exists());

        // A second load reads the file it just wrote.
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.sync.refresh_interval_secs, 5);
    }

    #[test]
    fn test_load_from_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sync]\nrefresh_interval_secs = 60\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.sync.refresh_interval_secs, 60);
    }
}
