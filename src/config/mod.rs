// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving operator preferences to a `settings.toml` file.

mod defaults;

pub use defaults::{DEFAULT_ASSETS_DIR, DEFAULT_RETRY_DELAY_MS, DEFAULT_SONAR_ENDPOINT};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "SentryConsole";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralSection,
    #[serde(default)]
    pub recovery: RecoverySection,
    #[serde(default)]
    pub sonar: SonarSection,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GeneralSection {
    /// Directory containing feed clips and processed detection output.
    pub assets_dir: Option<PathBuf>,
    /// Optional roster file overriding the built-in six-feed layout.
    pub roster_path: Option<PathBuf>,
}

/// Feed reconnection policy. The defaults reproduce the fixed 3-second,
/// unbounded behavior of the original deployment; kiosk installs can cap it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RecoverySection {
    pub delay_ms: Option<u64>,
    pub max_retries: Option<u32>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SonarSection {
    pub endpoint: Option<String>,
}

impl Config {
    pub fn assets_dir(&self) -> PathBuf {
        self.general
            .assets_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR))
    }

    pub fn retry_delay_ms(&self) -> u64 {
        self.recovery.delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)
    }

    pub fn sonar_endpoint(&self) -> String {
        self.sonar
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_SONAR_ENDPOINT.to_string())
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load(config_dir_override: Option<&Path>) -> Result<Config> {
    let path = match config_dir_override {
        Some(dir) => Some(dir.join(CONFIG_FILE)),
        None => get_default_config_path(),
    };
    if let Some(path) = path {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_recovery_policy() {
        let config = Config {
            recovery: RecoverySection {
                delay_ms: Some(1500),
                max_retries: Some(10),
            },
            ..Config::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.recovery.delay_ms, Some(1500));
        assert_eq!(loaded.recovery.max_retries, Some(10));
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.general.assets_dir.is_none());
        assert_eq!(loaded.retry_delay_ms(), DEFAULT_RETRY_DELAY_MS);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn defaults_reproduce_source_behavior() {
        let config = Config::default();
        assert_eq!(config.retry_delay_ms(), 3000);
        assert!(config.recovery.max_retries.is_none());
        assert_eq!(config.sonar_endpoint(), DEFAULT_SONAR_ENDPOINT);
    }

    #[test]
    fn load_honors_config_dir_override() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config = Config {
            sonar: SonarSection {
                endpoint: Some("http://classifier.internal/api/predict".into()),
            },
            ..Config::default()
        };
        save_to_path(&config, &temp_dir.path().join("settings.toml")).expect("save failed");

        let loaded = load(Some(temp_dir.path())).expect("load failed");
        assert_eq!(
            loaded.sonar_endpoint(),
            "http://classifier.internal/api/predict"
        );
    }
}
