// SPDX-License-Identifier: MPL-2.0
//! This module handles the toast manager's configuration, including loading and saving
//! preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use care_toast::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.max_active = Some(5);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.max_active, Some(5));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

pub use defaults::{
    DEFAULT_ENTRY_ANIMATION_MS, DEFAULT_EXIT_ANIMATION_MS, DEFAULT_HISTORY_CAPACITY,
    DEFAULT_MAX_ACTIVE, MAX_ANIMATION_MS, MAX_HISTORY_CAPACITY,
    MIN_HISTORY_CAPACITY, MIN_MAX_ACTIVE,
};

use crate::domain::diagnostics::HistoryCapacity;
use crate::domain::notifications::{AnimationDuration, MaxActive};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "CareToast";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub max_active: Option<usize>,
    #[serde(default)]
    pub entry_animation_ms: Option<u64>,
    #[serde(default)]
    pub exit_animation_ms: Option<u64>,
    #[serde(default)]
    pub history_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_active: Some(DEFAULT_MAX_ACTIVE),
            entry_animation_ms: Some(DEFAULT_ENTRY_ANIMATION_MS),
            exit_animation_ms: Some(DEFAULT_EXIT_ANIMATION_MS),
            history_capacity: Some(DEFAULT_HISTORY_CAPACITY),
        }
    }
}

impl Config {
    /// Active toast capacity, at least one.
    #[must_use]
    pub fn max_active(&self) -> MaxActive {
        self.max_active.map(MaxActive::new).unwrap_or_default()
    }

    /// Slide/fade-in duration.
    #[must_use]
    pub fn entry_animation(&self) -> AnimationDuration {
        self.entry_animation_ms
            .map_or_else(AnimationDuration::default_entry, AnimationDuration::from_millis)
    }

    /// Slide/fade-out duration.
    #[must_use]
    pub fn exit_animation(&self) -> AnimationDuration {
        self.exit_animation_ms
            .map_or_else(AnimationDuration::default_exit, AnimationDuration::from_millis)
    }

    /// Size of the lifecycle transition history.
    #[must_use]
    pub fn history_capacity(&self) -> HistoryCapacity {
        self.history_capacity
            .map(HistoryCapacity::new)
            .unwrap_or_default()
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
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
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
