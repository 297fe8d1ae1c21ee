//! TOML-based user preferences.
//!
//! Stores the starting values a host hands to the engines:
//! - Mala target (beads per round) and the selected mantra
//! - Default meditation length
//! - Ambient sound, volume and mute for sittings
//! - Tick cadence for the host's timer loop
//!
//! The default location is `~/.config/sadhana/config.toml`. Loading never
//! writes; only an explicit `save_to` touches disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::counter::{RoundCounter, DEFAULT_TARGET};
use crate::error::ConfigError;
use crate::library::DEFAULT_MANTRA;
use crate::timer::{minutes_to_secs, CountdownTimer, DEFAULT_DURATION_MIN, MAX_DURATION_MIN};

/// Mala counter preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalaConfig {
    #[serde(default = "default_target")]
    pub target: u32,
    /// Name of the mantra being recited.
    #[serde(default = "default_mantra")]
    pub mantra: String,
}

/// Background sound played during a sitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    #[default]
    Silence,
    Bell,
    Ocean,
    Wind,
}

/// Loudest volume setting.
pub const MAX_VOLUME: u32 = 100;

/// Meditation timer preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeditationConfig {
    #[serde(default = "default_duration_min")]
    pub duration_min: u64,
    /// Host tick cadence in milliseconds. One tick always counts as one
    /// second of sitting; shortening this only speeds up demos and tests.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub sound: Sound,
    /// 0..=100
    #[serde(default = "default_volume")]
    pub volume: u32,
    #[serde(default)]
    pub muted: bool,
}

impl MeditationConfig {
    /// Volume the host should play at: 0 when muted or silent, otherwise
    /// the configured volume capped at [`MAX_VOLUME`].
    pub fn effective_volume(&self) -> u32 {
        if self.muted || self.sound == Sound::Silence {
            0
        } else {
            self.volume.min(MAX_VOLUME)
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mala: MalaConfig,
    #[serde(default)]
    pub meditation: MeditationConfig,
}

fn default_target() -> u32 {
    DEFAULT_TARGET
}
fn default_duration_min() -> u64 {
    DEFAULT_DURATION_MIN
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_mantra() -> String {
    DEFAULT_MANTRA.to_string()
}
fn default_volume() -> u32 {
    50
}

impl Default for MalaConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            mantra: default_mantra(),
        }
    }
}

impl Default for MeditationConfig {
    fn default() -> Self {
        Self {
            duration_min: default_duration_min(),
            tick_interval_ms: default_tick_interval_ms(),
            sound: Sound::default(),
            volume: default_volume(),
            muted: false,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(invalid("config key is empty".into()));
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current
                    .get_mut(part)
                    .ok_or_else(|| invalid("unknown config key".into()))?;
            }
        }

        let obj = current
            .as_object_mut()
            .ok_or_else(|| invalid("unknown config key".into()))?;
        let existing = obj
            .get(leaf)
            .ok_or_else(|| invalid("unknown config key".into()))?;

        let new_value = match existing {
            serde_json::Value::Number(_) => value
                .parse::<u64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
            serde_json::Value::Bool(_) => value
                .parse::<bool>()
                .map(serde_json::Value::Bool)
                .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            serde_json::Value::Object(_) => {
                return Err(invalid("key names a section, not a value".into()));
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// `~/.config/sadhana/config.toml`, falling back to the working directory
    /// when no home directory is known.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("sadhana")
            .join("config.toml")
    }

    /// Load from `path`, or return defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    }

    /// Persist to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value has the wrong
    /// type for that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// A fresh counter at the configured target.
    pub fn counter(&self) -> RoundCounter {
        RoundCounter::with_target(self.mala.target)
    }

    /// A fresh idle timer at the configured duration, clamped to the slider
    /// range.
    pub fn timer(&self) -> CountdownTimer {
        let minutes = self.meditation.duration_min.clamp(1, MAX_DURATION_MIN);
        CountdownTimer::with_duration(minutes_to_secs(minutes))
    }

    /// Tick cadence, never below one millisecond.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.meditation.tick_interval_ms.max(1))
    }
}
