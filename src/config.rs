//! Spin and storage configuration parsed from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::consts::{
    DEFAULT_CONFETTI_MS, DEFAULT_MAX_TURNS, DEFAULT_MIN_TURNS, DEFAULT_POINTER_DEG, DEFAULT_SPIN_DURATION_MS,
    DEFAULT_STORAGE_DIR, DEFAULT_STORAGE_KEY,
};

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("turn range is empty: min {min} > max {max}")]
    TurnRange { min: u32, max: u32 },
}

// =============================================================================
// SPIN CONFIG
// =============================================================================

/// Tunables for one wheel's spin behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinConfig {
    /// Angle the pointer sits at, in the wheel's frame.
    pub pointer_deg: f64,
    pub spin_duration_ms: u64,
    /// Inclusive bounds for the extra whole turns added to each spin.
    pub min_turns: u32,
    pub max_turns: u32,
    pub confetti_ms: u64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            pointer_deg: DEFAULT_POINTER_DEG,
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
            min_turns: DEFAULT_MIN_TURNS,
            max_turns: DEFAULT_MAX_TURNS,
            confetti_ms: DEFAULT_CONFETTI_MS,
        }
    }
}

impl SpinConfig {
    /// Build spin config from environment variables.
    ///
    /// Optional:
    /// - `SPINCHOICE_POINTER_DEG`: default 270
    /// - `SPINCHOICE_SPIN_DURATION_MS`: default 4000
    /// - `SPINCHOICE_MIN_TURNS`: default 5
    /// - `SPINCHOICE_MAX_TURNS`: default 7
    /// - `SPINCHOICE_CONFETTI_MS`: default 3000
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable does not parse or the result
    /// fails [`SpinConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SpinConfig::from_env`] with a caller-supplied lookup.
    ///
    /// # Errors
    ///
    /// Same as [`SpinConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            pointer_deg: parse_or(&lookup, "SPINCHOICE_POINTER_DEG", DEFAULT_POINTER_DEG)?,
            spin_duration_ms: parse_or(&lookup, "SPINCHOICE_SPIN_DURATION_MS", DEFAULT_SPIN_DURATION_MS)?,
            min_turns: parse_or(&lookup, "SPINCHOICE_MIN_TURNS", DEFAULT_MIN_TURNS)?,
            max_turns: parse_or(&lookup, "SPINCHOICE_MAX_TURNS", DEFAULT_MAX_TURNS)?,
            confetti_ms: parse_or(&lookup, "SPINCHOICE_CONFETTI_MS", DEFAULT_CONFETTI_MS)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot drive a spin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a non-finite pointer angle and
    /// [`ConfigError::TurnRange`] when `min_turns > max_turns`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pointer_deg.is_finite() {
            return Err(ConfigError::Invalid { key: "SPINCHOICE_POINTER_DEG", value: self.pointer_deg.to_string() });
        }
        if self.min_turns > self.max_turns {
            return Err(ConfigError::TurnRange { min: self.min_turns, max: self.max_turns });
        }
        Ok(())
    }

    #[must_use]
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }
}

// =============================================================================
// STORE CONFIG
// =============================================================================

/// Where the category list is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub dir: PathBuf,
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from(DEFAULT_STORAGE_DIR), key: DEFAULT_STORAGE_KEY.to_string() }
    }
}

impl StoreConfig {
    /// Build storage config from environment variables.
    ///
    /// Optional:
    /// - `SPINCHOICE_STORAGE_DIR`: default `.spinchoice`
    /// - `SPINCHOICE_STORAGE_KEY`: default `spinChoice_categories`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a blank key or one containing a
    /// path separator.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with a caller-supplied lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StoreConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dir = lookup("SPINCHOICE_STORAGE_DIR").map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);
        let key = lookup("SPINCHOICE_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        if key.trim().is_empty() || key.contains(['/', '\\']) {
            return Err(ConfigError::Invalid { key: "SPINCHOICE_STORAGE_KEY", value: key });
        }
        Ok(Self { dir, key })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
