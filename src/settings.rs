//! Game settings
//!
//! Loaded from an optional JSON file; every field falls back to its default
//! so a partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rules;

/// Errors from reading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Pacing ===
    /// Minimum milliseconds between processed frames
    pub frame_interval_ms: u64,

    // === Levels ===
    /// Directory holding `level<N>.txt` files
    pub level_dir: PathBuf,
    /// Number of levels to play through
    pub level_count: u32,

    // === Rules ===
    pub starting_lives: u32,
    /// Paddle pixels per frame
    pub paddle_speed: i32,
    /// Ball vertical pixels per frame at launch
    pub launch_speed: i32,
    /// Paddle offset divisor for rebound steepness
    pub deflection_divisor: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_interval_ms: FRAME_RATE_MS,

            level_dir: PathBuf::from("levels"),
            level_count: NUM_LEVELS,

            starting_lives: NUM_LIVES,
            paddle_speed: PLAYER_SPEED,
            launch_speed: BALL_SPEED_Y,
            deflection_divisor: BALL_SPEED_MODIFIER,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, using defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::warn!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<(), SettingsError> {
            Err(SettingsError::Invalid { field, reason })
        };
        if self.level_count == 0 {
            return invalid("level_count", "must be at least 1");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.paddle_speed <= 0 {
            return invalid("paddle_speed", "must be positive");
        }
        if self.launch_speed <= 0 {
            return invalid("launch_speed", "must be positive");
        }
        if self.deflection_divisor <= 0 {
            return invalid("deflection_divisor", "must be positive");
        }
        Ok(())
    }

    /// Simulation rules derived from these settings
    pub fn rules(&self) -> Rules {
        Rules {
            starting_lives: self.starting_lives,
            level_count: self.level_count,
            paddle_speed: self.paddle_speed,
            launch_speed: self.launch_speed,
            deflection_divisor: self.deflection_divisor,
        }
    }

    /// Pretty JSON form, for writing an example settings file
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
