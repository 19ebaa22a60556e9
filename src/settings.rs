//! Difficulty presets and simulation configuration
//!
//! Presets are plain data. Hosts may ship their own table as JSON; the
//! built-in table is used when none is supplied.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_LANE_COUNT;

/// A named difficulty preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    /// Stable identifier (stored in run stats and high scores)
    pub id: String,
    /// Display name
    pub name: String,
    /// Starting world speed (pixels/sec)
    pub initial_speed: f32,
    /// Starting time between spawns (seconds)
    pub initial_spawn_interval: f32,
}

impl DifficultyPreset {
    pub fn new(id: &str, name: &str, initial_speed: f32, initial_spawn_interval: f32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            initial_speed,
            initial_spawn_interval,
        }
    }

    pub fn easy() -> Self {
        Self::new("easy", "Easy", 180.0, 1.6)
    }

    pub fn normal() -> Self {
        Self::new("normal", "Normal", 220.0, 1.35)
    }

    pub fn hard() -> Self {
        Self::new("hard", "Hard", 280.0, 1.05)
    }

    /// Built-in preset table, easiest first
    pub fn builtin() -> Vec<Self> {
        vec![Self::easy(), Self::normal(), Self::hard()]
    }

    /// Look up a built-in preset by id (case-insensitive)
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "easy" => Some(Self::easy()),
            "normal" | "medium" | "med" => Some(Self::normal()),
            "hard" => Some(Self::hard()),
            _ => None,
        }
    }
}

impl Default for DifficultyPreset {
    fn default() -> Self {
        Self::normal()
    }
}

/// Find a preset by id in a host-supplied table
pub fn find_preset<'a>(presets: &'a [DifficultyPreset], id: &str) -> Option<&'a DifficultyPreset> {
    presets.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// Parse a preset table from JSON
pub fn presets_from_json(json: &str) -> serde_json::Result<Vec<DifficultyPreset>> {
    serde_json::from_str(json)
}

/// Serialize a preset table to JSON
pub fn presets_to_json(presets: &[DifficultyPreset]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(presets)
}

/// Immutable parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of lanes (at least 1)
    pub lane_count: usize,
    /// Starting world speed (pixels/sec)
    pub initial_speed: f32,
    /// Starting time between spawns (seconds)
    pub initial_spawn_interval: f32,
    /// Identifier of the preset this config came from
    pub difficulty: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::from_preset(DEFAULT_LANE_COUNT, &DifficultyPreset::normal())
    }
}

impl SimulationConfig {
    pub fn new(lane_count: usize, initial_speed: f32, initial_spawn_interval: f32) -> Self {
        Self {
            lane_count,
            initial_speed,
            initial_spawn_interval,
            difficulty: "custom".to_string(),
        }
    }

    /// Build a config from a difficulty preset
    pub fn from_preset(lane_count: usize, preset: &DifficultyPreset) -> Self {
        Self {
            lane_count,
            initial_speed: preset.initial_speed,
            initial_spawn_interval: preset.initial_spawn_interval,
            difficulty: preset.id.clone(),
        }
    }

    /// Replace out-of-range values with defaults.
    ///
    /// The engine never rejects a config; unusable values fall back to the
    /// normal preset and are logged.
    pub fn sanitized(mut self) -> Self {
        let fallback = DifficultyPreset::normal();

        if self.lane_count == 0 {
            log::warn!("lane_count must be at least 1, using {}", DEFAULT_LANE_COUNT);
            self.lane_count = DEFAULT_LANE_COUNT;
        }
        if !self.initial_speed.is_finite() || self.initial_speed <= 0.0 {
            log::warn!(
                "initial_speed {} is invalid, using {}",
                self.initial_speed,
                fallback.initial_speed
            );
            self.initial_speed = fallback.initial_speed;
        }
        if !self.initial_spawn_interval.is_finite() || self.initial_spawn_interval <= 0.0 {
            log::warn!(
                "initial_spawn_interval {} is invalid, using {}",
                self.initial_spawn_interval,
                fallback.initial_spawn_interval
            );
            self.initial_spawn_interval = fallback.initial_spawn_interval;
        }

        self
    }
}
