//! Lane Runner - An endless lane-based runner
//!
//! Core modules:
//! - `sim`: Simulation engine (lanes, poses, obstacles, collisions, difficulty ramp)
//! - `settings`: Difficulty presets and simulation configuration
//! - `highscores`: End-of-run leaderboard
//!
//! Rendering, input capture and screen flow belong to the host. The host owns a
//! single [`sim::Simulation`], feeds it commands, calls `advance` once per frame
//! and reads back a [`sim::Snapshot`].

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{DifficultyPreset, SimulationConfig};
pub use sim::{Command, Simulation, Snapshot, WorldGeometry};

/// Game tuning constants
pub mod consts {
    /// Largest step `advance` will simulate (hitches and suspended tabs are clamped to this)
    pub const MAX_STEP: f32 = 0.05;

    /// Default number of lanes
    pub const DEFAULT_LANE_COUNT: usize = 4;

    /// Score earned per second survived
    pub const SCORE_PER_SECOND: f32 = 12.0;
    /// Pixels of travel per score point
    pub const DISTANCE_PER_POINT: f32 = 18.0;

    /// Speed growth per second (compounding, uncapped)
    pub const SPEED_GROWTH: f32 = 0.005;
    /// Spawn interval shrink per second
    pub const SPAWN_INTERVAL_SHRINK: f32 = 0.01;
    /// Spawn interval never drops below this (seconds)
    pub const MIN_SPAWN_INTERVAL: f32 = 0.25;
    /// Spawn jitter as a fraction of the current interval (±)
    pub const SPAWN_JITTER: f32 = 0.15;

    /// Pose durations (seconds)
    pub const JUMP_DURATION: f32 = 0.6;
    pub const SLIDE_DURATION: f32 = 0.75;

    /// Added to the kind roll when the previous spawn used the same lane
    pub const SAME_LANE_BIAS: f32 = 0.25;
    /// Kind roll below this spawns a Low obstacle, otherwise High
    pub const LOW_KIND_THRESHOLD: f32 = 0.6;

    /// Obstacle width as a fraction of lane width
    pub const OBSTACLE_WIDTH_RATIO: f32 = 0.58;
    /// Obstacle heights (pixels)
    pub const LOW_OBSTACLE_HEIGHT: f32 = 22.0;
    pub const HIGH_OBSTACLE_HEIGHT: f32 = 26.0;

    /// Spawn position: -SPAWN_Y_OFFSET - uniform[0, SPAWN_Y_STAGGER)
    pub const SPAWN_Y_OFFSET: f32 = 120.0;
    pub const SPAWN_Y_STAGGER: f32 = 220.0;

    /// Obstacles further than this past the field bottom are dropped
    pub const PRUNE_MARGIN: f32 = 120.0;
}

/// Round a continuous lane coordinate and clamp it into `[0, lane_count)`.
///
/// Returns `None` for non-finite input.
#[inline]
pub fn clamp_lane(lane: f32, lane_count: usize) -> Option<usize> {
    if !lane.is_finite() {
        return None;
    }
    let max = lane_count.saturating_sub(1) as f32;
    Some(lane.round().clamp(0.0, max) as usize)
}
