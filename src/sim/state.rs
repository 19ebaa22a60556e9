//! Run state and core simulation types

use serde::{Deserialize, Serialize};

use crate::consts::{JUMP_DURATION, SLIDE_DURATION};

/// Player's vertical-avoidance state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Normal,
    /// Clears Low obstacles
    Jumping,
    /// Clears High obstacles
    Sliding,
}

impl Pose {
    /// Fixed duration of the pose, `None` for Normal
    pub fn duration(&self) -> Option<f32> {
        match self {
            Pose::Normal => None,
            Pose::Jumping => Some(JUMP_DURATION),
            Pose::Sliding => Some(SLIDE_DURATION),
        }
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ground-level, jump over it
    Low,
    /// Overhead, slide under it
    High,
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: usize,
    pub kind: ObstacleKind,
    /// Top edge in field pixels (negative = above the visible field)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// The player-controlled runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub lane: usize,
    pub pose: Pose,
    /// Seconds spent in the current pose (0 while Normal)
    pub pose_elapsed: f32,
}

impl PlayerState {
    pub fn new(lane: usize) -> Self {
        Self {
            lane,
            pose: Pose::Normal,
            pose_elapsed: 0.0,
        }
    }

    /// Progress through the current pose in `[0, 1]`, 0 while Normal
    pub fn pose_progress(&self) -> f32 {
        match self.pose.duration() {
            Some(duration) => (self.pose_elapsed / duration).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    /// Enter a pose from Normal. Returns false if a pose is already active.
    pub(crate) fn begin_pose(&mut self, pose: Pose) -> bool {
        if self.pose != Pose::Normal || pose == Pose::Normal {
            return false;
        }
        self.pose = pose;
        self.pose_elapsed = 0.0;
        true
    }

    /// Accrue pose time. Returns true when the pose expired this step.
    pub(crate) fn update_pose(&mut self, dt: f32) -> bool {
        let Some(duration) = self.pose.duration() else {
            return false;
        };
        self.pose_elapsed += dt;
        if self.pose_elapsed >= duration {
            self.pose = Pose::Normal;
            self.pose_elapsed = 0.0;
            return true;
        }
        false
    }
}

/// Run counters and difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Seconds simulated
    pub elapsed: f32,
    /// Pixels travelled
    pub distance: f32,
    pub score: f32,
    /// World speed (pixels/sec)
    pub speed: f32,
    /// Seconds between spawns (before jitter)
    pub spawn_interval: f32,
    /// Seconds until the next spawn (may go negative inside a step)
    pub spawn_cooldown: f32,
    pub crashed: bool,
}

impl RunState {
    pub fn new(initial_speed: f32, initial_spawn_interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            distance: 0.0,
            score: 0.0,
            speed: initial_speed,
            spawn_interval: initial_spawn_interval,
            spawn_cooldown: initial_spawn_interval,
            crashed: false,
        }
    }
}

/// Read-only view of the simulation for rendering and the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub lane: usize,
    pub pose: Pose,
    pub pose_elapsed: f32,
    pub obstacles: Vec<Obstacle>,
    pub speed: f32,
    pub elapsed: f32,
    pub distance: f32,
    pub score: f32,
    pub crashed: bool,
}

/// End-of-run summary, captured once at the moment of the crash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Floored score
    pub score: u64,
    /// Seconds survived
    pub time_survived: f32,
    /// Pixels travelled
    pub distance: f32,
    /// Difficulty preset identifier
    pub difficulty: String,
}
