//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform concerns:
//! - Delta-time driven, clamped to a maximum step
//! - Injectable seeded RNG only
//! - Pixel layout comes in through `WorldGeometry` every frame

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::find_collision;
pub use geometry::{PlayerMetrics, Rect, WorldGeometry};
pub use spawn::roll_obstacle;
pub use state::{Obstacle, ObstacleKind, PlayerState, Pose, RunState, RunStats, Snapshot};
pub use tick::{Command, Simulation};
