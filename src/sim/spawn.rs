//! Procedural obstacle generation
//!
//! Random lane, random kind with a nudge toward High when the lane repeats,
//! and a staggered start position above the field.

use rand::Rng;

use super::geometry::WorldGeometry;
use super::state::{Obstacle, ObstacleKind};
use crate::consts::*;

/// Pick an obstacle kind from a roll in `[0, 1 + bias)`
#[inline]
pub fn kind_for_roll(roll: f32) -> ObstacleKind {
    if roll < LOW_KIND_THRESHOLD {
        ObstacleKind::Low
    } else {
        ObstacleKind::High
    }
}

/// Fixed height per obstacle kind
#[inline]
pub fn obstacle_height(kind: ObstacleKind) -> f32 {
    match kind {
        ObstacleKind::Low => LOW_OBSTACLE_HEIGHT,
        ObstacleKind::High => HIGH_OBSTACLE_HEIGHT,
    }
}

/// Roll a new obstacle.
///
/// `last_lane` is the lane of the previous spawn; repeating it biases the kind
/// roll toward High. Same-lane spawns are still allowed.
pub fn roll_obstacle<R: Rng>(
    rng: &mut R,
    id: u32,
    lane_count: usize,
    last_lane: Option<usize>,
    geometry: &WorldGeometry,
) -> Obstacle {
    let lane = rng.random_range(0..lane_count.max(1));

    let bias = if last_lane == Some(lane) {
        SAME_LANE_BIAS
    } else {
        0.0
    };
    let roll = rng.random::<f32>() + bias;
    let kind = kind_for_roll(roll);

    let y = -SPAWN_Y_OFFSET - rng.random::<f32>() * SPAWN_Y_STAGGER;

    Obstacle {
        id,
        lane,
        kind,
        y,
        width: geometry.lane_width(lane_count) * OBSTACLE_WIDTH_RATIO,
        height: obstacle_height(kind),
    }
}

/// Next cooldown increment: the interval with ±SPAWN_JITTER applied
pub fn jittered_interval<R: Rng>(rng: &mut R, spawn_interval: f32) -> f32 {
    let jitter = rng.random_range(-SPAWN_JITTER..SPAWN_JITTER);
    spawn_interval * (1.0 + jitter)
}
