//! Demo-mode controller
//!
//! Picks one command per frame from the current state: dodge into a clear
//! neighbouring lane when possible, otherwise pick the pose whose hitbox keeps
//! clear of the obstacle the longest.

use rand::Rng;

use super::geometry::{Rect, WorldGeometry};
use super::state::{Obstacle, PlayerState, Pose};
use super::tick::{Command, Simulation};

/// How far ahead (in seconds of travel) obstacles are considered a threat
const LOOKAHEAD_SECS: f32 = 0.6;
/// Step used when predicting hitbox contact
const PREDICT_DT: f32 = 1.0 / 60.0;

/// Decide the next command, or `None` to keep going straight
pub fn decide<R: Rng>(sim: &Simulation<R>, geometry: &WorldGeometry) -> Option<Command> {
    if sim.is_crashed() {
        return None;
    }

    let player = sim.player();
    let lane_count = sim.config().lane_count;
    let speed = sim.run().speed;
    let player_rect = sim.player_rect(geometry);
    let lookahead = speed * LOOKAHEAD_SECS;

    // Closest obstacle in our lane that hasn't passed us yet
    let (threat, _) = sim
        .obstacles()
        .iter()
        .filter(|o| o.lane == player.lane)
        .map(|o| (o, sim.obstacle_rect(o, geometry)))
        .filter(|(_, rect)| in_window(rect, &player_rect, lookahead))
        .max_by(|(_, a), (_, b)| a.max.y.total_cmp(&b.max.y))?;

    // Prefer sidestepping into a clear lane
    let lane_clear = |lane: usize| {
        !sim.obstacles()
            .iter()
            .filter(|o| o.lane == lane)
            .any(|o| in_window(&sim.obstacle_rect(o, geometry), &player_rect, lookahead * 1.5))
    };
    if player.lane > 0 && lane_clear(player.lane - 1) {
        return Some(Command::MoveLeft);
    }
    if player.lane + 1 < lane_count && lane_clear(player.lane + 1) {
        return Some(Command::MoveRight);
    }

    if player.pose != Pose::Normal {
        return None;
    }

    // Boxed in: take the pose that delays contact, if any does
    let contact = |pose: Pose| first_contact(player, pose, threat, speed, geometry, lane_count);
    let straight = contact(Pose::Normal)?;
    [(Command::Slide, Pose::Sliding), (Command::Jump, Pose::Jumping)]
        .into_iter()
        .map(|(command, pose)| (command, contact(pose).unwrap_or(f32::INFINITY)))
        .filter(|&(_, t)| t > straight)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(command, _)| command)
}

/// Obstacle is within `lookahead` pixels above the player and not yet behind it
fn in_window(obstacle: &Rect, player: &Rect, lookahead: f32) -> bool {
    obstacle.min.y < player.max.y && obstacle.max.y > player.min.y - lookahead
}

/// Seconds until the hitboxes overlap if `pose` starts now, `None` if they
/// stay clear for the whole lookahead window
fn first_contact(
    player: &PlayerState,
    pose: Pose,
    obstacle: &Obstacle,
    speed: f32,
    geometry: &WorldGeometry,
    lane_count: usize,
) -> Option<f32> {
    let mut player = player.clone();
    player.begin_pose(pose);
    let mut obstacle = obstacle.clone();

    let steps = (LOOKAHEAD_SECS / PREDICT_DT).ceil() as u32;
    for step in 0..=steps {
        let player_rect = geometry.player_rect(&player, lane_count);
        if player_rect.overlaps(&geometry.obstacle_rect(&obstacle, lane_count)) {
            return Some(step as f32 * PREDICT_DT);
        }
        player.update_pose(PREDICT_DT);
        obstacle.y += speed * PREDICT_DT;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimulationConfig;
    use crate::sim::state::ObstacleKind;

    fn geometry() -> WorldGeometry {
        WorldGeometry::new(400.0, 700.0, 40.0, 320.0)
    }

    fn obstacle(lane: usize, kind: ObstacleKind, y: f32) -> Obstacle {
        Obstacle {
            id: 0,
            lane,
            kind,
            y,
            width: 46.4,
            height: 22.0,
        }
    }

    fn sim_with(lanes: usize, obstacles: &[Obstacle]) -> Simulation {
        let mut sim = Simulation::new(SimulationConfig::new(lanes, 220.0, 1.35), 1);
        for o in obstacles {
            sim.push_obstacle(o.clone());
        }
        sim
    }

    #[test]
    fn test_nothing_ahead() {
        let sim = sim_with(4, &[obstacle(2, ObstacleKind::Low, -300.0)]);
        assert_eq!(decide(&sim, &geometry()), None);
    }

    #[test]
    fn test_sidesteps_into_clear_lane() {
        // Player in lane 2, hitbox top at y=600
        let sim = sim_with(4, &[obstacle(2, ObstacleKind::Low, 500.0)]);
        assert_eq!(decide(&sim, &geometry()), Some(Command::MoveLeft));

        let sim = sim_with(
            4,
            &[
                obstacle(2, ObstacleKind::Low, 500.0),
                obstacle(1, ObstacleKind::High, 520.0),
            ],
        );
        assert_eq!(decide(&sim, &geometry()), Some(Command::MoveRight));
    }

    #[test]
    fn test_slides_when_boxed_in() {
        // Single lane: no sidestep possible
        let sim = sim_with(1, &[obstacle(0, ObstacleKind::Low, 300.0)]);
        // Still far: wait
        assert_eq!(decide(&sim, &geometry()), None);

        // The shorter slide hitbox meets a falling obstacle later; a jump
        // lifts the hitbox into it sooner
        for kind in [ObstacleKind::Low, ObstacleKind::High] {
            let sim = sim_with(1, &[obstacle(0, kind, 570.0)]);
            assert_eq!(decide(&sim, &geometry()), Some(Command::Slide));
        }
    }

    #[test]
    fn test_first_contact_by_pose() {
        let geo = geometry();
        let player = PlayerState::new(0);
        let falling = obstacle(0, ObstacleKind::Low, 570.0);

        let normal = first_contact(&player, Pose::Normal, &falling, 220.0, &geo, 1);
        let sliding = first_contact(&player, Pose::Sliding, &falling, 220.0, &geo, 1);
        let jumping = first_contact(&player, Pose::Jumping, &falling, 220.0, &geo, 1);
        let (normal, sliding, jumping) = (normal.unwrap(), sliding.unwrap(), jumping.unwrap());
        assert!(sliding > normal);
        assert!(jumping < normal);

        let far = obstacle(0, ObstacleKind::Low, -200.0);
        assert_eq!(first_contact(&player, Pose::Normal, &far, 220.0, &geo, 1), None);
    }

    #[test]
    fn test_no_command_when_already_overlapping() {
        let sim = sim_with(1, &[obstacle(0, ObstacleKind::High, 640.0)]);
        assert_eq!(decide(&sim, &geometry()), None);
    }

    #[test]
    fn test_ignores_passed_obstacles() {
        let sim = sim_with(4, &[obstacle(2, ObstacleKind::Low, 680.0)]);
        assert_eq!(decide(&sim, &geometry()), None);
    }
}
