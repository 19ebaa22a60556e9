//! Player/obstacle collision detection
//!
//! Plain AABB overlap in field space. Pose only matters through the player
//! hitbox: sliding shortens it and jumping lifts it.

use super::geometry::WorldGeometry;
use super::state::{Obstacle, PlayerState};

/// Find the first obstacle whose hitbox overlaps the player's.
///
/// Stops at the first hit; the crash flag is binary so the rest don't matter.
pub fn find_collision<'a>(
    player: &PlayerState,
    obstacles: &'a [Obstacle],
    geometry: &WorldGeometry,
    lane_count: usize,
) -> Option<&'a Obstacle> {
    let player_rect = geometry.player_rect(player, lane_count);
    obstacles
        .iter()
        .find(|obstacle| player_rect.overlaps(&geometry.obstacle_rect(obstacle, lane_count)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::JUMP_DURATION;
    use crate::sim::state::{ObstacleKind, Pose};

    fn geometry() -> WorldGeometry {
        WorldGeometry::new(400.0, 700.0, 40.0, 320.0)
    }

    fn obstacle(id: u32, lane: usize, kind: ObstacleKind, y: f32) -> Obstacle {
        Obstacle {
            id,
            lane,
            kind,
            y,
            width: 46.4,
            height: 22.0,
        }
    }

    #[test]
    fn test_find_collision_same_lane() {
        let geo = geometry();
        let player = PlayerState::new(1);
        // Player hitbox spans y 600..664
        let obstacles = vec![
            obstacle(1, 0, ObstacleKind::Low, 620.0),
            obstacle(2, 1, ObstacleKind::Low, 100.0),
            obstacle(3, 1, ObstacleKind::High, 610.0),
            obstacle(4, 1, ObstacleKind::Low, 630.0),
        ];

        let hit = find_collision(&player, &obstacles, &geo, 4);
        assert_eq!(hit.map(|o| o.id), Some(3));
    }

    #[test]
    fn test_overlap_hits_in_every_pose() {
        let geo = geometry();
        let mut player = PlayerState::new(2);

        for pose in [Pose::Normal, Pose::Jumping, Pose::Sliding] {
            player.pose = pose;
            let rect = geo.player_rect(&player, 4);
            for kind in [ObstacleKind::Low, ObstacleKind::High] {
                let obstacles = vec![Obstacle {
                    id: 1,
                    lane: 2,
                    kind,
                    y: rect.min.y,
                    width: rect.width(),
                    height: rect.height(),
                }];
                assert!(
                    find_collision(&player, &obstacles, &geo, 4).is_some(),
                    "{pose:?} vs {kind:?}"
                );
            }
        }
    }

    #[test]
    fn test_pose_changes_hitbox() {
        let geo = geometry();
        let mut player = PlayerState::new(2);

        // Sits in the top of the standing hitbox (600..664), above the slide hitbox
        let high = vec![obstacle(1, 2, ObstacleKind::High, 600.0)];
        assert!(find_collision(&player, &high, &geo, 4).is_some());
        player.pose = Pose::Sliding;
        assert!(find_collision(&player, &high, &geo, 4).is_none());

        // Sits at the bottom of the standing hitbox, below the jump apex
        let low = vec![obstacle(1, 2, ObstacleKind::Low, 640.0)];
        player.pose = Pose::Normal;
        assert!(find_collision(&player, &low, &geo, 4).is_some());
        player.pose = Pose::Jumping;
        player.pose_elapsed = JUMP_DURATION / 2.0;
        assert!(find_collision(&player, &low, &geo, 4).is_none());
    }

    #[test]
    fn test_no_collision_above_player() {
        let geo = geometry();
        let player = PlayerState::new(0);
        let obstacles = vec![obstacle(1, 0, ObstacleKind::High, 400.0)];
        assert!(find_collision(&player, &obstacles, &geo, 4).is_none());
    }
}
