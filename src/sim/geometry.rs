//! Field geometry and hitbox rectangles
//!
//! Pixel layout belongs to the host. Each frame it hands the engine a
//! [`WorldGeometry`] describing the play field and the lane strip; the engine
//! only uses it to turn lane indices and poses into rectangles.
//!
//! Coordinates are screen-style: x grows right, y grows down toward the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, PlayerState, Pose};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Rectangle of `size` centered horizontally on `center_x`, top edge at `top`
    pub fn centered_x(center_x: f32, top: f32, size: Vec2) -> Self {
        Self::new(center_x - size.x / 2.0, top, size.x, size.y)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Player hitbox layout, owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerMetrics {
    /// Hitbox width as a fraction of lane width
    pub width_ratio: f32,
    /// Standing hitbox height (pixels)
    pub height: f32,
    /// Gap between hitbox bottom and field bottom (pixels)
    pub bottom_margin: f32,
    /// Hitbox height multiplier while sliding (bottom edge stays put)
    pub slide_height_ratio: f32,
    /// Peak upward offset at the top of a jump (pixels)
    pub jump_lift: f32,
}

impl Default for PlayerMetrics {
    fn default() -> Self {
        Self {
            width_ratio: 0.6,
            height: 64.0,
            bottom_margin: 36.0,
            slide_height_ratio: 0.55,
            jump_lift: 40.0,
        }
    }
}

/// Per-frame field layout supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldGeometry {
    pub field_width: f32,
    pub field_height: f32,
    /// Left edge of the lane strip
    pub lane_area_x: f32,
    /// Width of the lane strip
    pub lane_area_width: f32,
    #[serde(default)]
    pub player: PlayerMetrics,
}

impl WorldGeometry {
    /// Geometry with default player metrics
    pub fn new(field_width: f32, field_height: f32, lane_area_x: f32, lane_area_width: f32) -> Self {
        Self {
            field_width,
            field_height,
            lane_area_x,
            lane_area_width,
            player: PlayerMetrics::default(),
        }
    }

    /// Width of a single lane
    #[inline]
    pub fn lane_width(&self, lane_count: usize) -> f32 {
        self.lane_area_width / lane_count.max(1) as f32
    }

    /// Horizontal center of a lane
    #[inline]
    pub fn lane_center_x(&self, lane: usize, lane_count: usize) -> f32 {
        self.lane_area_x + (lane as f32 + 0.5) * self.lane_width(lane_count)
    }

    /// Continuous lane coordinate under a pointer x position.
    ///
    /// Lane centers map to whole numbers, so rounding picks the lane under the
    /// pointer. Feed the result to `Simulation::move_to_lane`.
    pub fn lane_at(&self, x: f32, lane_count: usize) -> f32 {
        (x - self.lane_area_x) / self.lane_width(lane_count) - 0.5
    }

    /// Player hitbox for the given lane and pose
    pub fn player_rect(&self, player: &PlayerState, lane_count: usize) -> Rect {
        let metrics = &self.player;
        let width = self.lane_width(lane_count) * metrics.width_ratio;
        let bottom = self.field_height - metrics.bottom_margin;

        let (height, lift) = match player.pose {
            Pose::Normal => (metrics.height, 0.0),
            Pose::Sliding => (metrics.height * metrics.slide_height_ratio, 0.0),
            Pose::Jumping => {
                let arc = (player.pose_progress() * std::f32::consts::PI).sin();
                (metrics.height, metrics.jump_lift * arc)
            }
        };

        Rect::centered_x(
            self.lane_center_x(player.lane, lane_count),
            bottom - height - lift,
            Vec2::new(width, height),
        )
    }

    /// Obstacle hitbox: lane-centered, stored size and vertical position
    pub fn obstacle_rect(&self, obstacle: &Obstacle, lane_count: usize) -> Rect {
        Rect::centered_x(
            self.lane_center_x(obstacle.lane, lane_count),
            obstacle.y,
            Vec2::new(obstacle.width, obstacle.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    fn geometry() -> WorldGeometry {
        WorldGeometry::new(400.0, 700.0, 40.0, 320.0)
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&a));
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(30.0, 30.0, 5.0, 5.0)));
    }

    #[test]
    fn test_lane_layout() {
        let geo = geometry();
        assert_eq!(geo.lane_width(4), 80.0);
        assert_eq!(geo.lane_center_x(0, 4), 80.0);
        assert_eq!(geo.lane_center_x(3, 4), 320.0);

        assert_eq!(crate::clamp_lane(geo.lane_at(80.0, 4), 4), Some(0));
        assert_eq!(crate::clamp_lane(geo.lane_at(239.0, 4), 4), Some(2));
        assert_eq!(crate::clamp_lane(geo.lane_at(1000.0, 4), 4), Some(3));
        assert_eq!(crate::clamp_lane(geo.lane_at(0.0, 4), 4), Some(0));
    }

    #[test]
    fn test_player_rect_by_pose() {
        let geo = geometry();
        let mut player = PlayerState::new(1);

        let standing = geo.player_rect(&player, 4);
        assert!((standing.width() - 48.0).abs() < 1e-4);
        assert_eq!(standing.max.y, 700.0 - 36.0);
        assert_eq!(standing.height(), 64.0);
        assert!((standing.center().x - 160.0).abs() < 1e-3);

        player.pose = Pose::Sliding;
        let sliding = geo.player_rect(&player, 4);
        assert!((sliding.max.y - standing.max.y).abs() < 1e-3);
        assert!(sliding.height() < standing.height());

        player.pose = Pose::Jumping;
        player.pose_elapsed = crate::consts::JUMP_DURATION / 2.0;
        let jumping = geo.player_rect(&player, 4);
        assert!((standing.min.y - jumping.min.y - 40.0).abs() < 1e-3);
        assert!((jumping.height() - standing.height()).abs() < 1e-3);
    }

    #[test]
    fn test_obstacle_rect() {
        let geo = geometry();
        let obstacle = Obstacle {
            id: 1,
            lane: 2,
            kind: ObstacleKind::Low,
            y: -50.0,
            width: 46.4,
            height: 22.0,
        };
        let rect = geo.obstacle_rect(&obstacle, 4);
        assert!((rect.center().x - 240.0).abs() < 1e-3);
        assert_eq!(rect.min.y, -50.0);
        assert_eq!(rect.max.y, -28.0);
        assert!((rect.width() - 46.4).abs() < 1e-4);
    }
}
