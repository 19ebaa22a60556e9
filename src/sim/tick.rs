//! Simulation engine and per-frame update
//!
//! The host owns one [`Simulation`], forwards player intent through the
//! command methods and calls [`Simulation::advance`] once per frame with the
//! elapsed time and the current field layout.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::find_collision;
use super::geometry::{Rect, WorldGeometry};
use super::spawn::{jittered_interval, roll_obstacle};
use super::state::{Obstacle, PlayerState, Pose, RunState, RunStats, Snapshot};
use crate::clamp_lane;
use crate::consts::*;
use crate::settings::SimulationConfig;

/// Player intent, for drivers that queue input events between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Continuous lane coordinate (rounded and clamped)
    MoveToLane(f32),
    Jump,
    Slide,
}

/// The endless-runner simulation
#[derive(Debug, Clone)]
pub struct Simulation<R = Pcg32> {
    config: SimulationConfig,
    player: PlayerState,
    run: RunState,
    /// Active obstacles, in spawn order
    obstacles: Vec<Obstacle>,
    /// Lane of the most recent spawn
    last_spawn_lane: Option<usize>,
    /// Captured once when the run ends
    stats: Option<RunStats>,
    rng: R,
    next_id: u32,
}

impl Simulation<Pcg32> {
    /// Create a simulation with a seeded PCG generator
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation drawing randomness from `rng`
    pub fn with_rng(config: SimulationConfig, rng: R) -> Self {
        let config = config.sanitized();
        let player = PlayerState::new(config.lane_count / 2);
        let run = RunState::new(config.initial_speed, config.initial_spawn_interval);

        log::info!(
            "New run: difficulty={} lanes={} speed={} spawn_interval={}",
            config.difficulty,
            config.lane_count,
            config.initial_speed,
            config.initial_spawn_interval
        );

        Self {
            config,
            player,
            run,
            obstacles: Vec::new(),
            last_spawn_lane: None,
            stats: None,
            rng,
            next_id: 1,
        }
    }

    // --- Commands ---

    pub fn move_left(&mut self) {
        self.player.lane = self.player.lane.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        let max_lane = self.config.lane_count - 1;
        self.player.lane = (self.player.lane + 1).min(max_lane);
    }

    /// Jump to the lane nearest a continuous lane coordinate (pointer input)
    pub fn move_to_lane(&mut self, lane: f32) {
        if let Some(lane) = clamp_lane(lane, self.config.lane_count) {
            self.player.lane = lane;
        }
    }

    /// Start a jump (ignored while any pose is active)
    pub fn jump(&mut self) {
        if self.player.begin_pose(Pose::Jumping) {
            log::debug!("Jump at t={:.2}", self.run.elapsed);
        }
    }

    /// Start a slide (ignored while any pose is active)
    pub fn slide(&mut self) {
        if self.player.begin_pose(Pose::Sliding) {
            log::debug!("Slide at t={:.2}", self.run.elapsed);
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveToLane(lane) => self.move_to_lane(lane),
            Command::Jump => self.jump(),
            Command::Slide => self.slide(),
        }
    }

    // --- Update ---

    /// Advance the simulation by `dt` seconds.
    ///
    /// No-op once crashed or for non-finite / non-positive `dt`. Steps longer
    /// than `MAX_STEP` are clamped.
    pub fn advance(&mut self, dt: f32, geometry: &WorldGeometry) {
        if self.run.crashed || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_STEP);

        // Progress and score
        let run = &mut self.run;
        run.elapsed += dt;
        run.distance += run.speed * dt;
        run.score = run.elapsed * SCORE_PER_SECOND + run.distance / DISTANCE_PER_POINT;

        // Difficulty ramp
        run.speed *= 1.0 + SPEED_GROWTH * dt;
        run.spawn_interval =
            (run.spawn_interval * (1.0 - SPAWN_INTERVAL_SHRINK * dt)).max(MIN_SPAWN_INTERVAL);

        // Pose timer
        let pose = self.player.pose;
        if self.player.update_pose(dt) {
            log::debug!("{:?} ended at t={:.2}", pose, self.run.elapsed);
        }

        // Spawning (may fire several times in one step)
        self.run.spawn_cooldown -= dt;
        while self.run.spawn_cooldown <= 0.0 {
            self.spawn_obstacle(geometry);
            self.run.spawn_cooldown += jittered_interval(&mut self.rng, self.run.spawn_interval);
        }

        // Obstacles move toward the player at world speed
        let step = self.run.speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.y += step;
        }

        let prune_y = geometry.field_height + PRUNE_MARGIN;
        self.obstacles.retain(|o| o.y <= prune_y);

        if let Some(hit) = find_collision(
            &self.player,
            &self.obstacles,
            geometry,
            self.config.lane_count,
        ) {
            let hit_id = hit.id;
            self.crash(hit_id);
        }
    }

    fn spawn_obstacle(&mut self, geometry: &WorldGeometry) {
        let id = self.next_entity_id();
        let obstacle = roll_obstacle(
            &mut self.rng,
            id,
            self.config.lane_count,
            self.last_spawn_lane,
            geometry,
        );
        log::debug!(
            "Spawned obstacle {} ({:?}) in lane {} at y={:.1}",
            obstacle.id,
            obstacle.kind,
            obstacle.lane,
            obstacle.y
        );
        self.last_spawn_lane = Some(obstacle.lane);
        self.obstacles.push(obstacle);
    }

    fn crash(&mut self, obstacle_id: u32) {
        self.run.crashed = true;
        let stats = RunStats {
            score: self.run.score.floor() as u64,
            time_survived: self.run.elapsed,
            distance: self.run.distance,
            difficulty: self.config.difficulty.clone(),
        };
        log::info!(
            "Crashed into obstacle {} after {:.1}s: score={} distance={:.0}",
            obstacle_id,
            stats.time_survived,
            stats.score,
            stats.distance
        );
        self.stats = Some(stats);
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[cfg(test)]
    pub(crate) fn push_obstacle(&mut self, mut obstacle: Obstacle) -> u32 {
        obstacle.id = self.next_entity_id();
        let id = obstacle.id;
        self.obstacles.push(obstacle);
        id
    }

    #[cfg(test)]
    pub(crate) fn run_mut(&mut self) -> &mut RunState {
        &mut self.run
    }
}

impl<R> Simulation<R> {
    // --- Queries ---

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn is_crashed(&self) -> bool {
        self.run.crashed
    }

    /// End-of-run stats, `None` until the run has crashed
    pub fn stats(&self) -> Option<&RunStats> {
        self.stats.as_ref()
    }

    /// Copy of everything the renderer and HUD need
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lane: self.player.lane,
            pose: self.player.pose,
            pose_elapsed: self.player.pose_elapsed,
            obstacles: self.obstacles.clone(),
            speed: self.run.speed,
            elapsed: self.run.elapsed,
            distance: self.run.distance,
            score: self.run.score,
            crashed: self.run.crashed,
        }
    }

    pub fn player_rect(&self, geometry: &WorldGeometry) -> Rect {
        geometry.player_rect(&self.player, self.config.lane_count)
    }

    pub fn obstacle_rect(&self, obstacle: &Obstacle, geometry: &WorldGeometry) -> Rect {
        geometry.obstacle_rect(obstacle, self.config.lane_count)
    }
}
