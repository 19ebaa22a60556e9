//! Lane Runner headless driver
//!
//! Runs one game under the autopilot at a fixed 60 Hz frame time and prints
//! the end-of-run stats. When a high-score file is given, the run is added to
//! the table stored there and the updated table is printed and written back.
//!
//! Usage: `lane-runner [difficulty] [seed] [scores.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_runner::consts::DEFAULT_LANE_COUNT;
    use lane_runner::sim::autopilot;
    use lane_runner::{DifficultyPreset, HighScores, Simulation, SimulationConfig, WorldGeometry};

    /// Frame time of the simulated display
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after this many simulated seconds
    const TIME_LIMIT_SECS: f32 = 300.0;

    env_logger::init();
    log::info!("Lane Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let preset = match args.next() {
        Some(id) => DifficultyPreset::from_id(&id).unwrap_or_else(|| {
            log::warn!("Unknown difficulty '{}', using normal", id);
            DifficultyPreset::normal()
        }),
        None => DifficultyPreset::normal(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let scores_path = args.next().map(std::path::PathBuf::from);

    // Portrait field with a centered lane strip, as the web canvas lays it out
    let geometry = WorldGeometry::new(420.0, 760.0, 50.0, 320.0);
    let config = SimulationConfig::from_preset(DEFAULT_LANE_COUNT, &preset);
    let mut sim = Simulation::new(config, seed);

    log::info!("Difficulty: {} ({}), seed: {}", preset.name, preset.id, seed);

    let mut frames = 0u64;
    while !sim.is_crashed() && sim.run().elapsed < TIME_LIMIT_SECS {
        if let Some(command) = autopilot::decide(&sim, &geometry) {
            sim.apply(command);
        }
        sim.advance(FRAME_DT, &geometry);
        frames += 1;

        if frames.is_multiple_of(600) {
            let snapshot = sim.snapshot();
            log::info!(
                "t={:.0}s score={:.0} speed={:.1} obstacles={}",
                snapshot.elapsed,
                snapshot.score,
                snapshot.speed,
                snapshot.obstacles.len()
            );
        }
    }

    let Some(stats) = sim.stats().cloned() else {
        println!(
            "Survived the {:.0}s limit: score {:.0}, distance {:.0}px",
            TIME_LIMIT_SECS,
            sim.run().score,
            sim.run().distance
        );
        return;
    };

    println!(
        "Crashed after {:.1}s: score {}, distance {:.0}px ({})",
        stats.time_survived, stats.score, stats.distance, stats.difficulty
    );

    let Some(path) = scores_path else {
        match serde_json::to_string(&stats) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize run stats: {}", e),
        }
        return;
    };

    let mut high_scores = match std::fs::read_to_string(&path) {
        Ok(json) => HighScores::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable high scores in {}: {}", path.display(), e);
            HighScores::new()
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HighScores::new(),
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            HighScores::new()
        }
    };
    match high_scores.add(stats) {
        Some(rank) => log::info!("New high score, rank {}", rank),
        None => log::info!("Score did not make the table"),
    }

    match high_scores.to_json() {
        Ok(json) => {
            println!("{}", json);
            if let Err(e) = std::fs::write(&path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => log::error!("Failed to serialize high scores: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web builds drive `Simulation` from the host page
}
