//! High score leaderboard
//!
//! Tracks the top 10 runs. The table is plain serde data; where it is stored
//! is up to the host.

use serde::{Deserialize, Serialize};

use crate::sim::RunStats;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// High score leaderboard, sorted by score (best first)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<RunStats>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Slot a score would take: after every entry it doesn't beat
    fn slot_for(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// Rank a score would achieve (1-indexed), `None` if it misses the table
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        let slot = self.slot_for(score);
        (score > 0 && slot < MAX_HIGH_SCORES).then_some(slot + 1)
    }

    pub fn qualifies(&self, score: u64) -> bool {
        self.potential_rank(score).is_some()
    }

    /// Record a finished run, returning its rank if it made the table
    pub fn add(&mut self, stats: RunStats) -> Option<usize> {
        let rank = self.potential_rank(stats.score)?;
        self.entries.insert(rank - 1, stats);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Best run on a given difficulty
    pub fn best_for(&self, difficulty: &str) -> Option<&RunStats> {
        self.entries.iter().find(|e| e.difficulty == difficulty)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
