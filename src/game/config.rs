use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square game grid
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded per food eaten
    pub food_points: u32,

    // Speed curve
    /// Tick interval at score 0, in milliseconds
    pub base_interval_ms: u64,
    /// Fastest allowed tick interval, in milliseconds
    pub min_interval_ms: u64,
    /// Score needed for each speed-up step
    pub speedup_every: u32,
    /// Milliseconds shaved off the interval per speed-up step
    pub speedup_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 15,
            initial_snake_length: 3,
            food_points: 10,
            base_interval_ms: 150,
            min_interval_ms: 50,
            speedup_every: 50,
            speedup_ms: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Tick interval for a given score: `max(min, base - floor(score / every) * step)`
    pub fn tick_interval(&self, score: u32) -> Duration {
        let steps = u64::from(score / self.speedup_every.max(1));
        let reduction = steps.saturating_mul(self.speedup_ms);
        let millis = self
            .base_interval_ms
            .saturating_sub(reduction)
            .max(self.min_interval_ms);
        Duration::from_millis(millis)
    }
}
