use std::time::{Duration, Instant};

/// Per-process play statistics shown in the HUD
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Best score seen since the process started
    pub high_score: u32,
    pub games_played: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            running: false,
        }
    }

    /// Refresh the session clock; frozen outside a running session
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_pause(&mut self) {
        self.update();
        self.running = false;
    }

    pub fn on_resume(&mut self) {
        // Rewind the start so elapsed time excludes the pause
        self.start_time = Instant::now()
            .checked_sub(self.elapsed_time)
            .unwrap_or_else(Instant::now);
        self.running = true;
    }

    /// Record a finished game. Returns true on a new high score.
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.update();
        self.running = false;
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
            return true;
        }
        false
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
