use std::time::{Duration, Instant};

use crate::game::StepOutcome;

/// In-memory statistics for one play session
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: usize,
    pub deaths: u32,
    pub food_eaten: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            deaths: 0,
            food_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Restart the clock for a new run
    pub fn on_restart(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Fold one tick's outcome into the session totals
    pub fn record(&mut self, outcome: StepOutcome, score: usize) {
        match outcome {
            StepOutcome::Moved => {}
            StepOutcome::Ate => {
                self.food_eaten += 1;
                self.high_score = self.high_score.max(score);
            }
            StepOutcome::Collided { final_score, .. } => {
                self.deaths += 1;
                self.high_score = self.high_score.max(final_score);
                self.on_restart();
            }
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
