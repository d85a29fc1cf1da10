use std::time::{Duration, Instant};

/// Per-process play statistics shown in the header.
///
/// Session-local only; the persisted best lives in the score ledger.
pub struct SessionStats {
    pub round_start: Instant,
    pub elapsed: Duration,
    pub session_best: u32,
    pub rounds_played: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed: Duration::ZERO,
            session_best: 0,
            rounds_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed = self.round_start.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.rounds_played += 1;
        if final_score > self.session_best {
            self.session_best = final_score;
        }
    }

    pub fn format_clock(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
