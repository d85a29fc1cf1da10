use serde::{Deserialize, Serialize};

/// Points needed between level advances
pub const LEVEL_STEP_POINTS: u32 = 50;
/// Tick interval never drops to or below this many milliseconds
pub const SPEED_FLOOR_MS: u64 = 10;
/// Tick interval shrinks by this much on each level advance
pub const SPEED_DECREMENT_MS: u64 = 5;
/// Obstacle count after a level advance is `level + OBSTACLE_LEVEL_OFFSET`
pub const OBSTACLE_LEVEL_OFFSET: u32 = 10;

/// Time budget for a timed round, in seconds
pub const TIME_LIMIT_SECS: i64 = 60;
/// Bonus food appears once remaining time drops to this threshold
pub const BONUS_THRESHOLD_SECS: i64 = 15;
/// Seconds added to the time budget when bonus food is eaten
pub const BONUS_EXTENSION_SECS: u32 = 10;

/// A difficulty preset: the knobs fixed at round start
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Difficulty {
    /// Tick interval in milliseconds
    pub speed_ms: u64,
    /// Obstacles placed at round start
    pub obstacle_count: usize,
    /// Snake length at round start
    pub starting_length: usize,
    /// Points per food item
    pub food_value: u32,
}

impl Difficulty {
    pub fn easy() -> Self {
        Self {
            speed_ms: 100,
            obstacle_count: 5,
            starting_length: 1,
            food_value: 10,
        }
    }

    pub fn medium() -> Self {
        Self {
            speed_ms: 50,
            obstacle_count: 10,
            starting_length: 3,
            food_value: 15,
        }
    }

    pub fn hard() -> Self {
        Self {
            speed_ms: 25,
            obstacle_count: 15,
            starting_length: 5,
            food_value: 20,
        }
    }
}

/// Configuration for one solo round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Selected difficulty preset
    pub difficulty: Difficulty,
    /// Whether the round runs against the 60-second clock
    pub timed: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 20,
            difficulty: Difficulty::medium(),
            timed: false,
        }
    }
}

impl RoundConfig {
    pub fn new(width: usize, height: usize, difficulty: Difficulty) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            difficulty,
            timed: false,
        }
    }

    pub fn timed(mut self) -> Self {
        self.timed = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_table() {
        let easy = Difficulty::easy();
        assert_eq!(easy.speed_ms, 100);
        assert_eq!(easy.obstacle_count, 5);
        assert_eq!(easy.starting_length, 1);
        assert_eq!(easy.food_value, 10);

        let medium = Difficulty::medium();
        assert_eq!(medium.speed_ms, 50);
        assert_eq!(medium.obstacle_count, 10);
        assert_eq!(medium.starting_length, 3);
        assert_eq!(medium.food_value, 15);

        let hard = Difficulty::hard();
        assert_eq!(hard.speed_ms, 25);
        assert_eq!(hard.obstacle_count, 15);
        assert_eq!(hard.starting_length, 5);
        assert_eq!(hard.food_value, 20);
    }

    #[test]
    fn test_default_round_config() {
        let config = RoundConfig::default();
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 20);
        assert!(!config.timed);
    }

    #[test]
    fn test_timed_builder() {
        let config = RoundConfig::default().timed();
        assert!(config.timed);
    }
}
