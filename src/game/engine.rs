use super::{
    action::Action,
    config::{
        RoundConfig, BONUS_EXTENSION_SECS, BONUS_THRESHOLD_SECS, LEVEL_STEP_POINTS,
        OBSTACLE_LEVEL_OFFSET, SPEED_DECREMENT_MS, SPEED_FLOOR_MS, TIME_LIMIT_SECS,
    },
    placement::{place_random, scatter},
    state::{EndReason, Position, RoundPhase, RoundState, Snake, TimedState},
};
use std::time::Duration;

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// The head landed on the food cell
    pub ate_food: bool,
    /// The head landed on a visible bonus food cell (timed rounds)
    pub ate_bonus: bool,
    /// The score crossed a level boundary this tick
    pub leveled_up: bool,
    /// Why the round ended, if it did
    pub end_reason: Option<EndReason>,
}

/// Result of advancing the simulation one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the round has reached `GameOver`
    pub terminated: bool,
    pub info: StepInfo,
}

/// The simulation engine for solo and timed rounds.
///
/// Owns the placement RNG and the round configuration; the round state is
/// passed back in by exclusive reference each tick.
pub struct GameEngine {
    config: RoundConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: RoundConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Build a fresh round from the configuration
    pub fn reset(&mut self) -> RoundState {
        let center = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        let snake = Snake::new(center, self.config.difficulty.starting_length);

        let food = place_random(&mut self.rng, self.config.grid_width, self.config.grid_height);
        let obstacles = scatter(
            &mut self.rng,
            self.config.grid_width,
            self.config.grid_height,
            self.config.difficulty.obstacle_count,
        );
        let timer = self.config.timed.then(|| TimedState::new(TIME_LIMIT_SECS));

        RoundState::new(
            snake,
            food,
            obstacles,
            self.config.grid_width,
            self.config.grid_height,
            self.config.difficulty.speed_ms,
            timer,
        )
    }

    /// Advance the round one tick.
    ///
    /// Fixed evaluation order: heading update, body advance, wall / self /
    /// obstacle collision, time expiry, food and level-up, bonus food.
    /// `elapsed` is the wall-clock time since round start and is only read
    /// by timed rounds.
    pub fn step(&mut self, state: &mut RoundState, action: Action, elapsed: Duration) -> StepResult {
        if !state.is_active() {
            let end_reason = match state.phase {
                RoundPhase::GameOver(reason) => Some(reason),
                RoundPhase::Active => None,
            };
            return StepResult {
                terminated: true,
                info: StepInfo {
                    end_reason,
                    ..StepInfo::default()
                },
            };
        }

        if let Action::Steer(direction) = action {
            state.snake.set_heading(direction);
        }

        state.snake.advance();
        let head = state.snake.head();

        if !state.is_in_bounds(head) {
            return Self::finish(state, EndReason::Wall);
        }
        if state.snake.collides_with_body(head) {
            return Self::finish(state, EndReason::SelfCollision);
        }
        if state.is_obstacle(head) {
            return Self::finish(state, EndReason::Obstacle);
        }

        if let Some(timer) = state.timer.as_mut() {
            timer.time_left =
                TIME_LIMIT_SECS + i64::from(timer.bonus_seconds) - elapsed.as_secs() as i64;
            if timer.time_left <= 0 {
                timer.time_left = 0;
                return Self::finish(state, EndReason::TimeExpired);
            }
            if timer.time_left <= BONUS_THRESHOLD_SECS && timer.bonus_food.is_none() {
                timer.bonus_food = Some(place_random(
                    &mut self.rng,
                    state.grid_width,
                    state.grid_height,
                ));
            }
        }

        let mut info = StepInfo::default();

        if head == state.food {
            info.ate_food = true;
            state.snake.mark_growth();
            state.score += self.config.difficulty.food_value;
            state.food = place_random(&mut self.rng, state.grid_width, state.grid_height);

            if state.score % LEVEL_STEP_POINTS == 0 && state.speed_ms > SPEED_FLOOR_MS {
                state.level += 1;
                state.speed_ms -= SPEED_DECREMENT_MS;
                let count = (state.level + OBSTACLE_LEVEL_OFFSET) as usize;
                state.obstacles = scatter(&mut self.rng, state.grid_width, state.grid_height, count);
                info.leveled_up = true;
            }
        }

        if let Some(timer) = state.timer.as_mut() {
            if timer.bonus_food == Some(head) {
                timer.bonus_seconds += BONUS_EXTENSION_SECS;
                timer.time_left += i64::from(BONUS_EXTENSION_SECS);
                timer.bonus_food = None;
                info.ate_bonus = true;
            }
        }

        StepResult {
            terminated: false,
            info,
        }
    }

    fn finish(state: &mut RoundState, reason: EndReason) -> StepResult {
        state.end(reason);
        StepResult {
            terminated: true,
            info: StepInfo {
                end_reason: Some(reason),
                ..StepInfo::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use crate::game::config::Difficulty;

    fn quiet_engine(difficulty: Difficulty) -> (GameEngine, RoundState) {
        let mut engine = GameEngine::new(RoundConfig::new(40, 20, difficulty));
        let mut state = engine.reset();
        // Keep randomly placed entities out of the snake's way
        state.obstacles.clear();
        state.food = Position::new(0, 0);
        (engine, state)
    }

    /// Steer toward a food cell placed directly in front of the head
    fn feed(engine: &mut GameEngine, state: &mut RoundState) -> StepResult {
        let heading = state.snake.heading.unwrap_or(Direction::Right);
        state.food = state.snake.head().moved_in_direction(heading);
        engine.step(state, Action::Steer(heading), Duration::ZERO)
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new(RoundConfig::default());
        let state = engine.reset();

        assert!(state.is_active());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.obstacles.len(), 10);
        assert_eq!(state.speed_ms, 50);
        assert!(state.timer.is_none());
    }

    #[test]
    fn test_no_heading_keeps_head_in_place() {
        let (mut engine, mut state) = quiet_engine(Difficulty::medium());
        let head = state.snake.head();

        let result = engine.step(&mut state, Action::Continue, Duration::ZERO);

        assert!(!result.terminated);
        assert_eq!(state.snake.head(), head);
    }

    #[test]
    fn test_basic_movement() {
        let (mut engine, mut state) = quiet_engine(Difficulty::medium());
        let head = state.snake.head();

        let result = engine.step(&mut state, Action::Steer(Direction::Right), Duration::ZERO);

        assert!(!result.terminated);
        assert_eq!(state.snake.head(), head.moved_by(1, 0));
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_food_scores_and_grows_lazily() {
        let (mut engine, mut state) = quiet_engine(Difficulty::medium());
        let initial_length = state.snake.len();

        let result = feed(&mut engine, &mut state);

        assert!(result.info.ate_food);
        assert_eq!(state.score, 15);
        // Growth lands on the following tick, not this one
        assert_eq!(state.snake.len(), initial_length);
        assert!(state.snake.pending_growth);

        state.food = Position::new(0, 0);
        engine.step(&mut state, Action::Continue, Duration::ZERO);
        assert_eq!(state.snake.len(), initial_length + 1);
    }

    #[test]
    fn test_wall_collision_left_edge() {
        let (mut engine, mut state) = quiet_engine(Difficulty::medium());
        state.snake = Snake::new(Position::new(0, 5), 3);

        let result = engine.step(&mut state, Action::Steer(Direction::Left), Duration::ZERO);

        assert!(result.terminated);
        assert_eq!(result.info.end_reason, Some(EndReason::Wall));
        assert!(!state.is_active());
    }

    #[test]
    fn test_wall_collision_right_edge() {
        let (mut engine, mut state) = quiet_engine(Difficulty::medium());
        state.snake = Snake::new(Position::new(39, 5), 3);

        let result = engine.step(&mut state, Action::Steer(Direction::Right), Duration::ZERO);

        assert!(result.terminated);
        assert_eq!(result.info.end_reason, Some(EndReason::Wall));
    }

    #[test]
    fn test_self_collision() {
        let (mut engine, mut state) = quiet_engine(Difficulty::hard());
        assert_eq!(state.snake.len(), 5);

        // Tight left turn folds the head back into the body on the third move
        engine.step(&mut state, Action::Steer(Direction::Right), Duration::ZERO);
        engine.step(&mut state, Action::Steer(Direction::Down), Duration::ZERO);
        let result = engine.step(&mut state, Action::Steer(Direction::Left), Duration::ZERO);

        assert!(result.terminated);
        assert_eq!(result.info.end_reason, Some(EndReason::SelfCollision));
    }

    #[test]
    fn test_obstacle_collision() {
        let (mut engine, mut state) = quiet_engine(Difficulty::medium());
        let head = state.snake.head();
        state.obstacles = vec![head.moved_by(1, 0)];

        let result = engine.step(&mut state, Action::Steer(Direction::Right), Duration::ZERO);

        assert!(result.terminated);
        assert_eq!(result.info.end_reason, Some(EndReason::Obstacle));
    }

    #[test]
    fn test_level_up_on_exact_multiple_of_fifty() {
        let difficulty = Difficulty {
            speed_ms: 25,
            obstacle_count: 5,
            starting_length: 3,
            food_value: 10,
        };
        let (mut engine, mut state) = quiet_engine(difficulty);

        for _ in 0..4 {
            let result = feed(&mut engine, &mut state);
            assert!(!result.info.leveled_up);
        }
        assert_eq!(state.score, 40);
        assert_eq!(state.level, 1);

        let result = feed(&mut engine, &mut state);
        assert!(result.info.leveled_up);
        assert_eq!(state.score, 50);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed_ms, 20);
        assert_eq!(state.obstacles.len(), 12); // level + 10
    }

    #[test]
    fn test_no_level_up_off_multiples() {
        // Food value 20 reaches 60 after three items; 60 is not a multiple of 50
        let (mut engine, mut state) = quiet_engine(Difficulty::hard());

        for _ in 0..3 {
            let result = feed(&mut engine, &mut state);
            assert!(!result.info.leveled_up);
        }
        assert_eq!(state.score, 60);
        assert_eq!(state.level, 1);
        assert_eq!(state.speed_ms, 25);
    }

    #[test]
    fn test_level_up_respects_speed_floor() {
        let difficulty = Difficulty {
            speed_ms: 25,
            obstacle_count: 5,
            starting_length: 3,
            food_value: 50,
        };
        let (mut engine, mut state) = quiet_engine(difficulty);
        state.speed_ms = 10;

        let result = feed(&mut engine, &mut state);

        assert!(result.info.ate_food);
        assert_eq!(state.score, 50);
        assert!(!result.info.leveled_up);
        assert_eq!(state.level, 1);
        assert_eq!(state.speed_ms, 10);
    }

    #[test]
    fn test_terminated_round_stays_terminated() {
        let (mut engine, mut state) = quiet_engine(Difficulty::medium());
        state.end(EndReason::Quit);

        let result = engine.step(&mut state, Action::Continue, Duration::ZERO);

        assert!(result.terminated);
        assert_eq!(result.info.end_reason, Some(EndReason::Quit));
    }

    fn timed_engine() -> (GameEngine, RoundState) {
        let mut engine = GameEngine::new(RoundConfig::default().timed());
        let mut state = engine.reset();
        state.obstacles.clear();
        state.food = Position::new(0, 0);
        (engine, state)
    }

    #[test]
    fn test_timed_round_has_timer() {
        let (_, state) = timed_engine();
        let timer = state.timer.as_ref().unwrap();
        assert_eq!(timer.time_left, 60);
        assert!(timer.bonus_food.is_none());
    }

    #[test]
    fn test_time_expiry_ends_round() {
        let (mut engine, mut state) = timed_engine();

        let result = engine.step(&mut state, Action::Continue, Duration::from_secs(60));

        assert!(result.terminated);
        assert_eq!(result.info.end_reason, Some(EndReason::TimeExpired));
        assert_eq!(state.timer.as_ref().unwrap().time_left, 0);
    }

    #[test]
    fn test_bonus_spawns_once_below_threshold() {
        let (mut engine, mut state) = timed_engine();

        engine.step(&mut state, Action::Continue, Duration::from_secs(44));
        assert!(state.timer.as_ref().unwrap().bonus_food.is_none());

        engine.step(&mut state, Action::Continue, Duration::from_secs(45));
        // Placement is permissive, so the bonus may legally spawn under the
        // head and be eaten on the very tick it appears
        let timer = state.timer.as_ref().unwrap();
        assert!(timer.bonus_food.is_some() || timer.bonus_seconds > 0);

        // Idempotent while visible
        let parked = Position::new(1, 1);
        state.timer.as_mut().unwrap().bonus_food = Some(parked);
        engine.step(&mut state, Action::Continue, Duration::from_secs(46));
        assert_eq!(state.timer.as_ref().unwrap().bonus_food, Some(parked));
    }

    #[test]
    fn test_bonus_consumption_extends_time_and_hides() {
        let (mut engine, mut state) = timed_engine();
        let target = state.snake.head().moved_by(1, 0);
        {
            let timer = state.timer.as_mut().unwrap();
            timer.bonus_food = Some(target);
        }

        let result = engine.step(
            &mut state,
            Action::Steer(Direction::Right),
            Duration::from_secs(46),
        );

        assert!(result.info.ate_bonus);
        let timer = state.timer.as_ref().unwrap();
        assert!(timer.bonus_food.is_none());
        assert_eq!(timer.bonus_seconds, 10);
        // 60 - 46 elapsed, plus the 10-second extension
        assert_eq!(timer.time_left, 24);
    }
}
