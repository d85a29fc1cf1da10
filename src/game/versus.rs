//! Local two-player rules: two snakes, one shared food, no obstacles.
//!
//! Both snakes follow the same movement law as solo play. Heads pass
//! through the other snake's body; only the grid edges and a snake's own
//! body are lethal.

use super::{
    action::Action,
    placement::place_random,
    state::{EndReason, Position, RoundPhase, Snake},
};

/// Grid width for the versus arena
pub const VERSUS_WIDTH: usize = 60;
/// Grid height for the versus arena
pub const VERSUS_HEIGHT: usize = 25;
/// Fixed tick interval; versus play has no level progression
pub const VERSUS_TICK_MS: u64 = 60;
/// Points per food item, identical for both players
pub const VERSUS_FOOD_POINTS: u32 = 10;

/// One participant: a snake plus its own score
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub snake: Snake,
    pub score: u32,
}

/// Complete state of one versus round
#[derive(Debug, Clone, PartialEq)]
pub struct VersusState {
    pub players: [Player; 2],
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub phase: RoundPhase,
}

impl VersusState {
    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Out-of-bounds or self-collision; the other snake's body is harmless
    fn death_reason(&self, index: usize) -> Option<EndReason> {
        let snake = &self.players[index].snake;
        let head = snake.head();
        if !self.is_in_bounds(head) {
            return Some(EndReason::Wall);
        }
        if snake.collides_with_body(head) {
            return Some(EndReason::SelfCollision);
        }
        None
    }
}

/// Result of advancing a versus round one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersusStepResult {
    pub terminated: bool,
    /// Index of the player who ate the food this tick, if any
    pub fed: Option<usize>,
    /// Which players died this tick
    pub dead: [bool; 2],
}

/// The simulation engine for versus rounds
pub struct VersusEngine {
    rng: rand::rngs::ThreadRng,
}

impl VersusEngine {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Build a fresh round: player 1 a third of the way in, player 2 two
    /// thirds, both single-celled and motionless until steered
    pub fn reset(&mut self) -> VersusState {
        let mid_y = (VERSUS_HEIGHT / 2) as i32;
        let p1 = Player {
            snake: Snake::new(Position::new((VERSUS_WIDTH / 3) as i32, mid_y), 1),
            score: 0,
        };
        let p2 = Player {
            snake: Snake::new(Position::new((2 * VERSUS_WIDTH / 3) as i32, mid_y), 1),
            score: 0,
        };
        let food = place_random(&mut self.rng, VERSUS_WIDTH, VERSUS_HEIGHT);

        VersusState {
            players: [p1, p2],
            food,
            grid_width: VERSUS_WIDTH,
            grid_height: VERSUS_HEIGHT,
            phase: RoundPhase::Active,
        }
    }

    /// Advance both snakes one tick.
    ///
    /// Food is awarded player-1-first: when both heads land on the food cell
    /// in the same tick, only player 1 eats. Food is resolved before the
    /// death predicates, matching the permissive placement policy (food can
    /// sit inside a body, and eating it on a lethal tick still scores).
    pub fn step(&mut self, state: &mut VersusState, actions: [Action; 2]) -> VersusStepResult {
        if !state.is_active() {
            return VersusStepResult {
                terminated: true,
                fed: None,
                dead: [false, false],
            };
        }

        for (player, action) in state.players.iter_mut().zip(actions) {
            if let Action::Steer(direction) = action {
                player.snake.set_heading(direction);
            }
            player.snake.advance();
        }

        let mut fed = None;
        for (index, player) in state.players.iter_mut().enumerate() {
            if player.snake.head() == state.food {
                player.score += VERSUS_FOOD_POINTS;
                player.snake.mark_growth();
                state.food = place_random(&mut self.rng, VERSUS_WIDTH, VERSUS_HEIGHT);
                fed = Some(index);
                break;
            }
        }

        let reasons = [state.death_reason(0), state.death_reason(1)];
        let dead = [reasons[0].is_some(), reasons[1].is_some()];

        if let Some(reason) = reasons[0].or(reasons[1]) {
            state.phase = RoundPhase::GameOver(reason);
            return VersusStepResult {
                terminated: true,
                fed,
                dead,
            };
        }

        VersusStepResult {
            terminated: false,
            fed,
            dead,
        }
    }
}

impl Default for VersusEngine {
    fn default() -> Self {
        Self::new()
    }
}
