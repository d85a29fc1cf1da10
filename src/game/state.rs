use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// One snake: an ordered body plus a heading and a growth flag.
///
/// The same type serves solo and versus play; the movement law never varies.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at index 0
    pub body: Vec<Position>,
    /// Current heading; `None` until the first steering input arrives
    pub heading: Option<Direction>,
    /// Set when food was eaten; the next advance keeps the tail
    pub pending_growth: bool,
}

impl Snake {
    /// Create a snake with its body stacked vertically below the head.
    ///
    /// Starting segments run along increasing y from the head cell, matching
    /// the construction the game has always used. Grid centers and preset
    /// lengths keep the stack inside bounds.
    pub fn new(head: Position, length: usize) -> Self {
        let mut body = Vec::with_capacity(length.max(1));
        for i in 0..length.max(1) as i32 {
            body.push(head.moved_by(0, i));
        }

        Self {
            body,
            heading: None,
            pending_growth: false,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with the body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Request a new heading; a direct reversal is silently ignored
    pub fn set_heading(&mut self, new_heading: Direction) {
        if let Some(current) = self.heading {
            if current.is_opposite(new_heading) {
                return;
            }
        }
        self.heading = Some(new_heading);
    }

    /// Mark that the next advance must keep the tail
    pub fn mark_growth(&mut self) {
        self.pending_growth = true;
    }

    /// Advance one cell in the current heading. No-op while the heading is
    /// unset. The tail is popped unless growth is pending, in which case it
    /// is kept, length grows by one, and the flag clears.
    pub fn advance(&mut self) {
        let Some(heading) = self.heading else {
            return;
        };

        let new_head = self.head().moved_in_direction(heading);
        self.body.insert(0, new_head);

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Head left the grid
    Wall,
    /// Head entered the snake's own body
    SelfCollision,
    /// Head entered an obstacle cell
    Obstacle,
    /// Timed round ran out of time
    TimeExpired,
    /// Player asked to end the round
    Quit,
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Active,
    GameOver(EndReason),
}

/// Clock state carried only by timed rounds
#[derive(Debug, Clone, PartialEq)]
pub struct TimedState {
    /// Seconds remaining, derived from wall-clock elapsed time
    pub time_left: i64,
    /// Seconds added to the budget by eaten bonus food
    pub bonus_seconds: u32,
    /// Bonus food cell while one is visible
    pub bonus_food: Option<Position>,
}

impl TimedState {
    pub fn new(time_limit: i64) -> Self {
        Self {
            time_left: time_limit,
            bonus_seconds: 0,
            bonus_food: None,
        }
    }
}

/// Complete state of one solo round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub snake: Snake,
    pub food: Position,
    pub obstacles: Vec<Position>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub level: u32,
    /// Current tick interval in milliseconds; shrinks on level-up
    pub speed_ms: u64,
    pub phase: RoundPhase,
    /// Present only in timed rounds
    pub timer: Option<TimedState>,
}

impl RoundState {
    pub fn new(
        snake: Snake,
        food: Position,
        obstacles: Vec<Position>,
        grid_width: usize,
        grid_height: usize,
        speed_ms: u64,
        timer: Option<TimedState>,
    ) -> Self {
        Self {
            snake,
            food,
            obstacles,
            grid_width,
            grid_height,
            score: 0,
            level: 1,
            speed_ms,
            phase: RoundPhase::Active,
            timer,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is an obstacle cell
    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    /// End the round with the given reason
    pub fn end(&mut self, reason: EndReason) {
        self.phase = RoundPhase::GameOver(reason);
    }
}
