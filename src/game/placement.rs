//! Placement policy for food, bonus food, and obstacles.
//!
//! Placement is uniform over the grid and deliberately does NOT exclude
//! occupied cells: food may land under an obstacle or inside a snake, and
//! obstacles may overlap each other. Collisions with freshly placed cells
//! resolve through the normal tick rules.

use super::state::Position;
use rand::Rng;

/// Pick a uniformly random in-bounds cell
pub fn place_random<R: Rng>(rng: &mut R, width: usize, height: usize) -> Position {
    Position::new(
        rng.gen_range(0..width) as i32,
        rng.gen_range(0..height) as i32,
    )
}

/// Scatter `count` cells for a fresh obstacle set
pub fn scatter<R: Rng>(rng: &mut R, width: usize, height: usize, count: usize) -> Vec<Position> {
    (0..count).map(|_| place_random(rng, width, height)).collect()
}
