//! Ghost steering.

use bracket_lib::prelude::RandomNumberGenerator;
use common::{Direction, Point};
use maze::Maze;

/// Chance that a ghost takes a random valid move instead of the greedy one.
const WANDER_CHANCE: f32 = 0.3;

/// Directions from `from` whose resolved cell differs from `from`.
fn valid_moves(maze: &Maze, from: Point) -> Vec<(Direction, Point)> {
    Direction::ALL
        .iter()
        .filter_map(|&dir| {
            let next = maze.resolve(from, dir);
            (next != from).then_some((dir, next))
        })
        .collect()
}

/// Deterministic greedy step: the valid move minimizing Manhattan distance
/// to `player`. Ties go to the first minimum in [`Direction::ALL`] order.
pub fn chase_dir(maze: &Maze, ghost: Point, player: Point) -> Option<Direction> {
    let mut best: Option<(Direction, i32)> = None;
    for (dir, next) in valid_moves(maze, ghost) {
        let dist = next.manhattan(player);
        match best {
            Some((_, b)) if dist >= b => {}
            _ => best = Some((dir, dist)),
        }
    }
    best.map(|(dir, _)| dir)
}

/// Ghost decision for one tick: greedy pursuit with a 30% random override
/// among the valid moves. `None` when the ghost is boxed in.
pub fn next_dir(
    maze: &Maze,
    ghost: Point,
    player: Point,
    rng: &mut RandomNumberGenerator,
) -> Option<Direction> {
    let moves = valid_moves(maze, ghost);
    if moves.is_empty() {
        return None;
    }
    if rng.range(0.0, 1.0) < WANDER_CHANCE {
        let idx = rng.range(0, moves.len() as i32) as usize;
        return Some(moves[idx].0);
    }
    chase_dir(maze, ghost, player)
}
