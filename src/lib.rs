//! # grid_visualizer
//!
//! The engine behind an interactive grid pathfinding visualizer. A [Grid] owns the cells, the
//! start and target markers and the adjacency rules; an [Algorithm] from the registry searches
//! it and reports every cell it opens and closes, which the grid collects into an ordered
//! operation log next to the final path. [Maze] generators lay out walls (or clear them).
//!
//! Searches run synchronously to completion. Animating the log is left to the caller, which
//! can also follow every structural change of the grid through [Grid::subscribe].
//!
//! ```
//! use grid_visualizer::{Algorithm, Grid, SearchOptions};
//!
//! let mut grid = Grid::new(5, 5, 20).unwrap();
//! let result = grid.find_path(Algorithm::AStar, &SearchOptions::default()).unwrap();
//! assert_eq!(result.path.len(), 3);
//! ```
pub mod algorithm;
mod error;
pub mod grid;
pub mod heap;
pub mod heuristics;
pub mod maze;
pub mod node;

use itertools::Itertools;
use std::f64::consts::SQRT_2;

pub use crate::algorithm::{
    Algorithm, Operation, OperationLog, OperationStatus, SearchCallbacks, SearchOptions,
    SearchResult,
};
pub use crate::error::{Error, Result};
pub use crate::grid::Grid;
pub use crate::heuristics::Heuristic;
pub use crate::maze::{Maze, MazeOutcome};
pub use crate::node::{Node, NodeChanges, NodeId, NodeStatus, NodeType};
pub use grid_util::point::Point;

/// Whether a diagonal move may pass between two blocked orthogonal cells.
pub const ALLOW_CORNER_CUTTING: bool = false;
/// Cost of a straight (up, right, down, left) move.
pub const CARDINAL_COST: f64 = 1.0;
/// Cost of a diagonal move.
pub const DIAGONAL_COST: f64 = SQRT_2;
const N_SMALLVEC_SIZE: usize = 8;

/// Cost of a single move by the given offset.
pub fn move_cost(dx: i32, dy: i32) -> f64 {
    if dx == 0 || dy == 0 {
        CARDINAL_COST
    } else {
        DIAGONAL_COST
    }
}

/// Sums the move costs along a path. Empty and single-point paths cost nothing.
pub fn path_cost(path: &[Point]) -> f64 {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| move_cost(b.x - a.x, b.y - a.y))
        .sum()
}
