use crate::algorithm::astar::{best_first_search, SearchPolicy};
use crate::algorithm::{SearchCallbacks, SearchOptions};
use crate::grid::Grid;
use crate::node::Node;
use crate::Result;
use grid_util::point::Point;

/// Greedy best-first search: the open set is ordered by the heuristic estimate alone. Usually
/// fast, but the returned path need not be shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl SearchPolicy for GreedyPolicy {
    fn estimate(&self, options: &SearchOptions, node: &Node, target: &Node) -> f64 {
        options.estimate(node, target)
    }

    fn priority(&self, _: f64, h: f64) -> f64 {
        h
    }
}

pub fn best_first(
    grid: &mut Grid,
    callbacks: &mut dyn SearchCallbacks,
    options: &SearchOptions,
) -> Result<Vec<Point>> {
    best_first_search(&GreedyPolicy, grid, callbacks, options)
}
