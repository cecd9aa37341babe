use crate::algorithm::astar::{best_first_search, SearchPolicy};
use crate::algorithm::{SearchCallbacks, SearchOptions};
use crate::grid::Grid;
use crate::node::Node;
use crate::Result;
use grid_util::point::Point;

/// Uniform-cost search: the open set is ordered by cost so far alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraPolicy;

impl SearchPolicy for DijkstraPolicy {
    fn estimate(&self, _: &SearchOptions, _: &Node, _: &Node) -> f64 {
        0.0
    }

    fn priority(&self, g: f64, _: f64) -> f64 {
        g
    }
}

pub fn dijkstra(
    grid: &mut Grid,
    callbacks: &mut dyn SearchCallbacks,
    options: &SearchOptions,
) -> Result<Vec<Point>> {
    best_first_search(&DijkstraPolicy, grid, callbacks, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::astar::astar;
    use crate::algorithm::{OperationLog, OperationStatus};
    use crate::path_cost;

    fn closed_count(log: OperationLog) -> usize {
        log.into_operations()
            .into_iter()
            .filter(|op| op.status == OperationStatus::Closed)
            .count()
    }

    /// Without a heuristic the search floods outwards and closes more cells than A*, but the
    /// path it finds is just as short.
    #[test]
    fn explores_more_than_astar() {
        let options = SearchOptions::default();
        let mut grid = Grid::new(12, 9, 10).unwrap();
        let mut dijkstra_log = OperationLog::new();
        let dijkstra_path = dijkstra(&mut grid, &mut dijkstra_log, &options).unwrap();

        let mut grid = Grid::new(12, 9, 10).unwrap();
        let mut astar_log = OperationLog::new();
        let astar_path = astar(&mut grid, &mut astar_log, &options).unwrap();

        assert_eq!(path_cost(&dijkstra_path), path_cost(&astar_path));
        assert!(closed_count(dijkstra_log) > closed_count(astar_log));
    }

    #[test]
    fn ignores_heuristic_weight() {
        let mut grid = Grid::new(12, 9, 10).unwrap();
        let options = SearchOptions {
            weight: 5.0,
            ..SearchOptions::default()
        };
        dijkstra(&mut grid, &mut OperationLog::new(), &options).unwrap();
        assert!(grid.nodes().iter().all(|n| n.h.unwrap_or(0.0) == 0.0));
    }
}
