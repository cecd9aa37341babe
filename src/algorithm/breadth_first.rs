use crate::algorithm::{backtrace, OperationBudget, SearchCallbacks, SearchOptions};
use crate::grid::Grid;
use crate::node::NodeStatus;
use crate::{move_cost, Result};
use grid_util::point::Point;
use log::info;
use std::collections::VecDeque;

/// Breadth-first search with a FIFO frontier. Every move counts as one step, so paths are
/// shortest in steps; with diagonal moves enabled they need not be shortest in cost. The
/// heuristic options are ignored.
pub fn breadth_first(
    grid: &mut Grid,
    callbacks: &mut dyn SearchCallbacks,
    options: &SearchOptions,
) -> Result<Vec<Point>> {
    let start = grid.start();
    let target = grid.target();
    let mut budget = OperationBudget::new(options);
    let mut frontier = VecDeque::new();

    grid.node_mut(start).status = NodeStatus::Opened;
    frontier.push_back(start);
    callbacks.opened(&grid[start]);

    while let Some(id) = frontier.pop_front() {
        budget.spend()?;
        grid.node_mut(id).status = NodeStatus::Closed;
        callbacks.closed(&grid[id]);
        if id == target {
            return Ok(backtrace(grid, target));
        }

        let (x, y, g) = (grid[id].x, grid[id].y, grid[id].g);
        for neighbor in grid.neighbors(id) {
            if grid[neighbor].status != NodeStatus::Unvisited {
                continue;
            }
            let cost = move_cost(grid[neighbor].x - x, grid[neighbor].y - y);
            let node = grid.node_mut(neighbor);
            node.g = g + cost;
            node.f = node.g;
            node.parent = Some(id);
            node.status = NodeStatus::Opened;
            frontier.push_back(neighbor);
            callbacks.opened(&grid[neighbor]);
        }
    }
    info!("Frontier exhausted without reaching the target");
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{NoOpCallbacks, OperationLog, OperationStatus};
    use crate::node::NodeType;

    /// Closed cells come out in rings of increasing distance from the start.
    #[test]
    fn closes_in_distance_order() {
        let mut grid = Grid::new(9, 9, 10).unwrap();
        let start = grid.start_node().point();
        let mut log = OperationLog::new();
        breadth_first(&mut grid, &mut log, &SearchOptions::default()).unwrap();
        let distances = log
            .into_operations()
            .into_iter()
            .filter(|op| op.status == OperationStatus::Closed)
            .map(|op| (op.x - start.x).abs() + (op.y - start.y).abs())
            .collect::<Vec<_>>();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn shortest_in_steps() {
        let mut grid = Grid::new(5, 5, 10).unwrap();
        grid.paint(2, 2, NodeType::Wall).unwrap();
        let path = breadth_first(&mut grid, &mut NoOpCallbacks, &SearchOptions::default())
            .unwrap();
        assert_eq!(path.len(), 5);
    }
}
