use crate::algorithm::{backtrace, OperationBudget, SearchCallbacks, SearchOptions};
use crate::grid::Grid;
use crate::heap::{Heap, HeapItem};
use crate::node::{Node, NodeId, NodeStatus};
use crate::{move_cost, Result};
use grid_util::point::Point;
use log::info;

/// What separates A* from its relatives: how a cell's estimate is computed and how the open
/// set is ordered. Everything else about the search is shared.
pub trait SearchPolicy {
    /// Estimated remaining cost from `node` to `target`. Computed at most once per cell and run.
    fn estimate(&self, options: &SearchOptions, node: &Node, target: &Node) -> f64;

    /// Key the open set is ordered by, smallest first.
    fn priority(&self, g: f64, h: f64) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AstarPolicy;

impl SearchPolicy for AstarPolicy {
    fn estimate(&self, options: &SearchOptions, node: &Node, target: &Node) -> f64 {
        options.estimate(node, target)
    }

    fn priority(&self, g: f64, h: f64) -> f64 {
        g + h
    }
}

#[derive(Clone, Copy, Debug)]
struct OpenNode {
    id: NodeId,
    f: f64,
}

impl HeapItem for OpenNode {
    type Key = NodeId;

    fn key(&self) -> NodeId {
        self.id
    }
}

/// A* from the grid's start to its target, ordered by `f = g + weight * heuristic`.
pub fn astar(
    grid: &mut Grid,
    callbacks: &mut dyn SearchCallbacks,
    options: &SearchOptions,
) -> Result<Vec<Point>> {
    best_first_search(&AstarPolicy, grid, callbacks, options)
}

/// Shared search loop over the three cell states unvisited, opened and closed. Ends when the
/// target is closed, or with an empty path once the open set runs dry.
///
/// A cell that is reached again at a lower cost is re-sorted in place with
/// [Heap::update_item]; the open set never holds a cell twice.
pub fn best_first_search<P: SearchPolicy>(
    policy: &P,
    grid: &mut Grid,
    callbacks: &mut dyn SearchCallbacks,
    options: &SearchOptions,
) -> Result<Vec<Point>> {
    let start = grid.start();
    let target = grid.target();
    let mut budget = OperationBudget::new(options);
    let mut open = Heap::with_capacity(grid.nodes().len(), |a: &OpenNode, b: &OpenNode| {
        a.f.total_cmp(&b.f)
    });

    {
        let node = grid.node_mut(start);
        node.g = 0.0;
        node.f = 0.0;
        node.status = NodeStatus::Opened;
    }
    open.push(OpenNode { id: start, f: 0.0 })?;
    callbacks.opened(&grid[start]);

    while let Some(OpenNode { id, .. }) = open.pop() {
        budget.spend()?;
        grid.node_mut(id).status = NodeStatus::Closed;
        callbacks.closed(&grid[id]);
        if id == target {
            return Ok(backtrace(grid, target));
        }

        let (x, y, g) = (grid[id].x, grid[id].y, grid[id].g);
        for neighbor in grid.neighbors(id) {
            let (status, neighbor_g) = (grid[neighbor].status, grid[neighbor].g);
            if status == NodeStatus::Closed {
                continue;
            }
            let tentative_g = g + move_cost(grid[neighbor].x - x, grid[neighbor].y - y);
            if status == NodeStatus::Opened && tentative_g >= neighbor_g {
                continue;
            }

            let h = match grid[neighbor].h {
                Some(h) => h,
                None => policy.estimate(options, &grid[neighbor], &grid[target]),
            };
            let node = grid.node_mut(neighbor);
            node.g = tentative_g;
            node.h = Some(h);
            node.f = policy.priority(tentative_g, h);
            node.parent = Some(id);
            let entry = OpenNode {
                id: neighbor,
                f: node.f,
            };
            if status == NodeStatus::Opened {
                open.update_item(entry)?;
            } else {
                node.status = NodeStatus::Opened;
                open.push(entry)?;
                callbacks.opened(&grid[neighbor]);
            }
        }
    }
    info!("Open set exhausted without reaching the target");
    Ok(Vec::new())
}
