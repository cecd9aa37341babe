use crate::grid::Grid;
use crate::heuristics::Heuristic;
use crate::node::{Node, NodeId};
use crate::{path_cost, Error, Result};
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod astar;
pub mod best_first;
pub mod breadth_first;
pub mod dijkstra;

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Signature shared by every registered search. The search reads the start and target from the
/// grid, reports progress through `callbacks` and returns the path, empty if there is none.
pub type SearchFn = fn(&mut Grid, &mut dyn SearchCallbacks, &SearchOptions) -> Result<Vec<Point>>;

/// Hooks through which a running search reports its exploration order.
pub trait SearchCallbacks {
    /// A cell entered the frontier.
    fn opened(&mut self, _node: &Node) {}
    /// A cell left the frontier with its final cost.
    fn closed(&mut self, _node: &Node) {}
}

pub struct NoOpCallbacks;
impl SearchCallbacks for NoOpCallbacks {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OperationStatus {
    Opened,
    Closed,
}

/// One step of a search, as replayed by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operation {
    pub x: i32,
    pub y: i32,
    pub status: OperationStatus,
}

/// Collects [Operation]s in the order they are reported. A repeated `(x, y, status)` record is
/// dropped, so a cell appears at most once as opened and at most once as closed.
#[derive(Clone, Debug, Default)]
pub struct OperationLog {
    operations: FxIndexSet<Operation>,
}

impl OperationLog {
    pub fn new() -> OperationLog {
        OperationLog::default()
    }

    fn record(&mut self, node: &Node, status: OperationStatus) {
        self.operations.insert(Operation {
            x: node.x,
            y: node.y,
            status,
        });
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations.into_iter().collect()
    }
}

impl SearchCallbacks for OperationLog {
    fn opened(&mut self, node: &Node) {
        self.record(node, OperationStatus::Opened);
    }

    fn closed(&mut self, node: &Node) {
        self.record(node, OperationStatus::Closed);
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOptions {
    pub heuristic: Heuristic,
    /// Scales the heuristic. Values above 1 trade optimality for fewer expanded cells
    /// (weighted A*).
    pub weight: f64,
    /// Stops the search with [Error::OperationLimit] once this many cells have been closed.
    pub max_operations: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> SearchOptions {
        SearchOptions {
            heuristic: Heuristic::Manhattan,
            weight: 1.0,
            max_operations: None,
        }
    }
}

impl SearchOptions {
    /// Weighted heuristic estimate between two cells.
    pub fn estimate(&self, from: &Node, to: &Node) -> f64 {
        let dx = (from.x - to.x).abs() as f64;
        let dy = (from.y - to.y).abs() as f64;
        self.weight * self.heuristic.distance(dx, dy)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub path: Vec<Point>,
    pub operations: Vec<Operation>,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn cost(&self) -> f64 {
        path_cost(&self.path)
    }

    /// Coordinates in the order they were closed.
    pub fn closed(&self) -> impl Iterator<Item = Point> + '_ {
        self.operations
            .iter()
            .filter(|op| op.status == OperationStatus::Closed)
            .map(|op| Point::new(op.x, op.y))
    }
}

/// Counts closed cells against [SearchOptions::max_operations].
pub(crate) struct OperationBudget {
    limit: Option<usize>,
    spent: usize,
}

impl OperationBudget {
    pub(crate) fn new(options: &SearchOptions) -> OperationBudget {
        OperationBudget {
            limit: options.max_operations,
            spent: 0,
        }
    }

    pub(crate) fn spend(&mut self) -> Result<()> {
        match self.limit {
            Some(limit) if self.spent >= limit => Err(Error::OperationLimit { limit }),
            _ => {
                self.spent += 1;
                Ok(())
            }
        }
    }
}

/// Follows the parent links from `target` back to the start and returns the path from the
/// start to `target`.
pub(crate) fn backtrace(grid: &Grid, target: NodeId) -> Vec<Point> {
    let mut path = std::iter::successors(Some(target), |&id| grid[id].parent)
        .map(|id| grid[id].point())
        .collect::<Vec<Point>>();
    path.reverse();
    path
}

/// Registry of the available searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
    BestFirst,
    BreadthFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::BestFirst,
        Algorithm::BreadthFirst,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Algorithm::AStar => "astar",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::BestFirst => "best-first",
            Algorithm::BreadthFirst => "breadth-first",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::AStar => "A* Search",
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::BestFirst => "Greedy Best-First Search",
            Algorithm::BreadthFirst => "Breadth-First Search",
        }
    }

    /// Whether the returned paths are guaranteed to be cheapest, given an admissible heuristic
    /// and a weight of 1. Breadth-first counts steps, which only matches the cost when every
    /// move costs the same.
    pub fn is_optimal(self, allow_diagonal_move: bool) -> bool {
        match self {
            Algorithm::AStar | Algorithm::Dijkstra => true,
            Algorithm::BreadthFirst => !allow_diagonal_move,
            Algorithm::BestFirst => false,
        }
    }

    pub fn search_fn(self) -> SearchFn {
        match self {
            Algorithm::AStar => astar::astar,
            Algorithm::Dijkstra => dijkstra::dijkstra,
            Algorithm::BestFirst => best_first::best_first,
            Algorithm::BreadthFirst => breadth_first::breadth_first,
        }
    }

    pub fn run(
        self,
        grid: &mut Grid,
        callbacks: &mut dyn SearchCallbacks,
        options: &SearchOptions,
    ) -> Result<Vec<Point>> {
        (self.search_fn())(grid, callbacks, options)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_owned()))
    }
}
