//! Wall layouts for the grid. Every generator is a pure function of the grid dimensions and a
//! random number generator; [Grid::generate_maze](crate::Grid::generate_maze) applies the result.
//!
//! The carving generators work on a lattice of rooms at odd coordinates, separated by wall
//! cells at even coordinates, never on the outer edge of the grid. Two rooms are joined by
//! clearing the cell between them.
use crate::Error;
use grid_util::point::Point;
use itertools::iproduct;
use rand::Rng;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod backtracker;
pub mod kruskal;
pub mod noise;
pub mod recursive_division;

/// Registry of the available wall layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Maze {
    /// Produces no layout; applying it clears every wall instead.
    #[default]
    Clear,
    RecursiveDivision,
    Backtracker,
    Kruskal,
    Random,
}

impl Maze {
    pub const ALL: [Maze; 5] = [
        Maze::Clear,
        Maze::RecursiveDivision,
        Maze::Backtracker,
        Maze::Kruskal,
        Maze::Random,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Maze::Clear => "none",
            Maze::RecursiveDivision => "recursive-division",
            Maze::Backtracker => "backtracker",
            Maze::Kruskal => "kruskal",
            Maze::Random => "random",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Maze::Clear => "No Maze",
            Maze::RecursiveDivision => "Recursive Division",
            Maze::Backtracker => "Randomized Depth-First Backtracker",
            Maze::Kruskal => "Randomized Kruskal",
            Maze::Random => "Random Walls",
        }
    }

    /// Wall coordinates for a `width × height` grid, in row-major order and without
    /// duplicates, or `None` for [Maze::Clear]. Markers are not known here and may be covered.
    pub fn generate<R: Rng + ?Sized>(
        self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Option<Vec<Point>> {
        let walls = match self {
            Maze::Clear => return None,
            Maze::Random => noise::generate(width, height, rng),
            // Too small for a single room.
            _ if rooms(width, height).next().is_none() => Vec::new(),
            Maze::RecursiveDivision => recursive_division::generate(width, height, rng),
            Maze::Backtracker => backtracker::generate(width, height, rng),
            Maze::Kruskal => kruskal::generate(width, height, rng),
        };
        Some(walls)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Maze {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Maze::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| Error::UnknownMaze(s.to_owned()))
    }
}

/// What applying a maze did to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MazeOutcome {
    /// Number of cells that were turned into walls.
    Walls(usize),
    /// Number of walls that were cleared.
    Cleared(usize),
}

/// Room cells at odd coordinates, row by row. Rooms never touch the outer edge.
pub(crate) fn rooms(width: usize, height: usize) -> impl Iterator<Item = Point> {
    let (right, bottom) = (width.saturating_sub(1), height.saturating_sub(1));
    iproduct!((1..bottom).step_by(2), (1..right).step_by(2))
        .map(|(y, x)| Point::new(x as i32, y as i32))
}

/// Scratch board the generators draw on.
pub(crate) struct Layout {
    width: usize,
    height: usize,
    walls: Vec<bool>,
}

impl Layout {
    /// A board without walls.
    pub(crate) fn open(width: usize, height: usize) -> Layout {
        Layout {
            width,
            height,
            walls: vec![false; width * height],
        }
    }

    /// A board that is solid wall, to be carved out.
    pub(crate) fn filled(width: usize, height: usize) -> Layout {
        Layout {
            width,
            height,
            walls: vec![true; width * height],
        }
    }

    pub(crate) fn index(&self, p: Point) -> Option<usize> {
        let inside = p.x >= 0
            && p.y >= 0
            && (p.x as usize) < self.width
            && (p.y as usize) < self.height;
        inside.then(|| p.y as usize * self.width + p.x as usize)
    }

    /// Whether `p` lies on the room lattice, see [rooms].
    pub(crate) fn is_room(&self, p: Point) -> bool {
        p.x % 2 == 1
            && p.y % 2 == 1
            && p.x > 0
            && p.y > 0
            && (p.x as usize) + 1 < self.width
            && (p.y as usize) + 1 < self.height
    }

    pub(crate) fn is_wall(&self, p: Point) -> bool {
        self.index(p).is_some_and(|ix| self.walls[ix])
    }

    pub(crate) fn set(&mut self, p: Point, wall: bool) {
        if let Some(ix) = self.index(p) {
            self.walls[ix] = wall;
        }
    }

    pub(crate) fn carve(&mut self, p: Point) {
        self.set(p, false);
    }

    /// Rooms two steps away from `room` in the order up, right, down, left, each paired with
    /// the cell between them.
    pub(crate) fn room_neighbors(&self, room: Point) -> SmallVec<[(Point, Point); 4]> {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .map(|(dx, dy)| {
                (
                    Point::new(room.x + 2 * dx, room.y + 2 * dy),
                    Point::new(room.x + dx, room.y + dy),
                )
            })
            .filter(|(next, _)| self.is_room(*next))
            .collect()
    }

    pub(crate) fn into_walls(self) -> Vec<Point> {
        let width = self.width;
        self.walls
            .into_iter()
            .enumerate()
            .filter(|(_, wall)| *wall)
            .map(|(ix, _)| Point::new((ix % width) as i32, (ix / width) as i32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::node::NodeType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MAZES: [Maze; 4] = [
        Maze::RecursiveDivision,
        Maze::Backtracker,
        Maze::Kruskal,
        Maze::Random,
    ];

    #[test]
    fn registry_round_trips_ids() {
        for maze in Maze::ALL {
            assert_eq!(maze.id().parse::<Maze>(), Ok(maze));
        }
        assert_eq!(
            "prim".parse::<Maze>(),
            Err(Error::UnknownMaze("prim".to_owned()))
        );
    }

    #[test]
    fn clear_has_no_layout() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(Maze::Clear.generate(10, 10, &mut rng), None);
    }

    #[test]
    fn walls_are_inside_and_unique() {
        let mut rng = StdRng::seed_from_u64(1);
        for (w, h) in [(2, 1), (3, 3), (10, 7), (21, 21), (16, 9)] {
            for maze in MAZES {
                let walls = maze.generate(w, h, &mut rng).unwrap();
                let mut sorted = walls.clone();
                sorted.sort_by_key(|p| (p.y, p.x));
                sorted.dedup();
                assert_eq!(sorted, walls, "{} {}x{}", maze, w, h);
                assert!(walls
                    .iter()
                    .all(|p| p.x >= 0 && p.y >= 0 && (p.x as usize) < w && (p.y as usize) < h));
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        for maze in MAZES {
            let a = maze.generate(25, 15, &mut StdRng::seed_from_u64(42));
            let b = maze.generate(25, 15, &mut StdRng::seed_from_u64(42));
            assert_eq!(a, b);
        }
    }

    /// Asserts that the carving generators leave every room reachable from every other room.
    #[test]
    fn carved_rooms_are_connected() {
        let mut rng = StdRng::seed_from_u64(7);
        for maze in [Maze::RecursiveDivision, Maze::Backtracker, Maze::Kruskal] {
            for (w, h) in [(11, 11), (20, 9), (4, 15)] {
                let mut grid = Grid::new(w, h, 10).unwrap();
                grid.generate_maze(maze, &mut rng).unwrap();
                grid.update();
                let first = Point::new(1, 1);
                for room in rooms(w, h) {
                    assert!(grid.reachable(&first, &room), "{} {}x{} {}", maze, w, h, room);
                }
            }
        }
    }

    /// Asserts that carved mazes never wall in a marker, whatever cells the markers land on.
    #[test]
    fn carved_mazes_connect_the_markers() {
        for maze in [Maze::RecursiveDivision, Maze::Backtracker, Maze::Kruskal] {
            for (w, h) in [(41, 21), (40, 20), (17, 9), (3, 3)] {
                for seed in 0..100 {
                    let mut grid = Grid::new(w, h, 10).unwrap();
                    grid.generate_maze(maze, &mut StdRng::seed_from_u64(seed))
                        .unwrap();
                    grid.update();
                    let start = grid.start_node().point();
                    let target = grid.target_node().point();
                    assert!(
                        grid.reachable(&start, &target),
                        "{} {}x{} seed {}\n{}",
                        maze,
                        w,
                        h,
                        seed,
                        grid
                    );
                }
            }
        }
    }

    #[test]
    fn applied_walls_spare_markers() {
        let mut rng = StdRng::seed_from_u64(3);
        for maze in MAZES {
            let mut grid = Grid::new(30, 20, 10).unwrap();
            grid.generate_maze(maze, &mut rng).unwrap();
            assert_eq!(grid.start_node().node_type, NodeType::Start);
            assert_eq!(grid.target_node().node_type, NodeType::Target);
        }
    }

    #[test]
    fn clearing_restores_every_wall() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid = Grid::new(15, 11, 10).unwrap();
        let fresh = grid.nodes().to_vec();
        let outcome = grid.generate_maze(Maze::Kruskal, &mut rng).unwrap();
        let MazeOutcome::Walls(placed) = outcome else {
            panic!("expected walls, got {:?}", outcome);
        };
        assert!(placed > 0);

        assert_eq!(
            grid.generate_maze_by_id("none", &mut rng),
            Ok(MazeOutcome::Cleared(placed))
        );
        assert_eq!(grid.nodes(), &fresh[..]);
    }
}
