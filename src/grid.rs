use crate::algorithm::{Algorithm, OperationLog, SearchOptions, SearchResult};
use crate::maze::{Maze, MazeOutcome};
use crate::node::{Node, NodeChanges, NodeId, NodeStatus, NodeType};
use crate::{Error, Result, ALLOW_CORNER_CUTTING, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::point::Point;
use itertools::iproduct;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;
use std::ops::Index;

type Observer = Box<dyn FnMut(&Node)>;

/// Neighbour offsets in the order searches visit them: up, right, down, left.
const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
/// Diagonal offsets, visited after the cardinal ones when diagonal moves are enabled.
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// [Grid] owns a `width × height` rectangle of [Node]s stored in row-major order, together
/// with the ids of the start and target cells. Besides the cells it maintains connected
/// components in a [UnionFind] structure so callers can tell up front whether the target can be
/// reached.
///
/// Every structural change to a cell is reported to the observers registered with
/// [subscribe](Grid::subscribe), in the order the changes happen.
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cell_size: usize,
    pub allow_diagonal_move: bool,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    nodes: Vec<Node>,
    start: NodeId,
    target: NodeId,
    observers: Vec<Observer>,
}

impl Grid {
    /// Creates a grid and generates its cells, see [generate_nodes](Self::generate_nodes).
    pub fn new(width: usize, height: usize, cell_size: usize) -> Result<Grid> {
        let mut grid = Grid {
            width: 0,
            height: 0,
            cell_size: 0,
            allow_diagonal_move: false,
            components: UnionFind::new(0),
            components_dirty: false,
            nodes: Vec::new(),
            start: 0,
            target: 0,
            observers: Vec::new(),
        };
        grid.generate_nodes(width, height, cell_size)?;
        Ok(grid)
    }

    /// Rebuilds every cell. The start is placed at `(width / 4, height / 2)` and the target at
    /// `(3 * width / 4, height / 2)`; all other cells are empty.
    pub fn generate_nodes(&mut self, width: usize, height: usize, cell_size: usize) -> Result<()> {
        // Narrower grids would put the start and the target on the same cell.
        if width < 2 || height == 0 || cell_size == 0 {
            return Err(Error::InvalidDimensions {
                width,
                height,
                cell_size,
            });
        }
        self.width = width;
        self.height = height;
        self.cell_size = cell_size;

        let start = Point::new((width / 4) as i32, (height / 2) as i32);
        let target = Point::new((3 * width / 4) as i32, (height / 2) as i32);
        self.nodes = iproduct!(0..height as i32, 0..width as i32)
            .enumerate()
            .map(|(id, (y, x))| {
                let p = Point::new(x, y);
                let node_type = if p == start {
                    NodeType::Start
                } else if p == target {
                    NodeType::Target
                } else {
                    NodeType::Default
                };
                Node::new(id, x, y, node_type)
            })
            .collect();
        self.start = self.compute_id(start.x, start.y);
        self.target = self.compute_id(target.x, target.y);
        debug!("Generated {}x{} grid, start {} target {}", width, height, start, target);

        self.generate_components();
        for id in 0..self.nodes.len() {
            self.notify(id);
        }
        Ok(())
    }

    /// Registers an observer that is called with the new state of every cell that changes.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Node) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        for observer in self.observers.iter_mut() {
            observer(node);
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn start_node(&self) -> &Node {
        &self.nodes[self.start]
    }

    pub fn target_node(&self) -> &Node {
        &self.nodes[self.target]
    }

    fn compute_id(&self, x: i32, y: i32) -> NodeId {
        y as usize * self.width + x as usize
    }

    /// Row-major id of `(x, y)`, if it lies inside the grid.
    pub fn id_of(&self, x: i32, y: i32) -> Option<NodeId> {
        self.is_inside(x, y).then(|| self.compute_id(x, y))
    }

    fn require_id(&self, x: i32, y: i32) -> Result<NodeId> {
        self.id_of(x, y).ok_or(Error::OutOfBounds { x, y })
    }

    pub fn node(&self, x: i32, y: i32) -> Option<&Node> {
        self.id_of(x, y).map(|id| &self.nodes[id])
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Looks up the cell under a pixel position, `cell_size` pixels per cell.
    pub fn node_at(&self, px: usize, py: usize) -> Option<&Node> {
        let x = i32::try_from(px / self.cell_size).ok()?;
        let y = i32::try_from(py / self.cell_size).ok()?;
        self.node(x, y)
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.id_of(x, y)
            .is_some_and(|id| self.nodes[id].node_type != NodeType::Wall)
    }

    fn can_move_diagonally(&self, x: i32, y: i32, dx: i32, dy: i32) -> bool {
        if ALLOW_CORNER_CUTTING {
            self.is_walkable(x + dx, y + dy)
        } else {
            self.is_walkable(x + dx, y + dy)
                && self.is_walkable(x + dx, y)
                && self.is_walkable(x, y + dy)
        }
    }

    /// Walkable neighbours of a cell: up, right, down and left, followed by the four diagonals
    /// if [allow_diagonal_move](Self::allow_diagonal_move) is set. Searches rely on this order
    /// for reproducible traces.
    pub fn neighbors(&self, id: NodeId) -> SmallVec<[NodeId; N_SMALLVEC_SIZE]> {
        let (x, y) = (self.nodes[id].x, self.nodes[id].y);
        let mut neighbors = CARDINAL_OFFSETS
            .iter()
            .filter(|(dx, dy)| self.is_walkable(x + dx, y + dy))
            .map(|(dx, dy)| self.compute_id(x + dx, y + dy))
            .collect::<SmallVec<[NodeId; N_SMALLVEC_SIZE]>>();
        if self.allow_diagonal_move {
            neighbors.extend(
                DIAGONAL_OFFSETS
                    .iter()
                    .filter(|(dx, dy)| self.can_move_diagonally(x, y, *dx, *dy))
                    .map(|(dx, dy)| self.compute_id(x + dx, y + dy)),
            );
        }
        neighbors
    }

    /// Stores a rebuilt cell, keeps the components in line with its walkability and notifies
    /// the observers.
    fn replace(&mut self, id: NodeId, node: Node) {
        let was_wall = self.nodes[id].node_type == NodeType::Wall;
        let is_wall = node.node_type == NodeType::Wall;
        self.nodes[id] = node;
        if !was_wall && is_wall {
            self.components_dirty = true;
        } else if was_wall && !is_wall {
            for n in self.neighbors(id) {
                self.components.union(id, n);
            }
        }
        self.notify(id);
    }

    /// Merges `changes` into the cell at `(x, y)`.
    pub fn update_node(&mut self, x: i32, y: i32, changes: NodeChanges) -> Result<()> {
        let id = self.require_id(x, y)?;
        let mut node = self.nodes[id].clone();
        changes.apply(&mut node);
        self.replace(id, node);
        Ok(())
    }

    /// Rebuilds the cell at `(x, y)` from its id, coordinates and type plus `keep`. Everything
    /// else, including the search fields, is dropped.
    pub fn reset_node(&mut self, x: i32, y: i32, keep: NodeChanges) -> Result<()> {
        let id = self.require_id(x, y)?;
        let node = self.nodes[id].rebuilt(&keep);
        self.replace(id, node);
        Ok(())
    }

    /// Rebuilds every cell, retaining what `keep` returns for it on top of id, coordinates and
    /// type.
    pub fn reset_nodes<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Node) -> NodeChanges,
    {
        for id in 0..self.nodes.len() {
            let node = self.nodes[id].rebuilt(&keep(&self.nodes[id]));
            self.replace(id, node);
        }
    }

    /// Clears search results (status and path flags) while keeping walls and markers.
    pub fn reset_path(&mut self) {
        self.reset_nodes(|_| NodeChanges::new());
    }

    /// Turns every wall back into an empty cell, keeping search results on screen.
    pub fn reset_walls(&mut self) {
        self.reset_nodes(|node| NodeChanges::keep_visible(node).node_type(without_wall(node)));
    }

    /// Clears walls and search results alike. The markers stay where they are.
    pub fn reset_all(&mut self) {
        self.reset_nodes(|node| NodeChanges::new().node_type(without_wall(node)));
    }

    /// Points the start marker at `(x, y)` and marks that cell. The previous start cell is left
    /// untouched; use [move_start](Self::move_start) to relocate the marker in one step.
    pub fn set_start_node(&mut self, x: i32, y: i32) -> Result<()> {
        let id = self.require_id(x, y)?;
        if id == self.target {
            return Err(Error::MarkerCollision { x, y });
        }
        self.start = id;
        self.update_node(x, y, NodeChanges::new().node_type(NodeType::Start))
    }

    /// Points the target marker at `(x, y)` and marks that cell. The previous target cell is
    /// left untouched; use [move_target](Self::move_target) to relocate the marker in one step.
    pub fn set_target_node(&mut self, x: i32, y: i32) -> Result<()> {
        let id = self.require_id(x, y)?;
        if id == self.start {
            return Err(Error::MarkerCollision { x, y });
        }
        self.target = id;
        self.update_node(x, y, NodeChanges::new().node_type(NodeType::Target))
    }

    /// Moves the start marker, clearing the cell it used to occupy.
    pub fn move_start(&mut self, x: i32, y: i32) -> Result<()> {
        let id = self.require_id(x, y)?;
        if id == self.start {
            return Ok(());
        }
        if id == self.target {
            return Err(Error::MarkerCollision { x, y });
        }
        let old = self.start_node().point();
        self.update_node(old.x, old.y, NodeChanges::new().node_type(NodeType::Default))?;
        self.set_start_node(x, y)
    }

    /// Moves the target marker, clearing the cell it used to occupy.
    pub fn move_target(&mut self, x: i32, y: i32) -> Result<()> {
        let id = self.require_id(x, y)?;
        if id == self.target {
            return Ok(());
        }
        if id == self.start {
            return Err(Error::MarkerCollision { x, y });
        }
        let old = self.target_node().point();
        self.update_node(old.x, old.y, NodeChanges::new().node_type(NodeType::Default))?;
        self.set_target_node(x, y)
    }

    /// Applies a paint command. Walls and empty cells never overwrite a marker; painting a
    /// marker moves it. Returns whether the grid changed.
    pub fn paint(&mut self, x: i32, y: i32, node_type: NodeType) -> Result<bool> {
        let id = self.require_id(x, y)?;
        let current = self.nodes[id].node_type;
        if current == node_type {
            return Ok(false);
        }
        match node_type {
            NodeType::Start => self.move_start(x, y)?,
            NodeType::Target => self.move_target(x, y)?,
            NodeType::Wall | NodeType::Default => {
                if current.is_marker() {
                    return Ok(false);
                }
                self.update_node(x, y, NodeChanges::new().node_type(node_type))?;
            }
        }
        Ok(true)
    }

    /// Resets the search fields of every cell before a new run. Only cells whose visible state
    /// changes are reported to the observers.
    fn clear_search_state(&mut self) {
        for id in 0..self.nodes.len() {
            let node = &mut self.nodes[id];
            let visible = node.status != NodeStatus::Unvisited || node.is_path;
            node.clear_search();
            if visible {
                self.notify(id);
            }
        }
    }

    /// Runs `algorithm` from the start to the target cell and returns the path together with the
    /// deduplicated log of opened and closed cells. An unreachable target yields an empty path.
    /// Cells on the found path get their `is_path` flag set.
    pub fn find_path(
        &mut self,
        algorithm: Algorithm,
        options: &SearchOptions,
    ) -> Result<SearchResult> {
        self.clear_search_state();
        self.update();
        let start = self.start_node().point();
        let target = self.target_node().point();
        if self.reachable(&start, &target) {
            info!("{} is reachable from {}, computing path with {}", target, start, algorithm);
        } else {
            info!("{} is not reachable from {}, exploring with {}", target, start, algorithm);
        }

        let mut log = OperationLog::new();
        let path = algorithm.run(self, &mut log, options)?;
        for p in &path {
            self.update_node(p.x, p.y, NodeChanges::new().is_path(true))?;
        }
        Ok(SearchResult {
            path,
            operations: log.into_operations(),
        })
    }

    /// [find_path](Self::find_path) with the algorithm looked up by its registry id.
    pub fn find_path_by_id(&mut self, id: &str, options: &SearchOptions) -> Result<SearchResult> {
        let algorithm: Algorithm = id.parse()?;
        self.find_path(algorithm, options)
    }

    /// Replaces the board with the walls produced by `maze`. Existing walls and search results
    /// are cleared first, so a maze that produces no layout only clears. Cells holding a marker
    /// are never walled, and a marker the layout would enclose gets one neighbour opened towards
    /// the rest of the maze.
    pub fn generate_maze<R: Rng + ?Sized>(&mut self, maze: Maze, rng: &mut R) -> Result<MazeOutcome> {
        let cleared = self.wall_count();
        self.reset_all();
        let Some(walls) = maze.generate(self.width, self.height, rng) else {
            debug!("Maze {} cleared {} walls", maze, cleared);
            return Ok(MazeOutcome::Cleared(cleared));
        };

        for p in walls {
            let id = self.require_id(p.x, p.y)?;
            if self.nodes[id].node_type.is_marker() {
                continue;
            }
            self.update_node(p.x, p.y, NodeChanges::new().node_type(NodeType::Wall))?;
        }
        for id in [self.start, self.target] {
            self.open_exit(id)?;
        }
        let placed = self.wall_count();
        debug!("Maze {} placed {} walls", maze, placed);
        Ok(MazeOutcome::Walls(placed))
    }

    fn wall_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.node_type == NodeType::Wall)
            .count()
    }

    /// Opens the first cardinal neighbour of an enclosed cell that leads on to another walkable
    /// cell. Cells that already have a walkable cardinal neighbour are left alone.
    fn open_exit(&mut self, id: NodeId) -> Result<()> {
        let (x, y) = (self.nodes[id].x, self.nodes[id].y);
        let enclosed = CARDINAL_OFFSETS
            .iter()
            .all(|(dx, dy)| !self.is_walkable(x + dx, y + dy));
        if !enclosed {
            return Ok(());
        }
        let exit = CARDINAL_OFFSETS
            .iter()
            .map(|(dx, dy)| (x + dx, y + dy))
            .filter(|&(nx, ny)| self.is_inside(nx, ny))
            .find(|&(nx, ny)| {
                CARDINAL_OFFSETS.iter().any(|(ex, ey)| {
                    (nx + ex, ny + ey) != (x, y) && self.is_walkable(nx + ex, ny + ey)
                })
            });
        if let Some((nx, ny)) = exit {
            debug!("Opened ({}, {}) next to enclosed marker ({}, {})", nx, ny, x, y);
            self.update_node(nx, ny, NodeChanges::new().node_type(NodeType::Default))?;
        }
        Ok(())
    }

    /// [generate_maze](Self::generate_maze) with the maze looked up by its registry id.
    pub fn generate_maze_by_id<R: Rng + ?Sized>(
        &mut self,
        id: &str,
        rng: &mut R,
    ) -> Result<MazeOutcome> {
        let maze: Maze = id.parse()?;
        self.generate_maze(maze, rng)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.id_of(point.x, point.y)
            .map(|id| self.components.find(id))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.id_of(start.x, start.y), self.id_of(goal.x, goal.y)) {
            (Some(start_ix), Some(goal_ix)) => self.components.equiv(start_ix, goal_ix),
            _ => false,
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.nodes.len());
        self.components_dirty = false;
        for id in 0..self.nodes.len() {
            if self.nodes[id].node_type == NodeType::Wall {
                continue;
            }
            for n in self.neighbors(id) {
                self.components.union(id, n);
            }
        }
    }
}

fn without_wall(node: &Node) -> NodeType {
    if node.node_type == NodeType::Wall {
        NodeType::Default
    } else {
        node.node_type
    }
}

impl Index<NodeId> for Grid {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cell_size", &self.cell_size)
            .field("allow_diagonal_move", &self.allow_diagonal_move)
            .field("start", &self.start)
            .field("target", &self.target)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.nodes.chunks(self.width) {
            let line = row
                .iter()
                .map(|node| match node.node_type {
                    NodeType::Start => 'S',
                    NodeType::Target => 'T',
                    NodeType::Wall => '#',
                    NodeType::Default if node.is_path => '*',
                    NodeType::Default => match node.status {
                        NodeStatus::Closed => 'x',
                        NodeStatus::Opened => 'o',
                        NodeStatus::Unvisited => '.',
                    },
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
