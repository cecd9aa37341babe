//! End-to-end runs through the string-keyed entry points a settings form would use.
use grid_visualizer::{
    Algorithm, Error, Grid, Maze, MazeOutcome, NodeChanges, NodeStatus, NodeType, Operation,
    OperationStatus, Point, SearchOptions,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

fn points(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

/// Asserts the plain A* trace on an empty 5x5 grid, start (1,2) and target (3,2).
#[test]
fn straight_run() {
    let mut grid = Grid::new(5, 5, 20).unwrap();
    let result = grid
        .find_path_by_id("astar", &SearchOptions::default())
        .unwrap();
    assert_eq!(result.path, points(&[(1, 2), (2, 2), (3, 2)]));
    assert_eq!(result.cost(), 2.0);
    assert_eq!(
        result.closed().collect::<Vec<_>>(),
        points(&[(1, 2), (2, 2), (3, 2)])
    );
    assert_eq!(
        result.operations.first(),
        Some(&Operation {
            x: 1,
            y: 2,
            status: OperationStatus::Opened
        })
    );
    print!("{}", grid);
}

/// Asserts that walling the middle cell makes A* detour through a neighbouring row.
#[test]
fn detour_run() {
    //  _____
    // |.....|
    // |.***.|
    // |.S#T.|
    // |.....|
    // |.....|
    //  _____
    let mut grid = Grid::new(5, 5, 20).unwrap();
    grid.update_node(2, 2, NodeChanges::new().node_type(NodeType::Wall))
        .unwrap();
    let result = grid
        .find_path_by_id("astar", &SearchOptions::default())
        .unwrap();
    assert_eq!(result.path.len(), 5);
    assert_eq!(result.cost(), 4.0);
    let row = result.path[1].y;
    assert!(row == 1 || row == 3);
    assert!(result.path[1..4].iter().all(|p| p.y == row));
}

#[test]
fn repeated_runs_give_the_same_result() {
    let mut grid = Grid::new(16, 12, 20).unwrap();
    grid.generate_maze_by_id("backtracker", &mut StdRng::seed_from_u64(8))
        .unwrap();
    for algorithm in Algorithm::ALL {
        let first = grid.find_path(algorithm, &SearchOptions::default()).unwrap();
        let second = grid.find_path(algorithm, &SearchOptions::default()).unwrap();
        assert_eq!(first, second, "{}", algorithm);
    }
}

#[test]
fn maze_then_none_restores_the_board() {
    let mut rng = StdRng::seed_from_u64(21);
    for maze in Maze::ALL.into_iter().filter(|m| *m != Maze::Clear) {
        let mut grid = Grid::new(24, 14, 20).unwrap();
        let start = grid.start_node().clone();
        let target = grid.target_node().clone();
        grid.generate_maze(maze, &mut rng).unwrap();
        grid.find_path_by_id("dijkstra", &SearchOptions::default())
            .unwrap();

        let outcome = grid.generate_maze_by_id("none", &mut rng).unwrap();
        assert!(matches!(outcome, MazeOutcome::Cleared(_)));
        assert!(grid.nodes().iter().all(|n| n.node_type != NodeType::Wall));
        assert!(grid.nodes().iter().all(|n| n.status == NodeStatus::Unvisited));
        assert_eq!(grid.start_node(), &start);
        assert_eq!(grid.target_node(), &target);
    }
}

#[test]
fn unknown_ids_are_rejected() {
    let mut grid = Grid::new(5, 5, 20).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        grid.find_path_by_id("dfs", &SearchOptions::default()),
        Err(Error::UnknownAlgorithm("dfs".to_owned()))
    );
    assert_eq!(
        grid.generate_maze_by_id("spiral", &mut rng),
        Err(Error::UnknownMaze("spiral".to_owned()))
    );
}

/// Asserts that a renderer following the observer stream sees the path cells flagged.
#[test]
fn observers_follow_a_search() {
    let mut grid = Grid::new(7, 5, 20).unwrap();
    let flagged = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&flagged);
    grid.subscribe(move |node| {
        if node.is_path {
            sink.borrow_mut().push(node.point());
        }
    });
    let result = grid
        .find_path(Algorithm::BreadthFirst, &SearchOptions::default())
        .unwrap();
    assert_eq!(*flagged.borrow(), result.path);
}

#[test]
fn weighted_astar_still_reaches_the_target() {
    let mut grid = Grid::new(30, 20, 20).unwrap();
    grid.generate_maze(Maze::RecursiveDivision, &mut StdRng::seed_from_u64(5))
        .unwrap();
    let start = grid.start_node().point();
    let target = grid.target_node().point();
    grid.update();
    let reachable = grid.reachable(&start, &target);
    let options = SearchOptions {
        weight: 3.0,
        ..SearchOptions::default()
    };
    let result = grid.find_path(Algorithm::AStar, &options).unwrap();
    assert_eq!(result.found(), reachable);
}
