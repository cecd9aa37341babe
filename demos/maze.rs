use grid_visualizer::{Algorithm, Grid, Maze, SearchOptions};
use rand::{rngs::StdRng, SeedableRng};
use std::env;

/// Usage: `cargo run --example maze -- [maze id] [algorithm id] [seed]`
fn main() -> grid_visualizer::Result<()> {
    env_logger::init();
    let mut args = env::args().skip(1);
    let maze: Maze = args.next().as_deref().unwrap_or("backtracker").parse()?;
    let algorithm: Algorithm = args.next().as_deref().unwrap_or("astar").parse()?;
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);

    let mut grid = Grid::new(41, 21, 20)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let outcome = grid.generate_maze(maze, &mut rng)?;
    let result = grid.find_path(algorithm, &SearchOptions::default())?;
    println!("{} ({:?}) solved by {}", maze.name(), outcome, algorithm.name());
    if result.found() {
        println!("path of cost {} after closing {} cells", result.cost(), result.closed().count());
    } else {
        println!("no route after closing {} cells", result.closed().count());
    }
    print!("{}", grid);
    Ok(())
}
