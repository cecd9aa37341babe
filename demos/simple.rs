use grid_visualizer::{Algorithm, Grid, NodeType, SearchOptions};

fn main() -> grid_visualizer::Result<()> {
    env_logger::init();
    let mut grid = Grid::new(12, 7, 20)?;
    for y in 1..6 {
        grid.paint(6, y, NodeType::Wall)?;
    }
    for algorithm in Algorithm::ALL {
        let result = grid.find_path(algorithm, &SearchOptions::default())?;
        println!(
            "{}: {} operations, path cost {}",
            algorithm.name(),
            result.operations.len(),
            result.cost()
        );
        println!("{}", grid);
    }
    Ok(())
}
