use criterion::{criterion_group, criterion_main, Criterion};
use grid_visualizer::{Algorithm, Grid, Maze, SearchOptions};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

const W: usize = 96;
const H: usize = 64;

fn maze_grid(maze: Maze, diagonal: bool) -> Grid {
    let mut grid = Grid::new(W, H, 10).unwrap();
    grid.allow_diagonal_move = diagonal;
    grid.generate_maze(maze, &mut StdRng::seed_from_u64(0))
        .unwrap();
    grid
}

fn search_bench<const ALLOW_DIAGONAL: bool>(c: &mut Criterion) {
    let diag_str = if ALLOW_DIAGONAL { "8-grid" } else { "4-grid" };
    for maze in [Maze::Clear, Maze::Random, Maze::Backtracker, Maze::RecursiveDivision] {
        let mut grid = maze_grid(maze, ALLOW_DIAGONAL);
        let options = SearchOptions::default();
        for algorithm in Algorithm::ALL {
            c.bench_function(format!("{maze}, {algorithm} {diag_str}").as_str(), |b| {
                b.iter(|| black_box(grid.find_path(algorithm, &options).unwrap()))
            });
        }
    }
}

fn maze_bench(c: &mut Criterion) {
    for maze in Maze::ALL.into_iter().filter(|m| *m != Maze::Clear) {
        let mut rng = StdRng::seed_from_u64(0);
        c.bench_function(format!("generate {maze}").as_str(), |b| {
            b.iter(|| black_box(maze.generate(W, H, &mut rng)))
        });
    }
}

criterion_group!(
    benches,
    search_bench<false>,
    search_bench<true>,
    maze_bench
);
criterion_main!(benches);
