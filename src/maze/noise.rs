use grid_util::point::Point;
use itertools::iproduct;
use rand::Rng;

/// Chance of any single cell becoming a wall.
pub const NOISE_DENSITY: f64 = 0.3;

/// Scatters walls independently over the whole grid.
pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Vec<Point> {
    iproduct!(0..height, 0..width)
        .filter(|_| rng.gen_bool(NOISE_DENSITY))
        .map(|(y, x)| Point::new(x as i32, y as i32))
        .collect()
}
