use crate::maze::{rooms, Layout};
use grid_util::point::Point;
use rand::seq::SliceRandom;
use rand::Rng;

/// Randomized depth-first search over the room lattice. Walks to a random unvisited neighbour
/// room while there is one and backtracks otherwise, giving long winding corridors.
pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Vec<Point> {
    let mut layout = Layout::filled(width, height);
    let Some(first) = rooms(width, height).next() else {
        return layout.into_walls();
    };
    layout.carve(first);
    let mut stack = vec![first];
    while let Some(&current) = stack.last() {
        let mut unvisited = layout.room_neighbors(current);
        unvisited.retain(|(room, _)| layout.is_wall(*room));
        match unvisited.choose(rng) {
            Some(&(next, between)) => {
                layout.carve(between);
                layout.carve(next);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
    layout.into_walls()
}
