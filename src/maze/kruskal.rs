use crate::maze::{rooms, Layout};
use grid_util::point::Point;
use petgraph::unionfind::UnionFind;
use rand::seq::SliceRandom;
use rand::Rng;

/// Randomized Kruskal: every room starts out as its own set, and the walls between rooms are
/// knocked down in random order whenever they separate two different sets.
pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Vec<Point> {
    let mut layout = Layout::filled(width, height);
    let mut sets = UnionFind::<usize>::new(width * height);
    let mut edges = Vec::new();
    for room in rooms(width, height) {
        layout.carve(room);
        for (next, between) in layout.room_neighbors(room) {
            // Right and down only, so every edge is listed once.
            if next.x > room.x || next.y > room.y {
                edges.push((room, next, between));
            }
        }
    }
    edges.shuffle(rng);

    for (a, b, between) in edges {
        if let (Some(a), Some(b)) = (layout.index(a), layout.index(b)) {
            if sets.union(a, b) {
                layout.carve(between);
            }
        }
    }
    layout.into_walls()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn carves_a_spanning_tree() {
        let (w, h) = (16, 11);
        let walls = generate(w, h, &mut StdRng::seed_from_u64(9));
        let n_rooms = rooms(w, h).count();
        assert_eq!(w * h - walls.len(), n_rooms + n_rooms - 1);
    }
}
