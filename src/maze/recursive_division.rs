use crate::maze::Layout;
use grid_util::point::Point;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

/// Open rectangle still to be divided, bounds inclusive.
#[derive(Clone, Copy, Debug)]
struct Chamber {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Chamber {
    fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }
}

/// Even coordinates strictly between `lo` and `hi`, where a dividing wall leaves room on both
/// sides.
fn wall_positions(lo: i32, hi: i32) -> Vec<i32> {
    (lo + 1..hi).filter(|c| c % 2 == 0).collect()
}

/// Odd coordinates in `lo..=hi`, where a gap lines up with the rooms on either side.
fn gap_positions(lo: i32, hi: i32) -> Vec<i32> {
    (lo..=hi).filter(|c| c % 2 == 1).collect()
}

/// Recursive division: starts from an open field enclosed by a border, then splits chambers
/// with a wall on an even line that has a single gap on an odd cell, until no chamber can be
/// split any more.
pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Vec<Point> {
    let mut layout = Layout::open(width, height);
    let (w, h) = (width as i32, height as i32);
    for x in 0..w {
        layout.set(Point::new(x, 0), true);
        layout.set(Point::new(x, h - 1), true);
    }
    for y in 0..h {
        layout.set(Point::new(0, y), true);
        layout.set(Point::new(w - 1, y), true);
    }

    let mut chambers = Vec::new();
    if w > 2 && h > 2 {
        chambers.push(Chamber {
            left: 1,
            top: 1,
            right: w - 2,
            bottom: h - 2,
        });
    }
    while let Some(chamber) = chambers.pop() {
        let vertical = match chamber.width().cmp(&chamber.height()) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => rng.gen_bool(0.5),
        };
        let columns = wall_positions(chamber.left, chamber.right);
        let rows = wall_positions(chamber.top, chamber.bottom);
        let split_vertically = match (columns.is_empty(), rows.is_empty()) {
            (true, true) => continue,
            (false, true) => true,
            (true, false) => false,
            (false, false) => vertical,
        };

        if split_vertically {
            let gaps = gap_positions(chamber.top, chamber.bottom);
            let (Some(&x), Some(&gap)) = (columns.choose(rng), gaps.choose(rng)) else {
                continue;
            };
            for y in chamber.top..=chamber.bottom {
                layout.set(Point::new(x, y), y != gap);
            }
            chambers.push(Chamber {
                right: x - 1,
                ..chamber
            });
            chambers.push(Chamber {
                left: x + 1,
                ..chamber
            });
        } else {
            let gaps = gap_positions(chamber.left, chamber.right);
            let (Some(&y), Some(&gap)) = (rows.choose(rng), gaps.choose(rng)) else {
                continue;
            };
            for x in chamber.left..=chamber.right {
                layout.set(Point::new(x, y), x != gap);
            }
            chambers.push(Chamber {
                bottom: y - 1,
                ..chamber
            });
            chambers.push(Chamber {
                top: y + 1,
                ..chamber
            });
        }
    }
    layout.into_walls()
}
