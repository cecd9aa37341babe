//! Distance estimates on absolute coordinate deltas. All of them are admissible for
//! 4-directional movement with unit cost; only [octile] and [chebyshev] stay admissible once
//! diagonal moves of cost √2 are allowed.
use crate::Error;
use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub fn manhattan(dx: f64, dy: f64) -> f64 {
    dx + dy
}

pub fn euclidean(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

pub fn chebyshev(dx: f64, dy: f64) -> f64 {
    dx.max(dy)
}

/// Cost of taking as many diagonal steps as possible before going straight.
pub fn octile(dx: f64, dy: f64) -> f64 {
    dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
    Chebyshev,
    Octile,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Manhattan,
        Heuristic::Euclidean,
        Heuristic::Chebyshev,
        Heuristic::Octile,
    ];

    pub fn distance(self, dx: f64, dy: f64) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(dx, dy),
            Heuristic::Euclidean => euclidean(dx, dy),
            Heuristic::Chebyshev => chebyshev(dx, dy),
            Heuristic::Octile => octile(dx, dy),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Chebyshev => "chebyshev",
            Heuristic::Octile => "octile",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.id() == s)
            .ok_or_else(|| Error::UnknownHeuristic(s.to_owned()))
    }
}
