use thiserror::Error;

/// Errors raised when the engine is used outside of its contract. Running out of frontier
/// cells is not an error: searches report an unreachable target as an empty path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unknown algorithm id: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown maze id: {0}")]
    UnknownMaze(String),

    #[error("unknown heuristic id: {0}")]
    UnknownHeuristic(String),

    #[error("grid of {width}x{height} with cell size {cell_size} cannot hold a start and a target")]
    InvalidDimensions {
        width: usize,
        height: usize,
        cell_size: usize,
    },

    #[error("({x}, {y}) lies outside of the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("({x}, {y}) is already occupied by the other marker")]
    MarkerCollision { x: i32, y: i32 },

    #[error("item is already present in the heap")]
    DuplicateHeapItem,

    #[error("item is not present in the heap")]
    MissingHeapItem,

    #[error("search stopped after closing {limit} cells")]
    OperationLimit { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
