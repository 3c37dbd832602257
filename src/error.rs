//! Error types for grid construction, designation and search.

use grid_util::point::Point;
use thiserror::Error;

use crate::session::Role;

/// Every failure is local to the call that produced it and leaves prior state intact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathfinderError {
    #[error("grid size {width}x{height} is outside the allowed range [{min}, {max}]", min = crate::MIN_GRID_SIZE, max = crate::MAX_GRID_SIZE)]
    InvalidSize { width: usize, height: usize },

    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),

    #[error("{0} is blocked")]
    CellBlocked(Point),

    #[error("{0} is already designated")]
    AlreadyDesignated(Point),

    #[error("no {0} has been designated")]
    MissingEndpoint(Role),

    #[error("invalid obstacle configuration: {0}")]
    InvalidObstacleConfig(String),

    #[error("no path exists between start and goal")]
    NoPathFound,
}

pub type Result<T> = std::result::Result<T, PathfinderError>;
