//! # grid_pathfinder
//!
//! An interactive grid pathfinding core. A rectangular [CellGrid] is filled with
//! randomly generated, clustered obstacle regions by an [ObstacleGenerator], after which a
//! [Session] accepts start and goal designations and computes a shortest
//! 4-connected path between them with [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! using the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//!
//! Coordinates are 1-indexed: a grid of width `W` and height `H` covers
//! `[1, W] × [1, H]`. Grid sizes are bounded by [MIN_GRID_SIZE] and [MAX_GRID_SIZE].
//! Every move is a single orthogonal step of cost 1; there are no diagonal moves.
//! The connected components of the grid are used to skip searches whose goal cannot be
//! reached.
pub mod astar_linear;
pub mod cell_grid;
pub mod error;
pub mod obstacles;
pub mod session;
pub mod solver;

pub use cell_grid::{CellGrid, CellState};
pub use error::{PathfinderError, Result};
pub use grid_util::point::Point;
pub use obstacles::{Cluster, ObstacleConfig, ObstacleGenerator};
pub use session::{Role, Selection, Session};
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver, Path, PathStep};

/// Smallest allowed width or height of a grid.
pub const MIN_GRID_SIZE: usize = 2;
/// Largest allowed width or height of a grid. Bounds the search space to 2500 cells.
pub const MAX_GRID_SIZE: usize = 50;

/// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) |Δx| + |Δy|
/// between two points, which is the exact step count on an unobstructed 4-connected grid.
pub fn manhattan_distance(p1: &Point, p2: &Point) -> i32 {
    (p1.x - p2.x).abs() + (p1.y - p2.y).abs()
}

/// Checks that consecutive points of a walk differ by exactly one unit along exactly one axis.
pub fn is_four_connected_walk(points: &[Point]) -> bool {
    points
        .windows(2)
        .all(|w| manhattan_distance(&w[0], &w[1]) == 1)
}
