use std::cell::RefCell;

use grid_util::point::Point;

use crate::astar_linear::SearchContext;
use crate::solver::GridSolver;

/// Uniform-cost search, i.e. A* with a zero heuristic. Expands more nodes than
/// [AstarSolver](crate::solver::astar::AstarSolver) but returns paths of the same length.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver {
    context: RefCell<SearchContext<Point, i32>>,
}

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver::default()
    }
}

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }

    fn context(&self) -> &RefCell<SearchContext<Point, i32>> {
        &self.context
    }
}
