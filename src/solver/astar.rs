use std::cell::RefCell;

use grid_util::point::Point;

use crate::astar_linear::SearchContext;
use crate::manhattan_distance;
use crate::solver::GridSolver;

/// A* with the Manhattan distance as heuristic, which is admissible and consistent on a
/// 4-connected unit-cost grid, so the returned paths are shortest.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    context: RefCell<SearchContext<Point, i32>>,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver::default()
    }
}

impl GridSolver for AstarSolver {
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        manhattan_distance(p1, p2)
    }

    fn context(&self) -> &RefCell<SearchContext<Point, i32>> {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use crate::{is_four_connected_walk, CellGrid, CellState};

    use super::*;

    fn block(grid: &mut CellGrid, points: &[(i32, i32)]) {
        for &(x, y) in points {
            grid.set_state(Point::new(x, y), CellState::Blocked)
                .unwrap();
        }
        grid.update();
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = CellGrid::new(2, 2).unwrap();
        let solver = AstarSolver::new();
        let start = Point::new(1, 1);
        let path = solver.find_path(&grid, start, start).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn unobstructed_path_is_manhattan() {
        let grid = CellGrid::new(4, 4).unwrap();
        let solver = AstarSolver::new();
        let start = Point::new(1, 1);
        let goal = Point::new(4, 4);
        let path = solver.find_path(&grid, start, goal).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.points().last(), Some(goal));
        let distances = path.steps().iter().map(|s| s.distance).collect::<Vec<_>>();
        assert_eq!(distances, (1..=6).collect::<Vec<_>>());
        let mut walk = vec![start];
        walk.extend(path.points());
        assert!(is_four_connected_walk(&walk));
        assert_eq!(solver.path_cost(&start, &path), 6);
    }

    /// The +y neighbour comes first, so ties resolve by going up before going right.
    #[test]
    fn tie_breaking_is_reproducible() {
        let grid = CellGrid::new(3, 3).unwrap();
        let solver = AstarSolver::new();
        let start = Point::new(1, 1);
        let goal = Point::new(2, 2);
        let path = solver.find_path(&grid, start, goal).unwrap();
        assert_eq!(
            path.points().collect::<Vec<_>>(),
            vec![Point::new(1, 2), Point::new(2, 2)]
        );
        assert_eq!(solver.find_path(&grid, start, goal), Some(path));
    }

    #[test]
    fn routes_through_gap() {
        //  ____
        // |G   |
        // |    |
        // |## #|
        // |S   |
        //  ____
        let mut grid = CellGrid::new(4, 4).unwrap();
        block(&mut grid, &[(1, 2), (2, 2), (4, 2)]);
        let solver = AstarSolver::new();
        let path = solver
            .find_path(&grid, Point::new(1, 1), Point::new(1, 4))
            .unwrap();
        assert!(path.points().any(|p| p == Point::new(3, 2)));
        assert_eq!(path.len(), 7);
        assert!(path.points().all(|p| grid.is_walkable(p)));
    }

    #[test]
    fn enclosed_goal_has_no_path() {
        let mut grid = CellGrid::new(5, 5).unwrap();
        block(&mut grid, &[(3, 4), (4, 3), (3, 2), (2, 3)]);
        let solver = AstarSolver::new();
        assert!(solver
            .find_path(&grid, Point::new(1, 1), Point::new(3, 3))
            .is_none());
    }

    /// Without up to date components the search itself has to exhaust the frontier.
    #[test]
    fn enclosed_goal_with_dirty_components() {
        let mut grid = CellGrid::new(5, 5).unwrap();
        for (x, y) in [(3, 4), (4, 3), (3, 2), (2, 3)] {
            grid.set_state(Point::new(x, y), CellState::Blocked)
                .unwrap();
        }
        assert!(grid.components_dirty);
        let solver = AstarSolver::new();
        assert!(solver
            .find_path(&grid, Point::new(1, 1), Point::new(3, 3))
            .is_none());
    }

    #[test]
    fn blocked_endpoints_have_no_path() {
        let mut grid = CellGrid::new(3, 3).unwrap();
        block(&mut grid, &[(3, 3)]);
        let solver = AstarSolver::new();
        assert!(solver
            .find_path(&grid, Point::new(3, 3), Point::new(1, 1))
            .is_none());
        assert!(solver
            .find_path(&grid, Point::new(1, 1), Point::new(3, 3))
            .is_none());
        assert!(solver
            .find_path(&grid, Point::new(1, 1), Point::new(4, 1))
            .is_none());
    }

    #[test]
    fn detours_around_wall() {
        // |S#G|
        // | # |
        // |   |
        let mut grid = CellGrid::new(3, 3).unwrap();
        block(&mut grid, &[(2, 3), (2, 2)]);
        let solver = AstarSolver::new();
        let path = solver
            .find_path(&grid, Point::new(1, 3), Point::new(3, 3))
            .unwrap();
        assert_eq!(path.len(), 6);
    }
}
