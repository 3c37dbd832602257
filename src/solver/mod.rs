use std::cell::RefCell;

use grid_util::point::Point;
use log::{info, warn};
use smallvec::SmallVec;

use crate::astar_linear::SearchContext;
use crate::cell_grid::CellGrid;
use crate::manhattan_distance;

pub mod astar;
pub mod dijkstra;

pub type Neighborhood = SmallVec<[(Point, i32); 4]>;

/// One cell of a [Path] together with its distance in steps from the start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub point: Point,
    pub distance: usize,
}

/// A shortest walk from the step adjacent to the start through the goal, inclusive. The start
/// itself is not part of it, so a path between equal start and goal is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    pub(crate) fn from_costed(nodes: Vec<(Point, i32)>) -> Path {
        Path {
            steps: nodes
                .into_iter()
                .map(|(point, cost)| PathStep {
                    point,
                    distance: cost as usize,
                })
                .collect(),
        }
    }
    /// Number of steps taken, which equals the distance of the goal from the start.
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.steps.iter().map(|s| s.point)
    }
    /// The steps strictly between start and goal.
    pub fn intermediate(&self) -> &[PathStep] {
        match self.steps.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
    pub fn goal_distance(&self) -> usize {
        self.steps.last().map_or(0, |s| s.distance)
    }
}

/// Shared machinery of the solvers, which differ only in their heuristic.
pub trait GridSolver {
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32;

    /// The search buffers, reused across calls.
    fn context(&self) -> &RefCell<SearchContext<Point, i32>>;

    /// Walkable 4-neighbours with unit cost, in the grid's fixed neighbour order.
    fn successors(&self, grid: &CellGrid, node: &Point) -> Neighborhood {
        grid.neighbors4(*node)
            .filter(|p| grid.is_walkable(*p))
            .map(|p| (p, 1))
            .collect()
    }

    /// Every move is a single orthogonal step, so the cost between adjacent points is 1.
    fn cost(&self, p1: &Point, p2: &Point) -> i32 {
        manhattan_distance(p1, p2)
    }

    /// Total cost of walking from `start` along the path.
    fn path_cost(&self, start: &Point, path: &Path) -> i32 {
        let mut v = *start;
        let mut total_cost = 0;
        for p in path.points() {
            total_cost += self.cost(&v, &p);
            v = p;
        }
        total_cost
    }

    /// Computes a shortest 4-connected path from start to goal avoiding blocked cells. Returns
    /// [None] if either endpoint is not walkable or no route exists. When the components of
    /// the grid are up to date they are checked first to avoid exhausting the whole frontier.
    fn find_path(&self, grid: &CellGrid, start: Point, goal: Point) -> Option<Path> {
        if !grid.is_walkable(start) || !grid.is_walkable(goal) {
            return None;
        }
        if start == goal {
            return Some(Path::default());
        }
        if !grid.components_dirty && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return None;
        }
        let mut ct = self.context().borrow_mut();
        let result = ct.astar_linear(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        );
        match result {
            Some((nodes, cost)) => {
                info!("Found path of length {} from {} to {}", cost, start, goal);
                Some(Path::from_costed(nodes))
            }
            None => {
                if !grid.components_dirty {
                    warn!("Reachable goal not found, are the components correct?");
                }
                None
            }
        }
    }
}
