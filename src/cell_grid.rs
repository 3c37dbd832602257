use core::fmt;
use grid_util::point::Point;
use log::{debug, info};
use petgraph::unionfind::UnionFind;

use crate::error::{PathfinderError, Result};
use crate::{MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Offsets of the 4-neighbourhood in the order +y, +x, −y, −x. The order decides which of
/// several equal-cost paths the search returns, so it is fixed.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// The state of a single cell. Exactly one holds per cell at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Open,
    Blocked,
    Start,
    Goal,
    /// Transient annotation of the cells of the last successful search.
    Path,
}

impl CellState {
    pub fn is_walkable(self) -> bool {
        self != CellState::Blocked
    }
    fn symbol(self) -> char {
        match self {
            CellState::Open => '.',
            CellState::Blocked => '#',
            CellState::Start => 'S',
            CellState::Goal => 'G',
            CellState::Path => '*',
        }
    }
}

/// [CellGrid] owns the dimensions and per-cell [CellState] of a grid addressed by 1-indexed
/// [Point]s. In addition it maintains information about connected components of walkable
/// cells using a [UnionFind] structure, so that unreachable goals can be detected without
/// flood-filling the grid.
#[derive(Clone, Debug)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl CellGrid {
    /// Creates a grid with all cells [CellState::Open]. Fails with
    /// [PathfinderError::InvalidSize] if either dimension lies outside
    /// [[MIN_GRID_SIZE], [MAX_GRID_SIZE]].
    pub fn new(width: usize, height: usize) -> Result<CellGrid> {
        let allowed = MIN_GRID_SIZE..=MAX_GRID_SIZE;
        if !allowed.contains(&width) || !allowed.contains(&height) {
            return Err(PathfinderError::InvalidSize { width, height });
        }
        let mut grid = CellGrid {
            width,
            height,
            cells: vec![CellState::Open; width * height],
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        grid.generate_components();
        info!("Created {}x{} grid", width, height);
        Ok(grid)
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 1
            && point.y >= 1
            && point.x as usize <= self.width
            && point.y as usize <= self.height
    }
    fn get_ix(&self, point: Point) -> usize {
        (point.y as usize - 1) * self.width + (point.x as usize - 1)
    }
    fn point_from_ix(&self, ix: usize) -> Point {
        Point::new((ix % self.width) as i32 + 1, (ix / self.width) as i32 + 1)
    }
    fn checked_ix(&self, point: Point) -> Result<usize> {
        if self.in_bounds(point) {
            Ok(self.get_ix(point))
        } else {
            Err(PathfinderError::OutOfBounds(point))
        }
    }
    pub fn state(&self, point: Point) -> Result<CellState> {
        self.checked_ix(point).map(|ix| self.cells[ix])
    }
    /// Updates a single cell. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    pub fn set_state(&mut self, point: Point, state: CellState) -> Result<()> {
        let ix = self.checked_ix(point)?;
        let was_walkable = self.cells[ix].is_walkable();
        self.cells[ix] = state;
        if !state.is_walkable() {
            if was_walkable {
                self.components_dirty = true;
            }
        } else if !self.components_dirty {
            let joined = self
                .neighbors4(point)
                .filter(|n| self.is_walkable(*n))
                .map(|n| self.get_ix(n))
                .collect::<Vec<usize>>();
            for n_ix in joined {
                self.components.union(ix, n_ix);
            }
        }
        Ok(())
    }
    /// True iff the point is in bounds and not [CellState::Blocked].
    pub fn is_walkable(&self, point: Point) -> bool {
        self.in_bounds(point) && self.cells[self.get_ix(point)].is_walkable()
    }
    /// The in-bounds points at Manhattan distance 1, in the order +y, +x, −y, −x.
    pub fn neighbors4(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        NEUMANN_OFFSETS
            .iter()
            .map(move |(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(move |p| self.in_bounds(*p))
    }
    /// All cells with their state in row-major order, starting at (1, 1).
    pub fn cells(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(ix, state)| (self.point_from_ix(ix), *state))
    }
    /// Number of cells currently in the given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|s| **s == state).count()
    }
    /// Resets every [CellState::Path] annotation back to [CellState::Open].
    pub fn clear_paths(&mut self) {
        for cell in self.cells.iter_mut().filter(|s| **s == CellState::Path) {
            *cell = CellState::Open;
        }
    }
    /// Resets start, goal and path annotations back to [CellState::Open]. All of them are
    /// walkable, so the components stay valid.
    pub(crate) fn clear_annotations(&mut self) {
        for cell in self.cells.iter_mut().filter(|s| s.is_walkable()) {
            *cell = CellState::Open;
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Result<usize> {
        self.checked_ix(*point).map(|ix| self.components.find(ix))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_walkable(*start) && self.is_walkable(*goal) {
            let start_ix = self.get_ix(*start);
            let goal_ix = self.get_ix(*goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up walkable grid neighbours to the
    /// same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            if !self.cells[ix].is_walkable() {
                continue;
            }
            let point = self.point_from_ix(ix);
            // Linking forward is enough, the backward links were made from the other side
            let forward = [
                Point::new(point.x, point.y + 1),
                Point::new(point.x + 1, point.y),
            ];
            for n in forward {
                if self.is_walkable(n) {
                    let n_ix = self.get_ix(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }
}

impl fmt::Display for CellGrid {
    /// Renders the grid with the highest row first, so that +y points up.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (1..=self.height as i32).rev() {
            let row = (1..=self.width as i32)
                .map(|x| self.cells[self.get_ix(Point::new(x, y))].symbol())
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
