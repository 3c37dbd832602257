//! Randomized placement of clustered obstacles.
//!
//! A target share of the grid is blocked in clusters. Every cluster starts at a random open
//! seed cell and grows from its most recently placed cell into a random one of the eight
//! surrounding cells, which produces walls rather than scattered noise. Nothing guarantees
//! that the grid stays connected afterwards.

use grid_util::point::Point;
use log::{debug, info, warn};
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::cell_grid::{CellGrid, CellState};
use crate::error::{PathfinderError, Result};

/// Offsets of the 8-neighbourhood, clockwise starting at +y.
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Parameters of the obstacle generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObstacleConfig {
    /// Lower bound of the blocked percentage, inclusive.
    pub min_percent: u32,
    /// Upper bound of the blocked percentage, exclusive unless equal to `min_percent`.
    pub max_percent: u32,
    pub min_group_size: usize,
    pub max_group_size: usize,
    /// Random seed picks attempted before falling back to choosing among the open cells.
    pub max_retries: usize,
}

impl Default for ObstacleConfig {
    fn default() -> ObstacleConfig {
        ObstacleConfig {
            min_percent: 8,
            max_percent: 12,
            min_group_size: 1,
            max_group_size: 5,
            max_retries: 1000,
        }
    }
}

impl ObstacleConfig {
    pub fn new(
        min_percent: u32,
        max_percent: u32,
        min_group_size: usize,
        max_group_size: usize,
    ) -> Result<ObstacleConfig> {
        let config = ObstacleConfig {
            min_percent,
            max_percent,
            min_group_size,
            max_group_size,
            ..ObstacleConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(PathfinderError::InvalidObstacleConfig(reason));
        if self.min_percent > self.max_percent {
            return invalid(format!(
                "min_percent {} exceeds max_percent {}",
                self.min_percent, self.max_percent
            ));
        }
        if self.max_percent > 100 {
            return invalid(format!("max_percent {} exceeds 100", self.max_percent));
        }
        if self.min_group_size == 0 {
            return invalid("min_group_size must be at least 1".to_owned());
        }
        if self.min_group_size > self.max_group_size {
            return invalid(format!(
                "min_group_size {} exceeds max_group_size {}",
                self.min_group_size, self.max_group_size
            ));
        }
        if self.max_retries == 0 {
            return invalid("max_retries must be at least 1".to_owned());
        }
        Ok(())
    }

    /// Samples the number of cells to block out of `cell_count`.
    pub fn target_count<R: Rng>(&self, cell_count: usize, rng: &mut R) -> usize {
        let percent = if self.min_percent == self.max_percent {
            self.min_percent
        } else {
            rng.gen_range(self.min_percent..self.max_percent)
        };
        (cell_count as f64 * percent as f64 / 100.0).round() as usize
    }
}

/// The cells blocked by one placement pass, in placement order with the seed first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    cells: Vec<Point>,
}

impl Cluster {
    pub fn seed(&self) -> Point {
        self.cells[0]
    }
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Blocks clusters of cells on a [CellGrid] according to an [ObstacleConfig].
#[derive(Clone, Debug)]
pub struct ObstacleGenerator<R: Rng> {
    pub config: ObstacleConfig,
    pub rng: R,
}

impl<R: Rng> ObstacleGenerator<R> {
    pub fn new(config: ObstacleConfig, rng: R) -> Self {
        ObstacleGenerator { config, rng }
    }

    fn random_point(&mut self, grid: &CellGrid) -> Point {
        Point::new(
            self.rng.gen_range(1..=grid.width() as i32),
            self.rng.gen_range(1..=grid.height() as i32),
        )
    }

    /// Picks a random open cell. After `max_retries` failed picks the choice is made among
    /// the remaining open cells directly; [None] if there are none.
    fn pick_seed(&mut self, grid: &CellGrid) -> Option<Point> {
        for _ in 0..self.config.max_retries {
            let p = self.random_point(grid);
            if grid.state(p) == Ok(CellState::Open) {
                return Some(p);
            }
        }
        debug!("Seed retries exhausted, choosing among open cells");
        grid.cells()
            .filter(|(_, s)| *s == CellState::Open)
            .map(|(p, _)| p)
            .choose(&mut self.rng)
    }

    /// A random open cell among the eight around `from`. Equivalent to retrying random
    /// directions until an open in-bounds cell comes up, without the retries.
    fn grow(&mut self, grid: &CellGrid, from: Point) -> Option<Point> {
        MOORE_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(from.x + dx, from.y + dy))
            .filter(|p| grid.state(*p) == Ok(CellState::Open))
            .choose(&mut self.rng)
    }

    /// Blocks a random share of the open cells of `grid` in clusters and returns them in
    /// placement order. Cells that are not [CellState::Open] are never chosen. A cluster whose
    /// last cell has no open surroundings ends early; the shortfall goes to later clusters.
    pub fn generate(&mut self, grid: &mut CellGrid) -> Result<Vec<Cluster>> {
        self.config.validate()?;
        let target = self.config.target_count(grid.cell_count(), &mut self.rng);
        let mut remaining = target;
        let mut clusters = Vec::new();
        while remaining > 0 {
            let upper = self.config.max_group_size.min(remaining);
            let lower = self.config.min_group_size.min(upper);
            let size = self.rng.gen_range(lower..=upper);
            let Some(seed) = self.pick_seed(grid) else {
                warn!("No open cells left, {} obstacles not placed", remaining);
                break;
            };
            grid.set_state(seed, CellState::Blocked)?;
            let mut cells = vec![seed];
            while cells.len() < size {
                let last = cells[cells.len() - 1];
                let Some(next) = self.grow(grid, last) else {
                    debug!(
                        "Cluster at {} ended after {} of {} cells",
                        seed,
                        cells.len(),
                        size
                    );
                    break;
                };
                grid.set_state(next, CellState::Blocked)?;
                cells.push(next);
            }
            remaining = remaining.saturating_sub(cells.len());
            clusters.push(Cluster { cells });
        }
        grid.update();
        info!(
            "Blocked {} of {} cells in {} clusters",
            target - remaining,
            grid.cell_count(),
            clusters.len()
        );
        Ok(clusters)
    }
}
