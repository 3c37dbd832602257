//! The controller between a presentation layer and the grid core. It enforces the order of
//! operations: a search only runs once both endpoints are designated, and every change that
//! can affect the route invalidates the previous path.

use core::fmt;
use grid_util::point::Point;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell_grid::{CellGrid, CellState};
use crate::error::{PathfinderError, Result};
use crate::obstacles::{Cluster, ObstacleConfig, ObstacleGenerator};
use crate::solver::{astar::AstarSolver, GridSolver, Path};

/// Which endpoint of the search a designation refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Start,
    Goal,
}

impl Role {
    fn state(self) -> CellState {
        match self {
            Role::Start => CellState::Start,
            Role::Goal => CellState::Goal,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Start => write!(f, "start"),
            Role::Goal => write!(f, "goal"),
        }
    }
}

/// Outcome of [Session::select].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Designated(Role),
    Cleared(Role),
    /// Both endpoints were already designated.
    Ignored,
}

/// One grid with its endpoints and last path. Only one session is active at a time and every
/// operation runs to completion before returning.
#[derive(Debug)]
pub struct Session<R: Rng> {
    grid: CellGrid,
    generator: ObstacleGenerator<R>,
    solver: AstarSolver,
    start: Option<Point>,
    goal: Option<Point>,
    path: Option<Path>,
}

impl Session<StdRng> {
    /// A session whose obstacles are reproducible from `seed`.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self> {
        Session::new(width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Generates a grid with obstacles placed according to the default [ObstacleConfig].
    pub fn new(width: usize, height: usize, rng: R) -> Result<Self> {
        Session::with_config(width, height, ObstacleConfig::default(), rng)
    }

    pub fn with_config(
        width: usize,
        height: usize,
        config: ObstacleConfig,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        let mut session = Session::from_grid(CellGrid::new(width, height)?, rng);
        session.generator.config = config;
        session.generator.generate(&mut session.grid)?;
        Ok(session)
    }

    /// Wraps an existing grid without placing obstacles. Stray endpoint and path
    /// annotations in the grid are reset to [CellState::Open].
    pub fn from_grid(mut grid: CellGrid, rng: R) -> Self {
        grid.clear_annotations();
        grid.update();
        Session {
            grid,
            generator: ObstacleGenerator::new(ObstacleConfig::default(), rng),
            solver: AstarSolver::new(),
            start: None,
            goal: None,
            path: None,
        }
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }
    /// The path of the last successful search, if it is still valid.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }
    pub fn config(&self) -> &ObstacleConfig {
        &self.generator.config
    }
    /// Replaces the configuration used by later grid generations.
    pub fn set_config(&mut self, config: ObstacleConfig) -> Result<()> {
        config.validate()?;
        self.generator.config = config;
        Ok(())
    }

    fn endpoint_mut(&mut self, role: Role) -> &mut Option<Point> {
        match role {
            Role::Start => &mut self.start,
            Role::Goal => &mut self.goal,
        }
    }

    fn invalidate_path(&mut self) {
        self.path = None;
        self.grid.clear_paths();
    }

    /// Replaces the grid by a new one with freshly placed obstacles. Designations and path
    /// are dropped. On failure the previous grid is kept.
    pub fn generate_grid(&mut self, width: usize, height: usize) -> Result<&CellGrid> {
        let mut grid = CellGrid::new(width, height)?;
        self.generator.generate(&mut grid)?;
        self.grid = grid;
        self.start = None;
        self.goal = None;
        self.path = None;
        info!("Generated new {}x{} grid", width, height);
        Ok(&self.grid)
    }

    /// Blocks additional clusters on the current grid with the given parameters, which also
    /// become the session configuration. Designated cells are never blocked; the previous path
    /// is invalidated.
    pub fn generate_obstacles(
        &mut self,
        min_percent: u32,
        max_percent: u32,
        min_group_size: usize,
        max_group_size: usize,
    ) -> Result<Vec<Cluster>> {
        let config = ObstacleConfig {
            max_retries: self.generator.config.max_retries,
            ..ObstacleConfig::new(min_percent, max_percent, min_group_size, max_group_size)?
        };
        self.generator.config = config;
        self.invalidate_path();
        self.generator.generate(&mut self.grid)
    }

    pub fn designate_start(&mut self, point: Point) -> Result<()> {
        self.designate(Role::Start, point)
    }

    pub fn designate_goal(&mut self, point: Point) -> Result<()> {
        self.designate(Role::Goal, point)
    }

    /// Marks `point` as the endpoint for `role`. Once both endpoints are set the search runs
    /// immediately; not finding a path does not fail the designation.
    fn designate(&mut self, role: Role, point: Point) -> Result<()> {
        let state = self.grid.state(point)?;
        if state == CellState::Blocked {
            return Err(PathfinderError::CellBlocked(point));
        }
        let occupied = matches!(state, CellState::Start | CellState::Goal);
        if occupied || self.endpoint_mut(role).is_some() {
            return Err(PathfinderError::AlreadyDesignated(point));
        }
        self.grid.set_state(point, role.state())?;
        *self.endpoint_mut(role) = Some(point);
        info!("Designated {} as {}", point, role);
        if self.start.is_some() && self.goal.is_some() {
            match self.find_path() {
                Ok(_) | Err(PathfinderError::NoPathFound) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Clears the endpoint for `role` and invalidates the path. Returns the cleared point.
    pub fn clear_designation(&mut self, role: Role) -> Result<Option<Point>> {
        let cleared = self.endpoint_mut(role).take();
        if let Some(p) = cleared {
            self.grid.set_state(p, CellState::Open)?;
        }
        self.invalidate_path();
        Ok(cleared)
    }

    /// Applies a selection of `point` the way a click on a cell would: an open cell becomes
    /// the start, or else the goal; selecting an endpoint again clears it.
    pub fn select(&mut self, point: Point) -> Result<Selection> {
        match self.grid.state(point)? {
            CellState::Blocked => Err(PathfinderError::CellBlocked(point)),
            CellState::Start => {
                self.clear_designation(Role::Start)?;
                Ok(Selection::Cleared(Role::Start))
            }
            CellState::Goal => {
                self.clear_designation(Role::Goal)?;
                Ok(Selection::Cleared(Role::Goal))
            }
            CellState::Open | CellState::Path => {
                let role = match (self.start, self.goal) {
                    (None, _) => Role::Start,
                    (_, None) => Role::Goal,
                    _ => return Ok(Selection::Ignored),
                };
                self.designate(role, point)?;
                Ok(Selection::Designated(role))
            }
        }
    }

    /// Searches a shortest path between the designated endpoints and annotates the cells
    /// between them as [CellState::Path].
    pub fn find_path(&mut self) -> Result<&Path> {
        let start = self.start.ok_or(PathfinderError::MissingEndpoint(Role::Start))?;
        let goal = self.goal.ok_or(PathfinderError::MissingEndpoint(Role::Goal))?;
        self.invalidate_path();
        self.grid.update();
        let Some(path) = self.solver.find_path(&self.grid, start, goal) else {
            info!("Could not find a path from {} to {}", start, goal);
            return Err(PathfinderError::NoPathFound);
        };
        for step in path.intermediate() {
            self.grid.set_state(step.point, CellState::Path)?;
        }
        Ok(self.path.insert(path))
    }
}
