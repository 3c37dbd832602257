//! Fuzzes the pathfinding system by checking for many random grids that a path is found exactly
//! when a breadth-first search reaches the goal, and that it is as short as the breadth-first one.
use grid_pathfinder::{
    is_four_connected_walk, AstarSolver, CellGrid, CellState, DijkstraSolver, GridSolver,
    ObstacleConfig, ObstacleGenerator, Point,
};
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(w: usize, h: usize, rng: &mut StdRng) -> CellGrid {
    let mut grid = CellGrid::new(w, h).unwrap();
    for x in 1..=w as i32 {
        for y in 1..=h as i32 {
            if rng.gen_bool(0.3) {
                grid.set_state(Point::new(x, y), CellState::Blocked)
                    .unwrap();
            }
        }
    }
    grid.update();
    grid
}

fn random_grid_point(grid: &CellGrid, rng: &mut StdRng) -> Point {
    Point::new(
        rng.gen_range(1..=grid.width() as i32),
        rng.gen_range(1..=grid.height() as i32),
    )
}

/// Shortest step count from start to goal, the oracle for the searches.
fn bfs_distance(grid: &CellGrid, start: Point, goal: Point) -> Option<usize> {
    let ix = |p: Point| (p.y as usize - 1) * grid.width() + (p.x as usize - 1);
    let mut dist = vec![usize::MAX; grid.cell_count()];
    let mut queue = VecDeque::new();
    dist[ix(start)] = 0;
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        if p == goal {
            return Some(dist[ix(p)]);
        }
        for n in grid.neighbors4(p) {
            if grid.is_walkable(n) && dist[ix(n)] == usize::MAX {
                dist[ix(n)] = dist[ix(p)] + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn visualize_grid(grid: &CellGrid, start: &Point, end: &Point) {
    for y in (1..=grid.height() as i32).rev() {
        for x in 1..=grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if !grid.is_walkable(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 5;
    const N_GRIDS: usize = 5000;
    let mut rng = StdRng::seed_from_u64(0);
    let solver = AstarSolver::new();
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, N, &mut rng);
        let start = random_grid_point(&grid, &mut rng);
        let goal = random_grid_point(&grid, &mut rng);
        if !grid.is_walkable(start) || !grid.is_walkable(goal) {
            continue;
        }
        let expected = bfs_distance(&grid, start, goal);
        let path = solver.find_path(&grid, start, goal);
        if path.as_ref().map(|p| p.len()) != expected {
            visualize_grid(&grid, &start, &goal);
        }
        assert_eq!(path.as_ref().map(|p| p.len()), expected);
        assert_eq!(grid.reachable(&start, &goal), expected.is_some());
        if let Some(path) = path {
            let mut walk = vec![start];
            walk.extend(path.points());
            assert!(is_four_connected_walk(&walk));
            assert!(walk.iter().all(|p| grid.is_walkable(*p)));
            assert_eq!(walk.last(), Some(&goal));
            assert_eq!(solver.path_cost(&start, &path), path.len() as i32);
        }
    }
}

/// The search must not depend on the components to be correct.
#[test]
fn fuzz_without_components() {
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    let solver = DijkstraSolver::new();
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(6, 4, &mut rng);
        grid.components_dirty = true;
        let start = Point::new(1, 1);
        let goal = Point::new(6, 4);
        if !grid.is_walkable(start) || !grid.is_walkable(goal) {
            continue;
        }
        let expected = bfs_distance(&grid, start, goal);
        let path = solver.find_path(&grid, start, goal);
        assert_eq!(path.map(|p| p.len()), expected);
    }
}

#[test]
fn fuzz_generated_obstacles() {
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(2);
    let solver = AstarSolver::new();
    for _ in 0..N_GRIDS {
        let w = rng.gen_range(2..=50);
        let h = rng.gen_range(2..=50);
        let mut grid = CellGrid::new(w, h).unwrap();
        let seed = rng.gen();
        ObstacleGenerator::new(ObstacleConfig::default(), StdRng::seed_from_u64(seed))
            .generate(&mut grid)
            .unwrap();
        let start = random_grid_point(&grid, &mut rng);
        let goal = random_grid_point(&grid, &mut rng);
        if !grid.is_walkable(start) || !grid.is_walkable(goal) {
            continue;
        }
        let expected = bfs_distance(&grid, start, goal);
        let first = solver.find_path(&grid, start, goal);
        assert_eq!(first.as_ref().map(|p| p.len()), expected);
        // Same grid, same endpoints, same path
        assert_eq!(solver.find_path(&grid, start, goal), first);
    }
}
