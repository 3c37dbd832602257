use grid_pathfinder::{AstarSolver, CellGrid, CellState, GridSolver, Point};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |  E|
// | # |
// |S  |
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = CellGrid::new(3, 3).unwrap();
    grid.set_state(Point::new(2, 2), CellState::Blocked)
        .unwrap();
    grid.update();
    println!("{}", grid);
    let start = Point::new(1, 1);
    let end = Point::new(3, 3);
    let path = AstarSolver::new().find_path(&grid, start, end).unwrap();
    println!("Path:");
    for step in path.steps() {
        println!("{} ({} steps)", step.point, step.distance);
    }
}
