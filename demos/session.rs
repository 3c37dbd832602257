use grid_pathfinder::{CellState, PathfinderError, Session};

// Generates a 12x8 grid with obstacles, selects the first and last open cells the way clicks
// would, and prints the resulting path.

fn main() -> Result<(), PathfinderError> {
    let mut session = Session::with_seed(12, 8, 2024)?;
    let open = session
        .grid()
        .cells()
        .filter(|(_, s)| *s == CellState::Open)
        .map(|(p, _)| p)
        .collect::<Vec<_>>();
    let (Some(&first), Some(&last)) = (open.first(), open.last()) else {
        return Ok(());
    };
    println!("{:?}", session.select(first)?);
    println!("{:?}", session.select(last)?);
    println!("{}", session.grid());
    match session.path() {
        Some(path) => println!("Goal reached in {} steps", path.goal_distance()),
        None => println!("Could not find a path to the goal"),
    }
    Ok(())
}
