use grid_pathfinder::{CellGrid, ObstacleConfig, ObstacleGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Blocks clusters on a 30x15 grid and prints each cluster with its seed first.

fn main() {
    let mut grid = CellGrid::new(30, 15).unwrap();
    let mut generator = ObstacleGenerator::new(ObstacleConfig::default(), StdRng::seed_from_u64(7));
    let clusters = generator.generate(&mut grid).unwrap();
    println!("{}", grid);
    for (i, cluster) in clusters.iter().enumerate() {
        let cells = cluster
            .cells()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("cluster {i}: {cells}");
    }
}
