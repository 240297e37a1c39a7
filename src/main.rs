//! CLI for generating and solving a maze

use anyhow::{bail, Context};
use clap::Parser;
use maze_pathfinding::{
    Algorithm, MazeConfig, DEFAULT_MAZE_SIZE, DEFAULT_WALK_STEP_LIMIT, MAX_MAZE_SIZE,
    MIN_MAZE_SIZE,
};

/// Generate a perfect maze and walk it from the top-left to the bottom-right corner
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of cells along each side
    #[arg(short, long, default_value_t = DEFAULT_MAZE_SIZE)]
    size: usize,

    /// Seed for generation and random walks, drawn from system entropy if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// One of bfs, gbfs, dfs, randomWalk, trueRandomWalk, astar
    #[arg(short, long, default_value = "bfs")]
    algorithm: String,

    /// Punch floor(size * size * FRACTION) random holes after generation, FRACTION in [0, 1]
    #[arg(long, value_name = "FRACTION")]
    holes: Option<f64>,

    /// Give up the unconstrained random walk after this many moves
    #[arg(long, default_value_t = DEFAULT_WALK_STEP_LIMIT)]
    max_walk_steps: usize,

    /// Log progress of generation and search
    #[arg(short, long)]
    verbose: bool,
}

/// Build the maze, solve it and print the result
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "maze_pathfinding=debug"
    } else {
        "maze_pathfinding=warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if !(MIN_MAZE_SIZE..=MAX_MAZE_SIZE).contains(&args.size) {
        bail!(
            "size must be between {} and {}, got {}",
            MIN_MAZE_SIZE,
            MAX_MAZE_SIZE,
            args.size
        );
    }
    let algorithm: Algorithm = args.algorithm.parse()?;

    let mut config = MazeConfig::new(args.size);
    config.seed = args.seed;
    config.walk_step_limit = args.max_walk_steps;
    let mut maze = config.build();
    let steps = maze.generate_complete();

    if let Some(fraction) = args.holes {
        let removed = maze
            .create_random_holes(fraction)
            .context("could not punch holes")?;
        println!("Removed {} walls", removed);
    }

    let path = maze
        .traverse(algorithm)
        .with_context(|| format!("{} did not reach the goal", algorithm))?;
    println!("{}", maze.grid().render(&path));
    println!("Generated in {} steps", steps);
    println!("Path length: {} cells", path.len());
    println!("Agent moves: {}", maze.agent().counter());
    Ok(())
}
