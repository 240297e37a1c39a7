use crate::error::MazeError;
use crate::maze_grid::MazeGrid;
use crate::point::Point;
use crate::random::RandomSource;
use crate::DEFAULT_WALK_STEP_LIMIT;
use core::fmt;
use fxhash::FxHashMap;
use log::{debug, info};
use std::str::FromStr;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod greedy;
pub mod random_walk;

use self::astar::AstarSolver;
use self::bfs::BreadthFirstSolver;
use self::dfs::DepthFirstSolver;
use self::greedy::GreedyBestFirstSolver;
use self::random_walk::{RandomWalkSolver, TrueRandomWalkSolver};

/// Manhattan distance, the heuristic of the informed solvers. Admissible on a 4-connected
/// grid with unit step cost.
pub fn heuristic(p1: &Point, p2: &Point) -> i32 {
    p1.manhattan_distance(p2)
}

/// Walks the parent links back from `goal` to `start`. Returns [None] if the chain breaks
/// or loops before reaching `start`.
pub fn reconstruct_path(
    came_from: &FxHashMap<Point, Point>,
    start: Point,
    goal: Point,
) -> Option<Vec<Point>> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = *came_from.get(&current)?;
        path.push(current);
        if path.len() > came_from.len() + 1 {
            return None;
        }
    }
    path.reverse();
    Some(path)
}

pub trait GridSolver {
    /// Computes a path from `start` to `goal`, both included, or [None] if none was found.
    /// Solvers that make no random choices ignore `rng`.
    fn find_path<R>(
        &self,
        grid: &MazeGrid,
        start: Point,
        goal: Point,
        rng: &mut R,
    ) -> Option<Vec<Point>>
    where
        R: RandomSource + ?Sized;

    /// Path from the grid's start cell to its goal cell.
    fn get_path<R>(&self, grid: &MazeGrid, rng: &mut R) -> Option<Vec<Point>>
    where
        R: RandomSource + ?Sized,
    {
        if grid.is_empty() {
            return None;
        }
        self.find_path(grid, grid.start(), grid.goal(), rng)
    }

    /// Number of steps taken along `path`.
    fn get_path_cost(&self, path: &[Point]) -> usize {
        path.len().saturating_sub(1)
    }
}

/// The available search strategies. Parses from and displays as the identifiers
/// `bfs`, `gbfs`, `dfs`, `randomWalk`, `trueRandomWalk` and `astar`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Gbfs,
    Dfs,
    RandomWalk,
    TrueRandomWalk,
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bfs,
        Algorithm::Gbfs,
        Algorithm::Dfs,
        Algorithm::RandomWalk,
        Algorithm::TrueRandomWalk,
        Algorithm::Astar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Gbfs => "gbfs",
            Algorithm::Dfs => "dfs",
            Algorithm::RandomWalk => "randomWalk",
            Algorithm::TrueRandomWalk => "trueRandomWalk",
            Algorithm::Astar => "astar",
        }
    }

    /// Whether the algorithm only moves through open walls. The unconstrained random walk
    /// steps to any adjacent cell.
    pub fn respects_walls(&self) -> bool {
        !matches!(self, Algorithm::TrueRandomWalk)
    }

    /// Whether the returned path is guaranteed to be a shortest one.
    pub fn is_optimal(&self) -> bool {
        matches!(self, Algorithm::Bfs | Algorithm::Astar)
    }

    /// Dispatches to the solver for this algorithm. `walk_step_limit` caps the unconstrained
    /// random walk and is ignored by every other algorithm.
    pub fn find_path<R>(
        &self,
        grid: &MazeGrid,
        start: Point,
        goal: Point,
        rng: &mut R,
        walk_step_limit: usize,
    ) -> Option<Vec<Point>>
    where
        R: RandomSource + ?Sized,
    {
        let path = match self {
            Algorithm::Bfs => BreadthFirstSolver.find_path(grid, start, goal, rng),
            Algorithm::Gbfs => GreedyBestFirstSolver.find_path(grid, start, goal, rng),
            Algorithm::Dfs => DepthFirstSolver.find_path(grid, start, goal, rng),
            Algorithm::RandomWalk => RandomWalkSolver.find_path(grid, start, goal, rng),
            Algorithm::TrueRandomWalk => {
                TrueRandomWalkSolver::with_max_steps(walk_step_limit)
                    .find_path(grid, start, goal, rng)
            }
            Algorithm::Astar => AstarSolver::new().find_path(grid, start, goal, rng),
        };
        match &path {
            Some(p) => info!(
                "{} found a path of {} cells from {} to {}",
                self,
                p.len(),
                start,
                goal
            ),
            None => debug!("{} found no path from {} to {}", self, start, goal),
        }
        path
    }

    /// Runs the algorithm from the grid's start to its goal. An empty result means no path.
    pub fn run<R>(&self, grid: &MazeGrid, rng: &mut R) -> Vec<Point>
    where
        R: RandomSource + ?Sized,
    {
        self.run_with_limit(grid, rng, DEFAULT_WALK_STEP_LIMIT)
    }

    pub fn run_with_limit<R>(
        &self,
        grid: &MazeGrid,
        rng: &mut R,
        walk_step_limit: usize,
    ) -> Vec<Point>
    where
        R: RandomSource + ?Sized,
    {
        if grid.is_empty() {
            return Vec::new();
        }
        self.find_path(grid, grid.start(), grid.goal(), rng, walk_step_limit)
            .unwrap_or_default()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| MazeError::UnknownAlgorithm(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
        assert_eq!(
            "dijkstra".parse::<Algorithm>(),
            Err(MazeError::UnknownAlgorithm("dijkstra".to_owned()))
        );
        // identifiers are case sensitive
        assert!("BFS".parse::<Algorithm>().is_err());
    }

    #[test]
    fn reconstruct_follows_parents() {
        let a = Point::new(0, 0);
        let b = Point::new(1, 0);
        let c = Point::new(1, 1);
        let came_from: FxHashMap<Point, Point> = [(b, a), (c, b)].into_iter().collect();
        assert_eq!(reconstruct_path(&came_from, a, c), Some(vec![a, b, c]));
        assert_eq!(reconstruct_path(&came_from, a, a), Some(vec![a]));
        assert_eq!(reconstruct_path(&came_from, a, Point::new(0, 1)), None);
    }

    #[test]
    fn reconstruct_detects_loops() {
        let a = Point::new(0, 0);
        let b = Point::new(1, 0);
        let c = Point::new(1, 1);
        let came_from: FxHashMap<Point, Point> = [(b, c), (c, b)].into_iter().collect();
        assert_eq!(reconstruct_path(&came_from, a, c), None);
    }

    #[test]
    fn single_cell_maze() {
        let grid = MazeGrid::new(1);
        let mut rng = StdRng::seed_from_u64(0);
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.run(&grid, &mut rng), vec![Point::new(0, 0)]);
        }
    }

    #[test]
    fn closed_grid_has_no_path() {
        let grid = MazeGrid::new(3);
        let mut rng = StdRng::seed_from_u64(0);
        for algorithm in Algorithm::ALL.into_iter().filter(Algorithm::respects_walls) {
            assert!(algorithm.run(&grid, &mut rng).is_empty());
        }
        // walls are irrelevant to the unconstrained walk
        let walk = Algorithm::TrueRandomWalk.run(&grid, &mut rng);
        assert_eq!(walk.first(), Some(&grid.start()));
        assert_eq!(walk.last(), Some(&grid.goal()));
    }

    #[test]
    fn empty_grid_has_no_path() {
        let grid = MazeGrid::new(0);
        let mut rng = StdRng::seed_from_u64(0);
        for algorithm in Algorithm::ALL {
            assert!(algorithm.run(&grid, &mut rng).is_empty());
        }
    }
}
