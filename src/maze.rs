use crate::agent::Agent;
use crate::error::{MazeError, MazeResult};
use crate::generator::{GenerationState, MazeGenerator};
use crate::maze_grid::{Cell, MazeGrid, WallEdit};
use crate::point::{Direction, Point};
use crate::random::RandomSource;
use crate::solver::Algorithm;
use crate::{DEFAULT_HOLE_FRACTION, DEFAULT_MAZE_SIZE, DEFAULT_WALK_STEP_LIMIT};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Parameters for building a [Maze].
#[derive(Clone, Debug, PartialEq)]
pub struct MazeConfig {
    /// Number of cells along each side.
    pub size: usize,
    /// Seed for carving and the random walks. [None] seeds from system entropy.
    pub seed: Option<u64>,
    /// Fraction of the cell count used by [Maze::punch_holes].
    pub hole_fraction: f64,
    /// Step cap of the unconstrained random walk.
    pub walk_step_limit: usize,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            size: DEFAULT_MAZE_SIZE,
            seed: None,
            hole_fraction: DEFAULT_HOLE_FRACTION,
            walk_step_limit: DEFAULT_WALK_STEP_LIMIT,
        }
    }
}

impl MazeConfig {
    pub fn new(size: usize) -> MazeConfig {
        MazeConfig {
            size,
            ..MazeConfig::default()
        }
    }
    pub fn with_seed(mut self, seed: u64) -> MazeConfig {
        self.seed = Some(seed);
        self
    }
    pub fn build(&self) -> Maze<StdRng> {
        let rng = match self.seed {
            Some(state) => StdRng::seed_from_u64(state),
            None => StdRng::from_entropy(),
        };
        let mut maze = Maze::with_rng(self.size, rng);
        maze.hole_fraction = self.hole_fraction;
        maze.walk_step_limit = self.walk_step_limit;
        maze
    }
}

/// A maze together with its carving state and the agent walking it.
///
/// Generation advances one [generate_step](Maze::generate_step) at a time so that a caller
/// can draw between steps. Searches borrow the grid and run to completion.
#[derive(Clone, Debug)]
pub struct Maze<R = StdRng> {
    grid: MazeGrid,
    generator: MazeGenerator,
    agent: Agent,
    rng: R,
    hole_fraction: f64,
    walk_step_limit: usize,
}

impl Maze<StdRng> {
    pub fn new(size: usize) -> Maze<StdRng> {
        MazeConfig::new(size).build()
    }
    pub fn with_seed(size: usize, seed: u64) -> Maze<StdRng> {
        MazeConfig::new(size).with_seed(seed).build()
    }
}

impl<R: RandomSource> Maze<R> {
    /// An uncarved maze drawing its random choices from `rng`.
    pub fn with_rng(size: usize, rng: R) -> Maze<R> {
        let grid = MazeGrid::new(size);
        Maze {
            generator: MazeGenerator::new(&grid),
            grid,
            agent: Agent::new(),
            rng,
            hole_fraction: DEFAULT_HOLE_FRACTION,
            walk_step_limit: DEFAULT_WALK_STEP_LIMIT,
        }
    }

    /// Replaces the maze by a fresh, uncarved one of the given size and resets the agent.
    pub fn reinitialize(&mut self, size: usize) {
        self.grid = MazeGrid::new(size);
        self.generator = MazeGenerator::new(&self.grid);
        self.agent.reset();
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }
    pub fn size(&self) -> usize {
        self.grid.size()
    }
    pub fn agent(&self) -> &Agent {
        &self.agent
    }
    pub fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }
    pub fn walk_step_limit(&self) -> usize {
        self.walk_step_limit
    }
    pub fn set_walk_step_limit(&mut self, limit: usize) {
        self.walk_step_limit = limit;
    }

    /// One carving step.
    pub fn generate_step(&mut self) -> GenerationState {
        self.generator.step(&mut self.grid, &mut self.rng)
    }
    /// Carves until done, returning the number of steps it took.
    pub fn generate_complete(&mut self) -> usize {
        self.generator.generate(&mut self.grid, &mut self.rng)
    }
    pub fn is_complete(&self) -> bool {
        self.generator.is_complete()
    }
    /// The cell the generator is currently at.
    pub fn current_cell(&self) -> Point {
        self.generator.current()
    }
    /// Depth of the generator's backtracking stack.
    pub fn step_count(&self) -> usize {
        self.generator.stack_depth()
    }

    pub fn cell(&self, i: i32, j: i32) -> Option<&Cell> {
        self.grid.cell(&Point::new(i, j))
    }
    /// Sets the given sides of a single cell. The adjacent cells are not updated.
    pub fn modify_cell(&mut self, i: i32, j: i32, edit: WallEdit) -> MazeResult<()> {
        self.grid.modify_cell(&Point::new(i, j), edit)
    }
    /// Sets the given sides of a cell and the facing sides of its neighbours.
    pub fn edit_walls(&mut self, i: i32, j: i32, edit: WallEdit) -> MazeResult<()> {
        self.grid.modify_cell_mirrored(&Point::new(i, j), edit)
    }
    pub fn count_walls(&self) -> usize {
        self.grid.count_walls()
    }

    /// Opens `floor(cells * fraction)` randomly chosen sides of randomly chosen cells, one side
    /// at a time. Nothing keeps the maze connected or the walls symmetric, and a side that is
    /// already open can be drawn again. Returns how many walls were actually removed.
    ///
    /// `fraction` must lie in `0.0..=1.0`, so there are never more attempts than cells.
    pub fn create_random_holes(&mut self, fraction: f64) -> MazeResult<usize> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(MazeError::InvalidHoleFraction(fraction));
        }
        let cells = self.grid.len();
        if cells == 0 {
            return Ok(0);
        }
        let attempts = (cells as f64 * fraction).floor() as usize;
        let mut removed = 0;
        for _ in 0..attempts {
            let point = self.grid.point_at(self.rng.pick(cells));
            let dir = Direction::ALL[self.rng.pick(Direction::ALL.len())];
            if self.grid.punch_hole(&point, dir)? {
                removed += 1;
            }
        }
        info!("Punched {} holes in {} attempts", removed, attempts);
        Ok(removed)
    }

    /// [create_random_holes](Self::create_random_holes) with the configured fraction.
    pub fn punch_holes(&mut self) -> MazeResult<usize> {
        self.create_random_holes(self.hole_fraction)
    }

    /// Path from start to goal found by `algorithm`; empty if there is none.
    pub fn solve(&mut self, algorithm: Algorithm) -> Vec<Point> {
        algorithm.run_with_limit(&self.grid, &mut self.rng, self.walk_step_limit)
    }

    /// Resets the agent and moves it along the path found by `algorithm`, one cell per move.
    /// The agent stays at its reset state if there is no path.
    pub fn traverse(&mut self, algorithm: Algorithm) -> MazeResult<Vec<Point>> {
        self.agent.reset();
        let path = self.solve(algorithm);
        if path.is_empty() {
            return Err(MazeError::NoPath {
                start: self.grid.start(),
                goal: self.grid.goal(),
            });
        }
        for p in &path {
            self.agent.move_to(p.i, p.j);
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(size: usize, seed: u64) -> Maze {
        let mut maze = Maze::with_seed(size, seed);
        maze.generate_complete();
        maze
    }

    #[test]
    fn stepwise_generation_completes() {
        let mut maze = Maze::with_seed(8, 11);
        assert!(!maze.is_complete());
        let mut steps = 0;
        while maze.generate_step() == GenerationState::Active {
            steps += 1;
            assert!(maze.grid().in_bounds(&maze.current_cell()));
        }
        assert!(steps > 0);
        assert!(maze.is_complete());
        assert_eq!(maze.step_count(), 0);
        assert!(maze.grid().is_perfect());
        assert_eq!(maze.grid().carved_pairs(), 63);
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(generated(12, 4).grid(), generated(12, 4).grid());
        assert_ne!(generated(12, 4).grid(), generated(12, 5).grid());
    }

    #[test]
    fn two_by_two_scenario() {
        for seed in 0..16 {
            let mut maze = generated(2, seed);
            assert_eq!(maze.grid().carved_pairs(), 3);
            assert!(maze.grid().reachable(&Point::new(0, 0), &Point::new(1, 1)));
            assert!(maze.grid().reachable(&Point::new(0, 0), &Point::new(0, 1)));
            let path = maze.solve(Algorithm::Bfs);
            assert_eq!(path.len(), 3);
            let (start, goal) = (maze.grid().start(), maze.grid().goal());
            assert!(maze.grid().is_valid_path(&path, &start, &goal));
        }
    }

    #[test]
    fn every_algorithm_reaches_the_goal() {
        let mut maze = generated(10, 2);
        let bfs = maze.solve(Algorithm::Bfs);
        for algorithm in Algorithm::ALL {
            let path = maze.solve(algorithm);
            assert_eq!(path.first(), Some(&Point::new(0, 0)));
            assert_eq!(path.last(), Some(&Point::new(9, 9)));
            assert!(bfs.len() <= path.len());
        }
    }

    #[test]
    fn traverse_replays_path_on_agent() {
        let mut maze = generated(8, 3);
        maze.agent_mut().move_to(4, 4);
        let path = maze.traverse(Algorithm::Astar).unwrap();
        assert_eq!(maze.agent().counter(), path.len());
        assert_eq!(maze.agent().trail(), path.as_slice());
        assert_eq!(maze.agent().position(), Point::new(7, 7));
    }

    #[test]
    fn traverse_without_path() {
        let mut maze = Maze::with_seed(8, 0);
        maze.agent_mut().move_to(1, 0);
        assert_eq!(
            maze.traverse(Algorithm::Bfs),
            Err(MazeError::NoPath {
                start: Point::new(0, 0),
                goal: Point::new(7, 7)
            })
        );
        assert_eq!(maze.agent().counter(), 0);
        assert!(maze.agent().trail().is_empty());
    }

    #[test]
    fn holes_only_remove_walls() {
        for seed in 0..10 {
            let mut maze = generated(10, seed);
            let before = maze.count_walls();
            let removed = maze.create_random_holes(0.1).unwrap();
            let after = maze.count_walls();
            assert!(removed <= 10);
            assert_eq!(before - after, removed);
        }
    }

    #[test]
    fn hole_fraction_is_validated() {
        let mut maze = generated(8, 0);
        let walls = maze.count_walls();
        for fraction in [-0.1, 1.5, 1e30, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                maze.create_random_holes(fraction),
                Err(MazeError::InvalidHoleFraction(_))
            ));
        }
        assert_eq!(maze.count_walls(), walls);
        assert_eq!(maze.create_random_holes(0.0), Ok(0));
        let removed = maze.create_random_holes(1.0).unwrap();
        assert!(removed <= 64);
        assert_eq!(maze.count_walls(), walls - removed);
        assert_eq!(Maze::with_seed(0, 0).create_random_holes(0.5), Ok(0));
    }

    #[test]
    fn configured_hole_fraction() {
        let mut maze = MazeConfig {
            hole_fraction: 0.5,
            ..MazeConfig::new(8).with_seed(9)
        }
        .build();
        maze.generate_complete();
        let before = maze.count_walls();
        let removed = maze.punch_holes().unwrap();
        assert!(removed <= 32);
        assert_eq!(before - maze.count_walls(), removed);
    }

    #[test]
    fn manual_edits() {
        let mut maze = generated(8, 1);
        maze.modify_cell(3, 3, WallEdit::side(Direction::North, false))
            .unwrap();
        assert!(!maze.cell(3, 3).unwrap().has_wall(Direction::North));
        assert!(matches!(
            maze.modify_cell(8, 0, WallEdit::default()),
            Err(MazeError::OutOfBounds { .. })
        ));
        assert!(matches!(
            maze.edit_walls(-1, 0, WallEdit::default()),
            Err(MazeError::OutOfBounds { .. })
        ));
        maze.edit_walls(5, 5, WallEdit::all(true, true, true, true))
            .unwrap();
        assert!(maze.cell(5, 4).unwrap().has_wall(Direction::South));
        assert!(maze.cell(6, 5).unwrap().has_wall(Direction::West));
        assert!(maze.cell(5, 6).unwrap().has_wall(Direction::North));
        assert!(maze.cell(4, 5).unwrap().has_wall(Direction::East));
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        let mut maze = generated(8, 6);
        maze.edit_walls(7, 7, WallEdit::all(true, true, true, true))
            .unwrap();
        for algorithm in Algorithm::ALL.into_iter().filter(Algorithm::respects_walls) {
            assert!(maze.solve(algorithm).is_empty(), "{algorithm}");
        }
    }

    #[test]
    fn reinitialize_resets_everything() {
        let mut maze = generated(8, 7);
        maze.traverse(Algorithm::Dfs).unwrap();
        maze.reinitialize(9);
        assert_eq!(maze.size(), 9);
        assert!(!maze.is_complete());
        assert_eq!(maze.count_walls(), 9 * 9 * 4);
        assert_eq!(maze.agent().counter(), 0);
        maze.generate_complete();
        assert!(maze.grid().is_perfect());
    }

    #[test]
    fn walk_step_limit_is_applied() {
        let mut maze = generated(16, 8);
        maze.set_walk_step_limit(1);
        assert_eq!(maze.walk_step_limit(), 1);
        assert!(maze.solve(Algorithm::TrueRandomWalk).is_empty());
    }
}
