//! Randomized iterative backtracker.
//!
//! Carving is split into single steps so that a caller can interleave rendering with
//! generation. Every step either carves a new passage, backtracks one cell, or finishes.

use crate::maze_grid::MazeGrid;
use crate::point::Point;
use crate::random::{choose, RandomSource};
use log::{debug, info, warn};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationState {
    Active,
    Complete,
}

/// Carves a [MazeGrid] into a spanning tree. The backtracking stack is explicit, so the
/// size of the maze is not limited by the call stack.
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    current: Point,
    stack: Vec<Point>,
    visited_count: usize,
    total: usize,
    state: GenerationState,
}

impl MazeGenerator {
    /// A generator for `grid`, starting from its start cell. The grid is expected to be
    /// freshly constructed: all walls present, nothing visited.
    pub fn new(grid: &MazeGrid) -> MazeGenerator {
        let state = if grid.is_empty() {
            GenerationState::Complete
        } else {
            GenerationState::Active
        };
        MazeGenerator {
            current: grid.start(),
            stack: Vec::new(),
            visited_count: 0,
            total: grid.len(),
            state,
        }
    }
    pub fn current(&self) -> Point {
        self.current
    }
    pub fn state(&self) -> GenerationState {
        self.state
    }
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }
    /// Depth of the backtracking stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
    /// True once every cell of the grid has been visited.
    pub fn is_complete(&self) -> bool {
        self.visited_count == self.total
    }

    /// Performs a single generation step on `grid`.
    pub fn step<R>(&mut self, grid: &mut MazeGrid, rng: &mut R) -> GenerationState
    where
        R: RandomSource + ?Sized,
    {
        if self.state == GenerationState::Complete {
            return self.state;
        }
        if !grid.is_visited(&self.current) {
            grid.set_visited(&self.current);
            self.visited_count += 1;
        }
        if self.is_complete() {
            return self.finish();
        }

        let candidates = grid
            .neighborhood_points(&self.current)
            .into_iter()
            .filter(|p| !grid.is_visited(p))
            .collect::<SmallVec<[Point; 4]>>();

        if let Some(&next) = choose(rng, &candidates) {
            if let Err(err) = grid.carve(&self.current, &next) {
                warn!("Generator was handed a foreign grid: {err}");
                return self.finish();
            }
            self.stack.push(self.current);
            self.current = next;
        } else if let Some(previous) = self.stack.pop() {
            debug!("Backtracking from {} to {}", self.current, previous);
            self.current = previous;
        } else {
            return self.finish();
        }
        self.state
    }

    /// Runs steps until the maze is complete and returns the number of steps taken.
    pub fn generate<R>(&mut self, grid: &mut MazeGrid, rng: &mut R) -> usize
    where
        R: RandomSource + ?Sized,
    {
        let mut steps = 0;
        while self.state == GenerationState::Active {
            self.step(grid, rng);
            steps += 1;
        }
        steps
    }

    fn finish(&mut self) -> GenerationState {
        info!(
            "Maze generation finished, {} of {} cells visited",
            self.visited_count, self.total
        );
        self.stack.clear();
        self.state = GenerationState::Complete;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    /// Always takes the first candidate, i.e. the first unvisited neighbour in N, E, S, W order.
    struct FirstChoice;

    impl RandomSource for FirstChoice {
        fn pick(&mut self, _n: usize) -> usize {
            0
        }
    }

    fn generated(size: usize, seed: u64) -> MazeGrid {
        let mut grid = MazeGrid::new(size);
        let mut generator = MazeGenerator::new(&grid);
        generator.generate(&mut grid, &mut StdRng::seed_from_u64(seed));
        assert!(generator.is_complete());
        grid
    }

    #[test]
    fn completed_maze_is_spanning_tree() {
        for size in [1, 2, 3, 8, 17] {
            for seed in 0..10 {
                let grid = generated(size, seed);
                assert_eq!(grid.carved_pairs(), size * size - 1);
                assert!(grid.is_symmetric());
                assert!(grid.is_perfect());
                assert!(grid.cells().iter().all(|c| c.visited));
            }
        }
    }

    #[test]
    fn single_cell_completes_in_one_step() {
        let mut grid = MazeGrid::new(1);
        let mut generator = MazeGenerator::new(&grid);
        let state = generator.step(&mut grid, &mut FirstChoice);
        assert_eq!(state, GenerationState::Complete);
        assert_eq!(grid.count_walls(), 4);
    }

    #[test]
    fn empty_grid_is_complete_immediately() {
        let mut grid = MazeGrid::new(0);
        let mut generator = MazeGenerator::new(&grid);
        assert_eq!(generator.generate(&mut grid, &mut FirstChoice), 0);
        assert!(generator.is_complete());
    }

    #[test]
    fn scripted_choices_carve_expected_maze() {
        // First-choice carving on 3x3 snakes east along the top, down the right edge,
        // back west through the middle and finishes in the bottom left corner.
        let mut grid = MazeGrid::new(3);
        let mut generator = MazeGenerator::new(&grid);
        let steps = generator.generate(&mut grid, &mut FirstChoice);
        assert_eq!(steps, 9);
        assert!(grid.is_perfect());
        let order = [
            (0, 0),
            (1, 0),
            (2, 0),
            (2, 1),
            (2, 2),
            (1, 2),
            (1, 1),
            (0, 1),
            (0, 2),
        ]
        .map(Point::from);
        for pair in order.windows(2) {
            assert!(grid.can_move_to(&pair[0], &pair[1]));
            assert!(grid.can_move_to(&pair[1], &pair[0]));
        }
    }

    #[test]
    fn steps_are_observable() {
        let mut grid = MazeGrid::new(4);
        let mut generator = MazeGenerator::new(&grid);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(generator.current(), Point::new(0, 0));
        generator.step(&mut grid, &mut rng);
        assert_eq!(generator.visited_count(), 1);
        assert_eq!(generator.stack_depth(), 1);
        assert_ne!(generator.current(), Point::new(0, 0));
        assert_eq!(grid.carved_pairs(), 1);
        let mut last_visited = generator.visited_count();
        while generator.step(&mut grid, &mut rng) == GenerationState::Active {
            assert!(generator.visited_count() >= last_visited);
            last_visited = generator.visited_count();
        }
        assert_eq!(generator.visited_count(), 16);
        assert_eq!(generator.stack_depth(), 0);
        // further steps are no-ops
        let before = grid.clone();
        assert_eq!(generator.step(&mut grid, &mut rng), GenerationState::Complete);
        assert_eq!(grid, before);
    }
}
