use fxhash::{FxHashMap, FxHashSet};
use log::{debug, warn};
use smallvec::SmallVec;

use crate::{
    maze_grid::MazeGrid,
    point::Point,
    random::{choose, RandomSource},
    solver::{reconstruct_path, GridSolver},
    DEFAULT_WALK_STEP_LIMIT,
};

/// Random walk through open walls that never re-enters a visited cell. When every open
/// neighbour has been visited it backs up to the cell it came from. Getting stuck at a cell
/// without a parent, which can only be the start, means the goal is unreachable.
///
/// The returned path is rebuilt from the parent links, so dead ends that were backed out of
/// are not part of it.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomWalkSolver;

impl GridSolver for RandomWalkSolver {
    fn find_path<R>(
        &self,
        grid: &MazeGrid,
        start: Point,
        goal: Point,
        rng: &mut R,
    ) -> Option<Vec<Point>>
    where
        R: RandomSource + ?Sized,
    {
        if !grid.in_bounds(&start) {
            return None;
        }
        let mut current = start;
        let mut visited: FxHashSet<Point> = FxHashSet::default();
        let mut came_from: FxHashMap<Point, Point> = FxHashMap::default();
        let mut backtracks = 0usize;

        while current != goal {
            visited.insert(current);
            let unvisited = grid
                .open_neighbors(&current)
                .into_iter()
                .filter(|p| !visited.contains(p))
                .collect::<SmallVec<[Point; 4]>>();

            match choose(rng, &unvisited) {
                Some(&next) => {
                    came_from.insert(next, current);
                    current = next;
                }
                None => match came_from.get(&current) {
                    Some(&parent) => {
                        backtracks += 1;
                        current = parent;
                    }
                    None => {
                        debug!(
                            "Random walk is stuck at {} after visiting {} cells",
                            current,
                            visited.len()
                        );
                        return None;
                    }
                },
            }
        }
        debug!(
            "Random walk reached {} after visiting {} cells and {} backtracks",
            goal,
            visited.len(),
            backtracks
        );
        reconstruct_path(&came_from, start, goal)
    }
}

/// Random walk that ignores walls entirely: every step goes to a uniformly chosen grid-adjacent
/// cell, revisits included, and every cell stepped on is part of the returned sequence. Consecutive
/// cells are therefore adjacent but not necessarily connected by an open wall.
///
/// Nothing guarantees that the goal is ever hit, so the walk gives up after `max_steps` steps.
#[derive(Clone, Copy, Debug)]
pub struct TrueRandomWalkSolver {
    pub max_steps: usize,
}

impl Default for TrueRandomWalkSolver {
    fn default() -> TrueRandomWalkSolver {
        TrueRandomWalkSolver::with_max_steps(DEFAULT_WALK_STEP_LIMIT)
    }
}

impl TrueRandomWalkSolver {
    pub fn with_max_steps(max_steps: usize) -> TrueRandomWalkSolver {
        TrueRandomWalkSolver { max_steps }
    }
}

impl GridSolver for TrueRandomWalkSolver {
    fn find_path<R>(
        &self,
        grid: &MazeGrid,
        start: Point,
        goal: Point,
        rng: &mut R,
    ) -> Option<Vec<Point>>
    where
        R: RandomSource + ?Sized,
    {
        if !grid.in_bounds(&start) || !grid.in_bounds(&goal) {
            return None;
        }
        let mut current = start;
        let mut path = vec![start];
        let mut steps = 0;

        while current != goal {
            if steps == self.max_steps {
                warn!(
                    "Unconstrained random walk gave up after {} steps without reaching {}",
                    steps, goal
                );
                return None;
            }
            let neighbors = grid.neighborhood_points(&current);
            current = *choose(rng, &neighbors)?;
            path.push(current);
            steps += 1;
        }
        Some(path)
    }
}
