use log::debug;
use smallvec::SmallVec;

use crate::{
    astar::astar,
    maze_grid::MazeGrid,
    point::Point,
    random::RandomSource,
    solver::{heuristic, GridSolver},
};

/// Unit cost of moving between two adjacent cells.
const STEP_COST: i32 = 1;

/// A* through open walls with [heuristic] as estimate. With `heuristic_factor` at its default
/// of 1 the estimate is admissible and the returned path is a shortest one.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: i32,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1,
        }
    }
}

impl GridSolver for AstarSolver {
    fn find_path<R>(
        &self,
        grid: &MazeGrid,
        start: Point,
        goal: Point,
        _rng: &mut R,
    ) -> Option<Vec<Point>>
    where
        R: RandomSource + ?Sized,
    {
        if !grid.in_bounds(&start) || !grid.in_bounds(&goal) {
            return None;
        }
        astar(
            &start,
            |node| {
                grid.open_neighbors(node)
                    .into_iter()
                    .map(|p| (p, STEP_COST))
                    .collect::<SmallVec<[(Point, i32); 4]>>()
            },
            |point| heuristic(point, &goal) * self.heuristic_factor,
            |point| *point == goal,
        )
        .map(|(path, cost)| {
            debug!("A* path from {} to {} costs {}", start, goal, cost);
            path
        })
    }
}
