use std::collections::VecDeque;

use fxhash::{FxHashMap, FxHashSet};

use crate::{
    maze_grid::MazeGrid,
    point::Point,
    random::RandomSource,
    solver::{reconstruct_path, GridSolver},
};

/// Unweighted breadth-first search through open walls. Cells are marked as visited when
/// they are queued, so every cell enters the queue at most once. Returns a shortest path.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstSolver;

impl GridSolver for BreadthFirstSolver {
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
        if !grid.in_bounds(&start) {
            return None;
        }
        let mut queue = VecDeque::from([start]);
        let mut visited: FxHashSet<Point> = FxHashSet::default();
        let mut came_from: FxHashMap<Point, Point> = FxHashMap::default();
        visited.insert(start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                return reconstruct_path(&came_from, start, goal);
            }
            for neighbor in grid.open_neighbors(&current) {
                if visited.insert(neighbor) {
                    came_from.insert(neighbor, current);
                    queue.push_back(neighbor);
                }
            }
        }
        None
    }
}
