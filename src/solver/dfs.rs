use fxhash::{FxHashMap, FxHashSet};

use crate::{
    maze_grid::MazeGrid,
    point::Point,
    random::RandomSource,
    solver::{reconstruct_path, GridSolver},
};

/// Depth-first search through open walls with an explicit stack. Neighbours are pushed in
/// canonical order, so the last open direction of a cell is explored first. The path found
/// is not necessarily a shortest one.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirstSolver;

impl GridSolver for DepthFirstSolver {
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
        let mut stack = vec![start];
        let mut visited: FxHashSet<Point> = FxHashSet::default();
        let mut came_from: FxHashMap<Point, Point> = FxHashMap::default();
        visited.insert(start);

        while let Some(current) = stack.pop() {
            if current == goal {
                return reconstruct_path(&came_from, start, goal);
            }
            for neighbor in grid.open_neighbors(&current) {
                if visited.insert(neighbor) {
                    came_from.insert(neighbor, current);
                    stack.push(neighbor);
                }
            }
        }
        None
    }
}
