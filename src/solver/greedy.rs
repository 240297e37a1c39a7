use fxhash::{FxHashMap, FxHashSet};
use log::debug;

use crate::{
    astar::PriorityFrontier,
    maze_grid::MazeGrid,
    point::Point,
    random::RandomSource,
    solver::{heuristic, reconstruct_path, GridSolver},
};

/// Greedy best-first search: always expands the queued cell closest to the goal by
/// [heuristic], ignoring the distance already travelled. Equal estimates are expanded in the
/// order they were queued. A cell can be queued several times; it is marked visited when first
/// popped and later entries are skipped. Until then its parent is the most recent cell that
/// discovered it.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyBestFirstSolver;

impl GridSolver for GreedyBestFirstSolver {
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
        let start_ix = grid.get_ix_point(&start)?;
        let mut frontier = PriorityFrontier::new();
        let mut visited: FxHashSet<Point> = FxHashSet::default();
        let mut came_from: FxHashMap<Point, Point> = FxHashMap::default();
        frontier.push_estimate(heuristic(&start, &goal), start_ix);

        while let Some(entry) = frontier.pop() {
            let current = grid.point_at(entry.index);
            if current == goal {
                debug!(
                    "Greedy search reached {} with {} entries left in the frontier",
                    goal,
                    frontier.len()
                );
                return reconstruct_path(&came_from, start, goal);
            }
            if !visited.insert(current) {
                continue;
            }
            for neighbor in grid.open_neighbors(&current) {
                if visited.contains(&neighbor) {
                    continue;
                }
                if let Some(ix) = grid.get_ix_point(&neighbor) {
                    came_from.insert(neighbor, current);
                    frontier.push_estimate(heuristic(&neighbor, &goal), ix);
                }
            }
        }
        None
    }
}
