use crate::error::{MazeError, MazeResult};
use crate::point::{Direction, Point};
use core::fmt;
use fxhash::FxHashSet;
use itertools::Itertools;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// A single maze cell. `walls` is indexed by [Direction::num], `true` meaning the side is
/// closed. `visited` is only meaningful while the maze is being carved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub walls: [bool; 4],
    pub visited: bool,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            walls: [true; 4],
            visited: false,
        }
    }
}

impl Cell {
    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.num()]
    }
    pub fn set_wall(&mut self, dir: Direction, wall: bool) {
        self.walls[dir.num()] = wall;
    }
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }
}

/// Partial wall assignment for a manual edit. Sides left at [None] are not touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WallEdit {
    pub north: Option<bool>,
    pub east: Option<bool>,
    pub south: Option<bool>,
    pub west: Option<bool>,
}

impl WallEdit {
    /// An edit setting all four sides.
    pub fn all(north: bool, east: bool, south: bool, west: bool) -> WallEdit {
        WallEdit {
            north: Some(north),
            east: Some(east),
            south: Some(south),
            west: Some(west),
        }
    }
    /// An edit touching a single side.
    pub fn side(dir: Direction, wall: bool) -> WallEdit {
        WallEdit::default().with(dir, wall)
    }
    pub fn with(mut self, dir: Direction, wall: bool) -> WallEdit {
        match dir {
            Direction::North => self.north = Some(wall),
            Direction::East => self.east = Some(wall),
            Direction::South => self.south = Some(wall),
            Direction::West => self.west = Some(wall),
        }
        self
    }
    pub fn get(&self, dir: Direction) -> Option<bool> {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

/// [MazeGrid] owns the `size`×`size` cells of a maze, stored column-major: the cell at
/// `(i, j)` lives at index `j + i * size`. Walls are stored per cell, so the two sides of a
/// wall only agree if every mutation keeps them in sync; [carve](Self::carve) does,
/// [modify_cell](Self::modify_cell) and [punch_hole](Self::punch_hole) deliberately do not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl MazeGrid {
    /// A fully walled, unvisited grid.
    pub fn new(size: usize) -> MazeGrid {
        MazeGrid {
            size,
            cells: vec![Cell::default(); size * size],
        }
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    /// Start of every search, the first cell in storage order.
    pub fn start(&self) -> Point {
        Point::new(0, 0)
    }
    /// Goal of every search, the last cell in storage order.
    pub fn goal(&self) -> Point {
        let last = self.size as i32 - 1;
        Point::new(last, last)
    }
    pub fn in_bounds(&self, point: &Point) -> bool {
        point.i >= 0
            && point.j >= 0
            && (point.i as usize) < self.size
            && (point.j as usize) < self.size
    }
    pub fn get_ix_point(&self, point: &Point) -> Option<usize> {
        self.in_bounds(point)
            .then(|| point.j as usize + point.i as usize * self.size)
    }
    /// Inverse of [get_ix_point](Self::get_ix_point).
    pub fn point_at(&self, ix: usize) -> Point {
        Point::new((ix / self.size) as i32, (ix % self.size) as i32)
    }
    pub fn cell(&self, point: &Point) -> Option<&Cell> {
        self.get_ix_point(point).map(|ix| &self.cells[ix])
    }
    pub fn cell_mut(&mut self, point: &Point) -> Option<&mut Cell> {
        self.get_ix_point(point).map(move |ix| &mut self.cells[ix])
    }
    fn checked_cell_mut(&mut self, point: &Point) -> MazeResult<&mut Cell> {
        let size = self.size;
        self.cell_mut(point).ok_or(MazeError::OutOfBounds {
            point: *point,
            size,
        })
    }
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.cells.len()).map(move |ix| self.point_at(ix))
    }

    /// The cell one step from `point` in direction `dir`, if it lies on the grid.
    pub fn neighbor(&self, point: &Point, dir: Direction) -> Option<Point> {
        let n = point.neighbor(dir);
        self.in_bounds(&n).then_some(n)
    }
    /// All grid-adjacent cells regardless of walls, in canonical order.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; 4]> {
        point
            .neumann_neighborhood()
            .into_iter()
            .filter(|p| self.in_bounds(p))
            .collect()
    }
    /// Neighbours reachable through an open side of `point` itself, in canonical order.
    /// The facing wall of the neighbour is not consulted.
    pub fn open_neighbors(&self, point: &Point) -> SmallVec<[Point; 4]> {
        let Some(cell) = self.cell(point) else {
            return SmallVec::new();
        };
        Direction::ALL
            .into_iter()
            .filter(|&d| !cell.has_wall(d))
            .filter_map(|d| self.neighbor(point, d))
            .collect()
    }
    /// Whether a step from `a` to the adjacent `b` is allowed by `a`'s walls.
    pub fn can_move_to(&self, a: &Point, b: &Point) -> bool {
        match (a.dir_to(b), self.cell(a)) {
            (Some(dir), Some(cell)) => self.in_bounds(b) && !cell.has_wall(dir),
            _ => false,
        }
    }

    /// Clears the wall between two adjacent cells on both sides.
    pub fn carve(&mut self, a: &Point, b: &Point) -> MazeResult<()> {
        let dir = a.dir_to(b).ok_or(MazeError::NotAdjacent(*a, *b))?;
        // Validate both before mutating either.
        self.checked_cell_mut(b)?;
        self.checked_cell_mut(a)?.set_wall(dir, false);
        self.checked_cell_mut(b)?.set_wall(dir.opposite(), false);
        Ok(())
    }

    /// Sets the provided sides of the cell at `point`. Other cells are left alone, keeping the
    /// neighbours consistent is up to the caller.
    pub fn modify_cell(&mut self, point: &Point, edit: WallEdit) -> MazeResult<()> {
        let cell = self.checked_cell_mut(point)?;
        for dir in Direction::ALL {
            if let Some(wall) = edit.get(dir) {
                cell.set_wall(dir, wall);
            }
        }
        Ok(())
    }

    /// Like [modify_cell](Self::modify_cell) but also applies each provided side to the facing
    /// wall of the neighbour in that direction, when there is one.
    pub fn modify_cell_mirrored(&mut self, point: &Point, edit: WallEdit) -> MazeResult<()> {
        self.modify_cell(point, edit)?;
        for dir in Direction::ALL {
            if let (Some(wall), Some(n)) = (edit.get(dir), self.neighbor(point, dir)) {
                self.modify_cell(&n, WallEdit::side(dir.opposite(), wall))?;
            }
        }
        Ok(())
    }

    /// Opens one side of one cell. Returns whether a wall was actually removed.
    pub fn punch_hole(&mut self, point: &Point, dir: Direction) -> MazeResult<bool> {
        let cell = self.checked_cell_mut(point)?;
        let had_wall = cell.has_wall(dir);
        cell.set_wall(dir, false);
        Ok(had_wall)
    }

    pub(crate) fn set_visited(&mut self, point: &Point) {
        if let Some(cell) = self.cell_mut(point) {
            cell.visited = true;
        }
    }
    pub fn is_visited(&self, point: &Point) -> bool {
        self.cell(point).map_or(false, |c| c.visited)
    }

    /// Total number of closed sides over all cells.
    pub fn count_walls(&self) -> usize {
        self.cells.iter().map(Cell::wall_count).sum()
    }

    /// Pairs of adjacent cells whose shared wall is open from both sides. Only the east and
    /// south side of every cell are inspected so each pair is counted once.
    pub fn carved_pairs(&self) -> usize {
        self.adjacent_pairs()
            .filter(|(a, b, dir)| self.passage_open(a, b, *dir))
            .count()
    }

    /// Whether both sides of every interior wall agree.
    pub fn is_symmetric(&self) -> bool {
        self.adjacent_pairs().all(|(a, b, dir)| {
            let (Some(ca), Some(cb)) = (self.cell(&a), self.cell(&b)) else {
                return false;
            };
            ca.has_wall(dir) == cb.has_wall(dir.opposite())
        })
    }

    fn adjacent_pairs(&self) -> impl Iterator<Item = (Point, Point, Direction)> + '_ {
        self.points().flat_map(move |p| {
            [Direction::East, Direction::South]
                .into_iter()
                .filter_map(move |d| self.neighbor(&p, d).map(|n| (p, n, d)))
        })
    }

    fn passage_open(&self, a: &Point, b: &Point, dir: Direction) -> bool {
        match (self.cell(a), self.cell(b)) {
            (Some(ca), Some(cb)) => !ca.has_wall(dir) && !cb.has_wall(dir.opposite()),
            _ => false,
        }
    }

    /// Builds a [UnionFind] structure over cell indices, joining two adjacent cells when the
    /// wall between them is open from at least one side.
    pub fn components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.cells.len());
        for (a, b, _) in self.adjacent_pairs() {
            if self.can_move_to(&a, &b) || self.can_move_to(&b, &a) {
                if let (Some(a_ix), Some(b_ix)) = (self.get_ix_point(&a), self.get_ix_point(&b)) {
                    components.union(a_ix, b_ix);
                }
            }
        }
        components
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.get_ix_point(start), self.get_ix_point(goal)) {
            (Some(s), Some(g)) => self.components().equiv(s, g),
            _ => false,
        }
    }

    /// A perfect maze has symmetric walls and its passages form a spanning tree: every cell is
    /// connected and no passage closes a cycle.
    pub fn is_perfect(&self) -> bool {
        if !self.is_symmetric() {
            return false;
        }
        let mut components = UnionFind::new(self.cells.len());
        let mut joined = 0;
        for (a, b, dir) in self.adjacent_pairs() {
            if !self.passage_open(&a, &b, dir) {
                continue;
            }
            let (Some(a_ix), Some(b_ix)) = (self.get_ix_point(&a), self.get_ix_point(&b)) else {
                return false;
            };
            // union returns false if both cells were already connected, i.e. a cycle
            if !components.union(a_ix, b_ix) {
                return false;
            }
            joined += 1;
        }
        joined + 1 == self.cells.len()
    }

    /// Checks that `path` starts at `start`, ends at `goal` and only crosses open walls.
    pub fn is_valid_path(&self, path: &[Point], start: &Point, goal: &Point) -> bool {
        path.first() == Some(start)
            && path.last() == Some(goal)
            && path.iter().tuple_windows().all(|(a, b)| self.can_move_to(a, b))
    }

    /// ASCII rendering with the cells of `path` marked by `*`.
    pub fn render(&self, path: &[Point]) -> String {
        let on_path: FxHashSet<Point> = path.iter().copied().collect();
        let n = self.size as i32;
        let mut out = String::new();
        for j in 0..n {
            for i in 0..n {
                let north = self.wall_at(i, j, Direction::North);
                out.push('+');
                out.push_str(if north { "---" } else { "   " });
            }
            out.push_str("+\n");
            for i in 0..n {
                out.push(if self.wall_at(i, j, Direction::West) { '|' } else { ' ' });
                out.push_str(if on_path.contains(&Point::new(i, j)) { " * " } else { "   " });
            }
            out.push(if self.wall_at(n - 1, j, Direction::East) { '|' } else { ' ' });
            out.push('\n');
        }
        for i in 0..n {
            out.push('+');
            out.push_str(if self.wall_at(i, n - 1, Direction::South) { "---" } else { "   " });
        }
        if n > 0 {
            out.push('+');
        }
        out.push('\n');
        out
    }

    fn wall_at(&self, i: i32, j: i32, dir: Direction) -> bool {
        self.cell(&Point::new(i, j)).map_or(true, |c| c.has_wall(dir))
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(&[]))
    }
}
