use core::fmt;
use smallvec::SmallVec;
use std::ops::Add;

/// One of the four cardinal directions. The discriminant doubles as the index of the
/// corresponding wall in a [Cell](crate::maze_grid::Cell), so the canonical order
/// north, east, south, west is also the order in which neighbours are enumerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn num(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Offset in `(i, j)`, i.e. (column, row). North decreases the row.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        write!(f, "{name}")
    }
}

/// Cell coordinate, `i` being the column and `j` the row. Signed so that stepping off the
/// edge of the grid yields a representable point which bounds checks then reject.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub i: i32,
    pub j: i32,
}

impl Point {
    pub const fn new(i: i32, j: i32) -> Point {
        Point { i, j }
    }

    pub fn manhattan_distance(&self, other: &Point) -> i32 {
        (self.i - other.i).abs() + (self.j - other.j).abs()
    }

    pub fn neighbor(&self, dir: Direction) -> Point {
        *self + dir
    }

    /// The four cardinal neighbours in canonical order, in bounds or not.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Point; 4]> {
        Direction::ALL.iter().map(|&d| self.neighbor(d)).collect()
    }

    /// Direction leading from `self` to `other` if the two are grid-adjacent.
    pub fn dir_to(&self, other: &Point) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.neighbor(d) == *other)
    }
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(self, dir: Direction) -> Point {
        let (di, dj) = dir.delta();
        Point::new(self.i + di, self.j + dj)
    }
}

impl From<(i32, i32)> for Point {
    fn from((i, j): (i32, i32)) -> Point {
        Point::new(i, j)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }

    #[test]
    fn neighborhood_follows_canonical_order() {
        let p = Point::new(3, 3);
        let n = p.neumann_neighborhood();
        assert_eq!(
            n.as_slice(),
            &[
                Point::new(3, 2),
                Point::new(4, 3),
                Point::new(3, 4),
                Point::new(2, 3)
            ]
        );
    }

    #[test]
    fn dir_to_only_for_adjacent_points() {
        let p = Point::new(1, 1);
        assert_eq!(p.dir_to(&Point::new(1, 0)), Some(Direction::North));
        assert_eq!(p.dir_to(&Point::new(0, 1)), Some(Direction::West));
        assert_eq!(p.dir_to(&Point::new(2, 2)), None);
        assert_eq!(p.dir_to(&p), None);
    }

    #[test]
    fn manhattan() {
        assert_eq!(Point::new(0, 0).manhattan_distance(&Point::new(3, 4)), 7);
        assert_eq!(Point::new(5, 1).manhattan_distance(&Point::new(2, 3)), 5);
    }
}
