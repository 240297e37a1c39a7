//! # maze_pathfinding
//!
//! Generates perfect mazes on a square grid with a randomized
//! [iterative backtracker](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Iterative_implementation_(with_stack))
//! and searches them with a family of interchangeable algorithms: breadth-first, depth-first,
//! greedy best-first, [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) and two random
//! walks. Generation runs one step at a time so it can be visualized; the searches run to
//! completion and return the full path from the top-left start cell to the bottom-right goal.
//!
//! Walls are stored per cell and side. Carving keeps the two sides of a shared wall in sync,
//! while manual edits and punched holes may leave them out of sync, in which case a wall can be
//! passable in one direction only.
mod astar;

pub mod agent;
pub mod error;
pub mod generator;
pub mod maze;
pub mod maze_grid;
pub mod point;
pub mod random;
pub mod solver;

pub use crate::agent::Agent;
pub use crate::error::{MazeError, MazeResult};
pub use crate::generator::{GenerationState, MazeGenerator};
pub use crate::maze::{Maze, MazeConfig};
pub use crate::maze_grid::{Cell, MazeGrid, WallEdit};
pub use crate::point::{Direction, Point};
pub use crate::random::RandomSource;
pub use crate::solver::{Algorithm, GridSolver};

/// Side length used when none is given.
pub const DEFAULT_MAZE_SIZE: usize = 10;
/// Smallest side length accepted by the command line front end.
pub const MIN_MAZE_SIZE: usize = 8;
/// Largest side length accepted by the command line front end.
pub const MAX_MAZE_SIZE: usize = 64;
/// Fraction of the cell count used as the number of hole punching attempts.
pub const DEFAULT_HOLE_FRACTION: f64 = 0.1;
/// Number of moves after which the unconstrained random walk gives up.
pub const DEFAULT_WALK_STEP_LIMIT: usize = 1 << 22;
