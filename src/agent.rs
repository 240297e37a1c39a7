use crate::point::Point;

/// The bot that replays a found path. It keeps its position, a move counter and the trail of
/// cells it has entered since the last [reset](Agent::reset).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Agent {
    position: Point,
    counter: usize,
    trail: Vec<Point>,
}

impl Agent {
    pub fn new() -> Agent {
        Agent::default()
    }
    pub fn move_to(&mut self, i: i32, j: i32) {
        self.position = Point::new(i, j);
        self.counter += 1;
        self.trail.push(self.position);
    }
    /// Back to the start cell with an empty trail.
    pub fn reset(&mut self) {
        *self = Agent::default();
    }
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn counter(&self) -> usize {
        self.counter
    }
    pub fn trail(&self) -> &[Point] {
        &self.trail
    }
}
