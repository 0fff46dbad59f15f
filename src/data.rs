use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::Add;

/// Cost of a (partial) solution path - worker steps plus weighted box pushes.
pub type Cost = u64;

/// Weight of a box, multiplies the distance it gets pushed.
pub type Weight = u64;

/// A cell coordinate. Origin is the top left corner,
/// `x` points right (columns), `y` points down (rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Pos {
        Pos { x, y }
    }

    /// Manhattan distance.
    pub fn dist(self, other: Pos) -> u64 {
        (i64::from(self.x - other.x).abs() + i64::from(self.y - other.y).abs()) as u64
    }

    /// Reading order: row by row, left to right.
    /// Sorted wall/taboo lists use this order so they can be binary searched.
    pub fn reading_order(self, other: Pos) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

impl Dir {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dx, dy) = dir.offset();
        Pos::new(self.x + dx, self.y + dy)
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "Up"),
            Dir::Down => write!(f, "Down"),
            Dir::Left => write!(f, "Left"),
            Dir::Right => write!(f, "Right"),
        }
    }
}
