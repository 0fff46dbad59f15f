use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

/// A dense grid indexed by `Pos`. Rows are padded to the same length.
#[derive(Clone, PartialEq, Eq)]
pub struct Vec2d<T> {
    data: Vec<T>,
    ncols: i32,
    nrows: i32,
}

impl<T: Copy> Vec2d<T> {
    pub fn new(ncols: i32, nrows: i32, default: T) -> Self {
        assert!(ncols > 0 && nrows > 0);
        Vec2d {
            data: vec![default; (ncols * nrows) as usize],
            ncols,
            nrows,
        }
    }

    /// A same-sized grid for marking cells during a scan.
    pub fn scratchpad<U: Copy>(&self, default: U) -> Vec2d<U> {
        Vec2d {
            data: vec![default; self.data.len()],
            ncols: self.ncols,
            nrows: self.nrows,
        }
    }
}

impl<T> Vec2d<T> {
    pub fn ncols(&self) -> i32 {
        self.ncols
    }

    pub fn nrows(&self) -> i32 {
        self.nrows
    }

    pub fn contains_pos(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.ncols && pos.y < self.nrows
    }

    /// Bounds-checked access. Taboo analysis probes neighbors of border
    /// cells, which can land outside the grid.
    pub fn get(&self, pos: Pos) -> Option<&T> {
        if self.contains_pos(pos) {
            Some(&self.data[(pos.y * self.ncols + pos.x) as usize])
        } else {
            None
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (ncols, nrows) = (self.ncols, self.nrows);
        (0..nrows).flat_map(move |y| (0..ncols).map(move |x| Pos::new(x, y)))
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &T {
        assert!(self.contains_pos(pos), "position out of bounds: {}", pos);
        &self.data[(pos.y * self.ncols + pos.x) as usize]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut T {
        assert!(self.contains_pos(pos), "position out of bounds: {}", pos);
        &mut self.data[(pos.y * self.ncols + pos.x) as usize]
    }
}

impl Display for Vec2d<bool> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.ncols as usize) {
            for &cell in row {
                write!(f, "{}", if cell { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Vec2d<bool> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing_and_bounds() {
        let mut grid = Vec2d::new(3, 2, false);
        grid[Pos::new(2, 1)] = true;
        assert!(grid[Pos::new(2, 1)]);
        assert_eq!(grid.get(Pos::new(3, 1)), None);
        assert_eq!(grid.get(Pos::new(0, -1)), None);
        assert_eq!(grid.get(Pos::new(2, 1)), Some(&true));
    }

    #[test]
    fn positions_in_reading_order() {
        let grid = Vec2d::new(2, 2, 0);
        let all: Vec<_> = grid.positions().collect();
        assert_eq!(
            all,
            [
                Pos::new(0, 0),
                Pos::new(1, 0),
                Pos::new(0, 1),
                Pos::new(1, 1)
            ]
        );
    }

    #[test]
    fn bool_grid_display() {
        let mut grid = Vec2d::new(3, 2, false);
        grid[Pos::new(1, 0)] = true;
        assert_eq!(grid.to_string(), "010\n000\n");
    }
}
