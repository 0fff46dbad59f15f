//! Static taboo analysis.
//!
//! A taboo cell is a non-wall, non-target cell where a box can never rest
//! in any solution. The analysis runs once per warehouse and only looks at
//! walls and targets - current box and worker placement is ignored.

use std::fmt::{self, Debug, Display, Formatter};

use log::debug;

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::lookup::position_search;
use crate::vec2d::Vec2d;
use crate::warehouse::Warehouse;

/// The taboo cells of one warehouse, fixed for its lifetime.
pub struct TabooSet {
    /// Sorted in reading order for binary search.
    cells: Vec<Pos>,
    walls: Vec<Pos>,
    ncols: i32,
    nrows: i32,
}

impl TabooSet {
    pub fn contains(&self, pos: Pos) -> bool {
        position_search(pos, &self.cells).is_some()
    }

    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }
}

/// Renders the analysis result: `#` for walls, `X` for taboo cells,
/// space for everything else. External tooling parses this exact mapping.
impl Display for TabooSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..self.nrows {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.ncols {
                let pos = Pos::new(x, y);
                if position_search(pos, &self.walls).is_some() {
                    write!(f, "#")?;
                } else if self.contains(pos) {
                    write!(f, "X")?;
                } else {
                    write!(f, " ")?;
                }
            }
        }
        Ok(())
    }
}

impl Debug for TabooSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub fn taboo_cells(warehouse: &Warehouse) -> TabooSet {
    let mut walls = Vec2d::new(warehouse.ncols, warehouse.nrows, false);
    for &w in &warehouse.walls {
        walls[w] = true;
    }
    let mut targets = Vec2d::new(warehouse.ncols, warehouse.nrows, false);
    for &t in &warehouse.targets {
        targets[t] = true;
    }

    let interior = find_interior(&walls);
    let mut taboo = corner_rule(&walls, &targets, &interior);
    corridor_rule(&walls, &targets, &interior, &mut taboo);

    let cells: Vec<Pos> = taboo
        .positions()
        .filter(|&pos| taboo[pos])
        .collect();
    debug!("taboo analysis found {} cells", cells.len());

    TabooSet {
        cells,
        walls: warehouse.walls.clone(),
        ncols: warehouse.ncols,
        nrows: warehouse.nrows,
    }
}

/// Cells enclosed by the outer wall boundary. Flood fills the exterior
/// from the grid border; whatever is neither exterior nor wall is interior.
fn find_interior(walls: &Vec2d<bool>) -> Vec2d<bool> {
    let mut exterior = walls.scratchpad(false);
    let mut to_visit = Vec::new();

    for pos in walls.positions() {
        let on_border =
            pos.x == 0 || pos.y == 0 || pos.x == walls.ncols() - 1 || pos.y == walls.nrows() - 1;
        if on_border && !walls[pos] {
            exterior[pos] = true;
            to_visit.push(pos);
        }
    }

    while let Some(cur) = to_visit.pop() {
        for &dir in &DIRECTIONS {
            let next = cur + dir;
            if let Some(false) = exterior.get(next) {
                if !walls[next] {
                    exterior[next] = true;
                    to_visit.push(next);
                }
            }
        }
    }

    let mut interior = walls.scratchpad(false);
    for pos in walls.positions() {
        interior[pos] = !walls[pos] && !exterior[pos];
    }
    interior
}

fn wall_at(walls: &Vec2d<bool>, pos: Pos) -> bool {
    // neighbors of border cells can be off-grid - that's not a wall
    *walls.get(pos).unwrap_or(&false)
}

/// Rule 1: an interior non-target cell with a wall on a vertical neighbor
/// and a wall on a horizontal neighbor is a corner a box can never leave.
fn corner_rule(
    walls: &Vec2d<bool>,
    targets: &Vec2d<bool>,
    interior: &Vec2d<bool>,
) -> Vec2d<bool> {
    let mut taboo = walls.scratchpad(false);
    for pos in walls.positions() {
        if !interior[pos] || targets[pos] {
            continue;
        }
        let vertical = wall_at(walls, pos + Dir::Up)
            || wall_at(walls, pos + Dir::Down);
        let horizontal = wall_at(walls, pos + Dir::Left)
            || wall_at(walls, pos + Dir::Right);
        if vertical && horizontal {
            taboo[pos] = true;
        }
    }
    taboo
}

/// Rule 2: cells on a straight run between two aligned corners are taboo
/// when the whole run hugs a continuous wall on one side and contains
/// no target. A wall or target terminates the run.
fn corridor_rule(
    walls: &Vec2d<bool>,
    targets: &Vec2d<bool>,
    interior: &Vec2d<bool>,
    taboo: &mut Vec2d<bool>,
) {
    // rows: corners aligned on y, walls hug from above or below
    for y in 0..walls.nrows() {
        let corners: Vec<i32> = (0..walls.ncols())
            .filter(|&x| taboo[Pos::new(x, y)])
            .collect();
        for pair in corners.windows(2) {
            let run: Vec<Pos> = (pair[0] + 1..pair[1]).map(|x| Pos::new(x, y)).collect();
            mark_run(walls, targets, interior, taboo, &run, |pos| {
                (
                    pos + Dir::Up,
                    pos + Dir::Down,
                )
            });
        }
    }

    // columns: corners aligned on x, walls hug from the left or right
    for x in 0..walls.ncols() {
        let corners: Vec<i32> = (0..walls.nrows())
            .filter(|&y| taboo[Pos::new(x, y)])
            .collect();
        for pair in corners.windows(2) {
            let run: Vec<Pos> = (pair[0] + 1..pair[1]).map(|y| Pos::new(x, y)).collect();
            mark_run(walls, targets, interior, taboo, &run, |pos| {
                (
                    pos + Dir::Left,
                    pos + Dir::Right,
                )
            });
        }
    }
}

fn mark_run<F>(
    walls: &Vec2d<bool>,
    targets: &Vec2d<bool>,
    interior: &Vec2d<bool>,
    taboo: &mut Vec2d<bool>,
    run: &[Pos],
    sides: F,
) where
    F: Fn(Pos) -> (Pos, Pos),
{
    if run.is_empty() {
        return;
    }
    for &pos in run {
        if walls[pos] || targets[pos] || !interior[pos] {
            return;
        }
    }
    let hugs_one = run.iter().all(|&pos| wall_at(walls, sides(pos).0));
    let hugs_other = run.iter().all(|&pos| wall_at(walls, sides(pos).1));
    if hugs_one || hugs_other {
        for &pos in run {
            taboo[pos] = true;
        }
    }
}
