use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::data::{Pos, Weight};

/// The static description of a puzzle plus the current box/worker placement.
///
/// `walls` and `boxes` are sorted in reading order. The i-th box corresponds
/// to the i-th weight - this pairing is the box identity and every transition
/// preserves it.
#[derive(Clone)]
pub struct Warehouse {
    pub walls: Vec<Pos>,
    pub targets: Vec<Pos>,
    pub boxes: Vec<Pos>,
    pub worker: Pos,
    pub weights: Vec<Weight>,
    pub ncols: i32,
    pub nrows: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErr {
    NoWalls,
    NoWorker,
    MultipleWorkers,
    InvalidCell(i32, i32),
    WeightsBoxesMismatch,
}

impl Display for ParseErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParseErr::NoWalls => write!(f, "Warehouse with no walls"),
            ParseErr::NoWorker => write!(f, "No worker"),
            ParseErr::MultipleWorkers => write!(f, "More than one worker"),
            ParseErr::InvalidCell(x, y) => write!(f, "Invalid cell at [{}, {}]", x, y),
            ParseErr::WeightsBoxesMismatch => {
                write!(f, "Number of weights doesn't match number of boxes")
            }
        }
    }
}

impl Error for ParseErr {}

impl FromStr for Warehouse {
    type Err = ParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        parse_lines(&lines)
    }
}

pub trait LoadWarehouse {
    fn load_warehouse(&self) -> Result<Warehouse, Box<dyn Error>>;
}

impl<P: AsRef<Path>> LoadWarehouse for P {
    fn load_warehouse(&self) -> Result<Warehouse, Box<dyn Error>> {
        let text = fs::read_to_string(self)?;
        Ok(text.parse()?)
    }
}

fn parse_lines(lines: &[&str]) -> Result<Warehouse, ParseErr> {
    // An optional first line carries box weights - it has no walls
    // so it never collides with the grid itself.
    let weights = parse_weights(lines.first().copied().unwrap_or(""));

    // canonical form: crop to the bounding box of the walls,
    // dropping rows without any wall
    let first_wall_row = lines
        .iter()
        .position(|line| line.contains('#'))
        .ok_or(ParseErr::NoWalls)?;
    let first_wall_col = lines
        .iter()
        .filter_map(|line| line.find('#'))
        .min()
        .unwrap();
    let grid_lines: Vec<&str> = lines[first_wall_row..]
        .iter()
        .filter(|line| line.contains('#'))
        .map(|line| &line[first_wall_col..])
        .collect();

    let ncols = 1 + grid_lines
        .iter()
        .map(|line| line.rfind('#').unwrap() as i32)
        .max()
        .unwrap();
    let nrows = grid_lines.len() as i32;

    let mut walls = Vec::new();
    let mut targets = Vec::new();
    let mut boxes = Vec::new();
    let mut worker = None;

    for (y, line) in grid_lines.iter().enumerate() {
        for (x, cell) in line.chars().enumerate() {
            let pos = Pos::new(x as i32, y as i32);
            match cell {
                '#' => walls.push(pos),
                '.' => targets.push(pos),
                '$' => boxes.push(pos),
                '*' => {
                    boxes.push(pos);
                    targets.push(pos);
                }
                '@' | '!' => {
                    if worker.replace(pos).is_some() {
                        return Err(ParseErr::MultipleWorkers);
                    }
                    if cell == '!' {
                        targets.push(pos);
                    }
                }
                ' ' => {}
                _ => return Err(ParseErr::InvalidCell(pos.x, pos.y)),
            }
        }
    }

    let worker = worker.ok_or(ParseErr::NoWorker)?;

    // scan order above is already reading order for walls,
    // boxes mix '$' and '*' occurrences so sort again
    boxes.sort_by(|a, b| a.reading_order(*b));

    let weights = match weights {
        Some(weights) => {
            if weights.len() != boxes.len() {
                return Err(ParseErr::WeightsBoxesMismatch);
            }
            weights
        }
        None => vec![0; boxes.len()],
    };

    Ok(Warehouse {
        walls,
        targets,
        boxes,
        worker,
        weights,
        ncols,
        nrows,
    })
}

fn parse_weights(line: &str) -> Option<Vec<Weight>> {
    let weights: Option<Vec<Weight>> = line
        .split_whitespace()
        .map(|token| token.parse().ok())
        .collect();
    weights.filter(|w| !w.is_empty())
}

impl Display for Warehouse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut grid = vec![vec![' '; self.ncols as usize]; self.nrows as usize];
        for &w in &self.walls {
            grid[w.y as usize][w.x as usize] = '#';
        }
        for &t in &self.targets {
            grid[t.y as usize][t.x as usize] = '.';
        }
        for &b in &self.boxes {
            let cell = &mut grid[b.y as usize][b.x as usize];
            *cell = if *cell == '.' { '*' } else { '$' };
        }
        let cell = &mut grid[self.worker.y as usize][self.worker.x as usize];
        *cell = if *cell == '.' { '!' } else { '@' };

        for (y, row) in grid.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

impl Debug for Warehouse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
