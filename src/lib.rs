// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

pub mod data;
pub mod lookup;
pub mod puzzle;
pub mod search;
pub mod solver;
pub mod state;
pub mod taboo;
pub mod vec2d;
pub mod warehouse;

pub use crate::solver::{SolverErr, SolverOk};
pub use crate::warehouse::LoadWarehouse;

pub trait Solve {
    fn solve(&self, print_status: bool) -> Result<SolverOk, SolverErr>;
}
