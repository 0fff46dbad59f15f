use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use log::debug;

use crate::data::{Cost, Dir};
use crate::puzzle::SokobanPuzzle;
use crate::search::stats::Stats;
use crate::search::astar_graph_search;
use crate::warehouse::Warehouse;
use crate::Solve;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    /// Fewer targets than boxes - no goal configuration can exist.
    MoreBoxesThanTargets,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::MoreBoxesThanTargets => write!(f, "More boxes than targets"),
        }
    }
}

impl Error for SolverErr {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub actions: Vec<Dir>,
    pub total_cost: Cost,
}

pub struct SolverOk {
    /// `None` means the search exhausted the state space - the puzzle is
    /// unsolvable. An already-solved puzzle yields an empty action list
    /// with cost 0 instead.
    pub solution: Option<Solution>,
    pub stats: Stats,
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.solution {
            None => writeln!(f, "No solution")?,
            Some(ref solution) => writeln!(
                f,
                "{} actions, cost {}",
                solution.actions.len(),
                solution.total_cost
            )?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Warehouse {
    fn solve(&self, print_status: bool) -> Result<SolverOk, SolverErr> {
        solve_weighted(self, print_status)
    }
}

/// Solves one warehouse: taboo analysis, then A* graph search over the
/// puzzle's legality/cost/heuristic, then path reconstruction.
pub fn solve_weighted(
    warehouse: &Warehouse,
    print_status: bool,
) -> Result<SolverOk, SolverErr> {
    let puzzle = SokobanPuzzle::new(warehouse)?;
    debug!("starting A* graph search");

    let outcome = astar_graph_search(&puzzle, print_status);
    debug!(
        "search finished, {} nodes created",
        outcome.arena.len()
    );

    let solution = outcome
        .solution()
        .map(|(actions, total_cost)| Solution {
            actions,
            total_cost,
        });
    Ok(SolverOk {
        solution,
        stats: outcome.stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::Pos;
    use crate::puzzle::check_action_seq;
    use crate::search::Problem;

    fn solve(level: &str) -> SolverOk {
        let warehouse: Warehouse = level.parse().unwrap();
        solve_weighted(&warehouse, false).unwrap()
    }

    #[test]
    fn already_solved_is_empty_and_free() {
        let ok = solve(
            "\
#####
#@ *#
#####",
        );
        let solution = ok.solution.unwrap();
        assert!(solution.actions.is_empty());
        assert_eq!(solution.total_cost, 0);
    }

    #[test]
    fn straight_corridor_push() {
        // weight-2 box, three cells to the target, worker aligned:
        // three pushes at 1 + 2 each
        let ok = solve(
            "\
2
#######
#@$  .#
#######",
        );
        let solution = ok.solution.unwrap();
        assert_eq!(solution.actions, [Dir::Right, Dir::Right, Dir::Right]);
        assert_eq!(solution.total_cost, 9);
    }

    #[test]
    fn fewer_targets_than_boxes_fails_up_front() {
        let warehouse: Warehouse = "\
######
#@$$.#
#    #
######"
            .parse()
            .unwrap();
        assert_eq!(
            solve_weighted(&warehouse, false).unwrap_err(),
            SolverErr::MoreBoxesThanTargets
        );
    }

    #[test]
    fn unsolvable_reports_no_solution() {
        // the box is stuck in a corner off target
        let ok = solve(
            "\
####
#@$#
#..#
####",
        );
        assert!(ok.solution.is_none());
        assert!(ok.stats.total_unique_visited() > 0);
    }

    #[test]
    fn solution_round_trips_through_the_checker() {
        let level = "\
1 2
#######
# . . #
# $ $ #
#@    #
#######";
        let mut warehouse: Warehouse = level.parse().unwrap();
        let ok = solve_weighted(&warehouse, false).unwrap();
        let solution = ok.solution.unwrap();

        check_action_seq(&mut warehouse, &solution.actions).unwrap();
        // every box ended up on a target
        for &b in &warehouse.boxes {
            assert!(warehouse.targets.contains(&b));
        }
    }

    #[test]
    fn reported_cost_matches_per_step_costs() {
        let level = "\
3
#######
#  .  #
# @$  #
#     #
#######";
        let warehouse: Warehouse = level.parse().unwrap();
        let ok = solve_weighted(&warehouse, false).unwrap();
        let solution = ok.solution.unwrap();

        let puzzle = SokobanPuzzle::new(&warehouse).unwrap();
        let mut state = puzzle.initial();
        let mut cost = 0;
        for &action in &solution.actions {
            assert!(puzzle.legal(&state, action));
            let next = puzzle.apply(&state, action);
            cost = puzzle.path_cost(cost, &state, action, &next);
            state = next;
        }
        assert!(puzzle.goal_test(&state));
        assert_eq!(cost, solution.total_cost);
        assert_eq!(state.boxes, [Pos::new(3, 1)]);
    }
}
