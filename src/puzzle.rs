//! The Sokoban-specific state transition model.
//!
//! Legality, move application and costs are defined for any state with a
//! valid box/weight correspondence. The solver's action generator
//! additionally prunes pushes onto taboo cells; the standalone sequence
//! checker does not - an externally supplied push onto a taboo cell is
//! legal, just never part of a solution.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use log::debug;

use crate::data::{Cost, Dir, Pos, Weight, DIRECTIONS};
use crate::lookup::{linear_search, position_search};
use crate::search::Problem;
use crate::solver::SolverErr;
use crate::state::State;
use crate::taboo::{taboo_cells, TabooSet};
use crate::warehouse::Warehouse;

/// The immutable per-puzzle facts plus the initial state - everything the
/// generic search engine needs, built once per solve call.
#[derive(Debug)]
pub struct SokobanPuzzle {
    /// Sorted in reading order for binary search.
    walls: Vec<Pos>,
    /// Sorted in reading order for binary search.
    targets: Vec<Pos>,
    weights: Vec<Weight>,
    taboo: TabooSet,
    initial: State,
}

impl SokobanPuzzle {
    /// Fails when there are fewer targets than boxes - no placement of
    /// all boxes on targets can exist, checked before any search begins.
    pub fn new(warehouse: &Warehouse) -> Result<Self, SolverErr> {
        if warehouse.targets.len() < warehouse.boxes.len() {
            return Err(SolverErr::MoreBoxesThanTargets);
        }

        let mut walls = warehouse.walls.clone();
        walls.sort_by(|a, b| a.reading_order(*b));
        let mut targets = warehouse.targets.clone();
        targets.sort_by(|a, b| a.reading_order(*b));

        let taboo = taboo_cells(warehouse);
        debug!("taboo cells: {:?}", taboo.cells());

        Ok(SokobanPuzzle {
            walls,
            targets,
            weights: warehouse.weights.clone(),
            taboo,
            initial: State::new(warehouse.boxes.clone(), warehouse.worker),
        })
    }

    pub fn taboo(&self) -> &TabooSet {
        &self.taboo
    }

    pub fn legal(&self, state: &State, dir: Dir) -> bool {
        legal_move(&self.walls, state, dir)
    }

    pub fn apply(&self, state: &State, dir: Dir) -> State {
        apply_move(state, dir)
    }
}

/// Whether the worker may step or push in `dir`: the next cell must not
/// be a wall, and a box there must have a free cell beyond it (no pushing
/// into walls, no double-box pushes).
fn legal_move(walls: &[Pos], state: &State, dir: Dir) -> bool {
    let next = state.worker + dir;
    if position_search(next, walls).is_some() {
        return false;
    }
    if linear_search(next, &state.boxes).is_some() {
        let beyond = next + dir;
        if position_search(beyond, walls).is_some()
            || linear_search(beyond, &state.boxes).is_some()
        {
            return false;
        }
    }
    true
}

/// Precondition: `dir` is legal in `state`. A pushed box keeps its index,
/// preserving the box/weight correspondence.
fn apply_move(state: &State, dir: Dir) -> State {
    let next = state.worker + dir;
    let mut boxes = state.boxes.clone();
    if let Some(i) = linear_search(next, &boxes) {
        boxes[i] = next + dir;
    }
    State::new(boxes, next)
}

impl Problem for SokobanPuzzle {
    type State = State;
    type Action = Dir;

    fn initial(&self) -> State {
        self.initial.clone()
    }

    fn actions(&self, state: &State) -> Vec<Dir> {
        DIRECTIONS
            .iter()
            .filter(|&&dir| self.legal(state, dir))
            .filter(|&&dir| {
                // prune pushes onto taboo cells - the box could never
                // reach a target from there
                let next = state.worker + dir;
                linear_search(next, &state.boxes).is_none()
                    || !self.taboo.contains(next + dir)
            })
            .copied()
            .collect()
    }

    fn result(&self, state: &State, action: Dir) -> State {
        debug_assert!(self.legal(state, action));
        self.apply(state, action)
    }

    /// All boxes on targets; box order doesn't matter here since any box
    /// may occupy any target.
    fn goal_test(&self, state: &State) -> bool {
        state
            .boxes
            .iter()
            .all(|&b| position_search(b, &self.targets).is_some())
    }

    /// One per worker step plus weight times distance for every box that
    /// moved. Defined over any two states with matching box indices, not
    /// just adjacent ones - a single action displaces at most one box by
    /// one cell, so in practice this is `1` or `1 + weight`.
    fn path_cost(&self, cost: Cost, state: &State, _action: Dir, next: &State) -> Cost {
        debug_assert_eq!(state.boxes.len(), next.boxes.len());
        let mut cost = cost + 1;
        for (i, (&old, &new)) in state.boxes.iter().zip(&next.boxes).enumerate() {
            if old != new {
                cost += self.weights[i] * old.dist(new);
            }
        }
        cost
    }

    /// Weighted box-to-nearest-target distances plus the worker's distance
    /// to its nearest box, minus one. Not guaranteed admissible: several
    /// boxes may claim the same nearest target, so A* finds a solution
    /// and its cost but not necessarily an optimal one.
    fn heuristic(&self, state: &State) -> Cost {
        let mut sum = 0;
        for (&box_pos, &weight) in state.boxes.iter().zip(&self.weights) {
            let nearest = self
                .targets
                .iter()
                .map(|&t| box_pos.dist(t))
                .min()
                .unwrap_or(0);
            sum += nearest + weight * nearest;
        }
        let worker_to_box = state
            .boxes
            .iter()
            .map(|&b| state.worker.dist(b))
            .min()
            .unwrap_or(1);
        sum + worker_to_box.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalAction {
    /// Index into the checked sequence.
    pub index: usize,
    pub action: Dir,
}

impl Display for IllegalAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Illegal action {} at index {}", self.action, self.index)
    }
}

impl Error for IllegalAction {}

/// Validates an externally supplied action sequence against a warehouse
/// and applies it in place. Stops at the first illegal action without
/// applying it, leaving the warehouse untouched. Pushes onto taboo cells
/// are legal here.
pub fn check_action_seq(
    warehouse: &mut Warehouse,
    actions: &[Dir],
) -> Result<(), IllegalAction> {
    let mut walls = warehouse.walls.clone();
    walls.sort_by(|a, b| a.reading_order(*b));

    let mut state = State::new(warehouse.boxes.clone(), warehouse.worker);
    for (index, &action) in actions.iter().enumerate() {
        if !legal_move(&walls, &state, action) {
            return Err(IllegalAction { index, action });
        }
        state = apply_move(&state, action);
    }
    warehouse.boxes = state.boxes;
    warehouse.worker = state.worker;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle(level: &str) -> SokobanPuzzle {
        SokobanPuzzle::new(&level.parse().unwrap()).unwrap()
    }

    #[test]
    fn legality() {
        // worker against a wall, a box, and a box against a box
        let p = puzzle(
            "\
######
#@$$.#
#.   #
######",
        );
        let state = p.initial();
        assert!(!p.legal(&state, Dir::Up)); // wall
        assert!(!p.legal(&state, Dir::Left)); // wall
        assert!(!p.legal(&state, Dir::Right)); // box behind box
        assert!(p.legal(&state, Dir::Down));
    }

    #[test]
    fn push_into_wall_is_illegal() {
        let p = puzzle(
            "\
####
#.##
#$@#
####",
        );
        assert!(!p.legal(&p.initial(), Dir::Left));
    }

    #[test]
    fn apply_preserves_box_identity() {
        let p = puzzle(
            "\
1 2
#######
#@$ $.#
#    .#
#######",
        );
        let state = p.initial();
        let next = p.apply(&state, Dir::Right);
        // box 0 moved, box 1 didn't, neither lost nor duplicated
        assert_eq!(next.boxes.len(), state.boxes.len());
        assert_eq!(next.boxes[0], Pos::new(3, 1));
        assert_eq!(next.boxes[1], state.boxes[1]);
        assert_eq!(next.worker, Pos::new(2, 1));
    }

    #[test]
    fn cost_of_move_and_push() {
        let p = puzzle(
            "\
2
#######
#@$  .#
#     #
#######",
        );
        let state = p.initial();

        let plain = p.apply(&state, Dir::Down);
        assert_eq!(p.path_cost(0, &state, Dir::Down, &plain), 1);

        let push = p.apply(&state, Dir::Right);
        assert_eq!(p.path_cost(0, &state, Dir::Right, &push), 3); // 1 + w
        assert_eq!(p.path_cost(10, &state, Dir::Right, &push), 13);
    }

    #[test]
    fn goal_test_ignores_box_order() {
        let p = puzzle(
            "\
######
#@$$ #
#..  #
######",
        );
        let solved = State::new(vec![Pos::new(1, 2), Pos::new(2, 2)], Pos::new(1, 1));
        let permuted = State::new(vec![Pos::new(2, 2), Pos::new(1, 2)], Pos::new(1, 1));
        assert!(p.goal_test(&solved));
        assert!(p.goal_test(&permuted));
        assert!(!p.goal_test(&p.initial()));
    }

    #[test]
    fn actions_prune_taboo_pushes() {
        // pushing right would park the box in the non-target corner (3, 1)
        let p = puzzle(
            "\
#####
#@$ #
#.  #
#####",
        );
        let state = p.initial();
        assert!(p.legal(&state, Dir::Right));
        let actions = p.actions(&state);
        assert!(!actions.contains(&Dir::Right));
        // plain moves are never pruned
        assert!(actions.contains(&Dir::Down));
    }

    #[test]
    fn too_many_boxes() {
        let warehouse: Warehouse = "\
#####
#@$$#
#.  #
#####"
            .parse()
            .unwrap();
        assert_eq!(
            SokobanPuzzle::new(&warehouse).unwrap_err(),
            SolverErr::MoreBoxesThanTargets
        );
    }

    #[test]
    fn checking_action_sequences() {
        let mut warehouse: Warehouse = "\
######
#@$ .#
######"
            .parse()
            .unwrap();

        // taboo pushes are legal when validating external sequences,
        // and a legal sequence updates the warehouse in place
        check_action_seq(&mut warehouse, &[Dir::Right, Dir::Right]).unwrap();
        assert_eq!(warehouse.worker, Pos::new(3, 1));
        assert_eq!(warehouse.boxes, [Pos::new(4, 1)]);
        assert_eq!(warehouse.to_string(), "######\n#  @*#\n######");
    }

    #[test]
    fn illegal_sequence_reports_first_offender() {
        let mut warehouse: Warehouse = "\
######
#@$ .#
######"
            .parse()
            .unwrap();
        let before = warehouse.to_string();

        let err =
            check_action_seq(&mut warehouse, &[Dir::Right, Dir::Up]).unwrap_err();
        assert_eq!(
            err,
            IllegalAction {
                index: 1,
                action: Dir::Up
            }
        );
        // nothing was applied
        assert_eq!(warehouse.to_string(), before);
    }
}
