//! Problem-agnostic search algorithms.
//!
//! All algorithms operate through the [`Problem`] contract only - the
//! Sokoban-specific legality, cost and heuristic logic lives elsewhere.
//! Graph searches deduplicate states, tree searches don't (they are kept
//! for completeness and comparison; on state spaces with many transpositions
//! like Sokoban they blow up).

pub mod frontier;
pub mod node;
pub mod stats;

use std::hash::Hash;

use fnv::FnvHashSet;

use crate::data::Cost;

use self::frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
use self::node::{Arena, Node, NodeId};
use self::stats::Stats;

pub trait Problem {
    type State: Clone + Eq + Hash;
    type Action: Copy;

    fn initial(&self) -> Self::State;

    /// Lazily generated - one child node is built per returned action.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Precondition: `action` came from `actions(state)`.
    fn result(&self, state: &Self::State, action: Self::Action) -> Self::State;

    fn goal_test(&self, state: &Self::State) -> bool;

    /// Cost of reaching `next` from `state` via `action`, given cost
    /// `cost` up to `state`. Defaults to one per step.
    fn path_cost(
        &self,
        cost: Cost,
        _state: &Self::State,
        _action: Self::Action,
        _next: &Self::State,
    ) -> Cost {
        cost + 1
    }

    /// Estimated remaining cost. Defaults to zero (uninformed).
    fn heuristic(&self, _state: &Self::State) -> Cost {
        0
    }
}

/// What a finished search hands back: the node arena, the goal node
/// if one was reached, and the bookkeeping.
pub struct SearchOutcome<S, A> {
    pub arena: Arena<S, A>,
    pub goal: Option<NodeId>,
    pub stats: Stats,
}

impl<S, A: Copy> SearchOutcome<S, A> {
    /// Action sequence and total cost, `None` when the search exhausted
    /// its frontier. A goal reached at the root yields an empty sequence
    /// with cost 0.
    pub fn solution(&self) -> Option<(Vec<A>, Cost)> {
        self.goal
            .map(|goal| (self.arena.actions_to(goal), self.arena[goal].path_cost))
    }

    fn solved(arena: Arena<S, A>, goal: NodeId, stats: Stats) -> Self {
        SearchOutcome {
            arena,
            goal: Some(goal),
            stats,
        }
    }

    fn exhausted(arena: Arena<S, A>, stats: Stats) -> Self {
        SearchOutcome {
            arena,
            goal: None,
            stats,
        }
    }
}

fn expand<P: Problem>(
    problem: &P,
    parent: &Node<P::State, P::Action>,
    parent_id: NodeId,
    action: P::Action,
) -> Node<P::State, P::Action> {
    let next = problem.result(&parent.state, action);
    let path_cost = problem.path_cost(parent.path_cost, &parent.state, action, &next);
    Node {
        state: next,
        parent: Some(parent_id),
        action: Some(action),
        path_cost,
        depth: parent.depth + 1,
    }
}

/// Expands frontier nodes without tracking explored states.
pub fn tree_search<P, F>(problem: &P, mut frontier: F) -> SearchOutcome<P::State, P::Action>
where
    P: Problem,
    F: Frontier<P::State>,
{
    let mut arena = Arena::new();
    let mut stats = Stats::new();

    let root = arena.root(problem.initial());
    stats.add_created(0);
    let root_state = arena[root].state.clone();
    frontier.push(root, &root_state);

    while let Some(id) = frontier.pop() {
        let node = &arena[id];
        let (state, depth) = (node.state.clone(), node.depth);
        stats.add_unique_visited(depth);
        if problem.goal_test(&state) {
            return SearchOutcome::solved(arena, id, stats);
        }

        for action in problem.actions(&state) {
            let child = expand(problem, &arena[id], id, action);
            stats.add_created(child.depth);
            let child_state = child.state.clone();
            let child_id = arena.insert(child);
            frontier.push(child_id, &child_state);
        }
    }

    SearchOutcome::exhausted(arena, stats)
}

/// As `tree_search` but never re-expands a state that was already
/// expanded or is already waiting in the frontier.
pub fn graph_search<P, F>(problem: &P, mut frontier: F) -> SearchOutcome<P::State, P::Action>
where
    P: Problem,
    F: Frontier<P::State>,
{
    let mut arena = Arena::new();
    let mut stats = Stats::new();
    let mut explored: FnvHashSet<P::State> = FnvHashSet::default();

    let root = arena.root(problem.initial());
    stats.add_created(0);
    let root_state = arena[root].state.clone();
    frontier.push(root, &root_state);

    while let Some(id) = frontier.pop() {
        let node = &arena[id];
        let (state, depth) = (node.state.clone(), node.depth);
        stats.add_unique_visited(depth);
        if problem.goal_test(&state) {
            return SearchOutcome::solved(arena, id, stats);
        }
        explored.insert(state.clone());

        for action in problem.actions(&state) {
            let child = expand(problem, &arena[id], id, action);
            if explored.contains(&child.state) || frontier.contains(&child.state) {
                stats.add_reached_duplicate(child.depth);
                continue;
            }
            stats.add_created(child.depth);
            let child_state = child.state.clone();
            let child_id = arena.insert(child);
            frontier.push(child_id, &child_state);
        }
    }

    SearchOutcome::exhausted(arena, stats)
}

pub fn breadth_first_tree_search<P: Problem>(problem: &P) -> SearchOutcome<P::State, P::Action> {
    tree_search(problem, FifoFrontier::new())
}

pub fn depth_first_tree_search<P: Problem>(problem: &P) -> SearchOutcome<P::State, P::Action> {
    tree_search(problem, LifoFrontier::new())
}

pub fn breadth_first_graph_search<P: Problem>(problem: &P) -> SearchOutcome<P::State, P::Action> {
    graph_search(problem, FifoFrontier::new())
}

pub fn depth_first_graph_search<P: Problem>(problem: &P) -> SearchOutcome<P::State, P::Action> {
    graph_search(problem, LifoFrontier::new())
}

/// Outcome of a depth-limited search. `Cutoff` means the limit was hit
/// somewhere, so a deeper search might still succeed - distinguishable
/// from `Exhausted`, which means the whole space below the limit was
/// searched without finding a goal.
pub enum DepthLimited<S, A> {
    Solved(SearchOutcome<S, A>),
    Cutoff,
    Exhausted,
}

pub fn depth_limited_search<P: Problem>(
    problem: &P,
    limit: u32,
) -> DepthLimited<P::State, P::Action> {
    let mut arena = Arena::new();
    let mut stats = Stats::new();
    let root = arena.root(problem.initial());
    stats.add_created(0);

    match recursive_dls(problem, &mut arena, &mut stats, root, limit) {
        Dls::Solved(goal) => DepthLimited::Solved(SearchOutcome::solved(arena, goal, stats)),
        Dls::Cutoff => DepthLimited::Cutoff,
        Dls::Exhausted => DepthLimited::Exhausted,
    }
}

enum Dls {
    Solved(NodeId),
    Cutoff,
    Exhausted,
}

fn recursive_dls<P: Problem>(
    problem: &P,
    arena: &mut Arena<P::State, P::Action>,
    stats: &mut Stats,
    id: NodeId,
    limit: u32,
) -> Dls {
    let state = arena[id].state.clone();
    let depth = arena[id].depth;
    stats.add_unique_visited(depth);
    if problem.goal_test(&state) {
        return Dls::Solved(id);
    }
    if depth == limit {
        return Dls::Cutoff;
    }

    let mut cutoff_occurred = false;
    for action in problem.actions(&state) {
        let child = expand(problem, &arena[id], id, action);
        stats.add_created(child.depth);
        let child_id = arena.insert(child);
        match recursive_dls(problem, arena, stats, child_id, limit) {
            Dls::Solved(goal) => return Dls::Solved(goal),
            Dls::Cutoff => cutoff_occurred = true,
            Dls::Exhausted => {}
        }
    }
    if cutoff_occurred {
        Dls::Cutoff
    } else {
        Dls::Exhausted
    }
}

pub fn iterative_deepening_search<P: Problem>(
    problem: &P,
) -> Option<SearchOutcome<P::State, P::Action>> {
    for limit in 0.. {
        match depth_limited_search(problem, limit) {
            DepthLimited::Solved(outcome) => return Some(outcome),
            DepthLimited::Cutoff => {}
            DepthLimited::Exhausted => return None,
        }
    }
    unreachable!()
}

/// Expands the node with the lowest `f` first. When a cheaper path to a
/// state already waiting in the frontier is found, the stale entry is
/// evicted and replaced.
pub fn best_first_graph_search<P, F>(
    problem: &P,
    f: F,
    print_status: bool,
) -> SearchOutcome<P::State, P::Action>
where
    P: Problem,
    F: Fn(&Node<P::State, P::Action>) -> Cost,
{
    let mut arena = Arena::new();
    let mut stats = Stats::new();
    let mut explored: FnvHashSet<P::State> = FnvHashSet::default();

    let root = arena.root(problem.initial());
    stats.add_created(0);
    if problem.goal_test(&arena[root].state) {
        stats.add_unique_visited(0);
        return SearchOutcome::solved(arena, root, stats);
    }

    let mut frontier = PriorityFrontier::new();
    let root_f = f(&arena[root]);
    let root_state = arena[root].state.clone();
    frontier.push(root, &root_state, root_f);

    while let Some(id) = frontier.pop() {
        let node = &arena[id];
        let (state, depth) = (node.state.clone(), node.depth);
        if problem.goal_test(&state) {
            stats.add_unique_visited(depth);
            return SearchOutcome::solved(arena, id, stats);
        }
        if stats.add_unique_visited(depth) && print_status {
            println!("Visited new depth: {}", depth);
            println!("{:?}", stats);
        }
        explored.insert(state.clone());

        for action in problem.actions(&state) {
            let child = expand(problem, &arena[id], id, action);
            if !explored.contains(&child.state) && !frontier.contains(&child.state) {
                let child_f = f(&child);
                stats.add_created(child.depth);
                let child_state = child.state.clone();
                let child_id = arena.insert(child);
                frontier.push(child_id, &child_state, child_f);
            } else if let Some(incumbent_f) = frontier.priority(&child.state) {
                let child_f = f(&child);
                if child_f < incumbent_f {
                    // found a cheaper path to a state still in the frontier
                    frontier.remove(&child.state);
                    stats.add_created(child.depth);
                    let child_state = child.state.clone();
                    let child_id = arena.insert(child);
                    frontier.push(child_id, &child_state, child_f);
                } else {
                    stats.add_reached_duplicate(child.depth);
                }
            } else {
                stats.add_reached_duplicate(child.depth);
            }
        }
    }

    SearchOutcome::exhausted(arena, stats)
}

/// Tree variant: no explored set, but frontier entries are still
/// replaced when a cheaper path shows up.
pub fn best_first_tree_search<P, F>(problem: &P, f: F) -> SearchOutcome<P::State, P::Action>
where
    P: Problem,
    F: Fn(&Node<P::State, P::Action>) -> Cost,
{
    let mut arena = Arena::new();
    let mut stats = Stats::new();

    let root = arena.root(problem.initial());
    stats.add_created(0);
    if problem.goal_test(&arena[root].state) {
        stats.add_unique_visited(0);
        return SearchOutcome::solved(arena, root, stats);
    }

    let mut frontier = PriorityFrontier::new();
    let root_f = f(&arena[root]);
    let root_state = arena[root].state.clone();
    frontier.push(root, &root_state, root_f);

    while let Some(id) = frontier.pop() {
        let node = &arena[id];
        let (state, depth) = (node.state.clone(), node.depth);
        if problem.goal_test(&state) {
            stats.add_unique_visited(depth);
            return SearchOutcome::solved(arena, id, stats);
        }
        stats.add_unique_visited(depth);

        for action in problem.actions(&state) {
            let child = expand(problem, &arena[id], id, action);
            let child_f = f(&child);
            match frontier.priority(&child.state) {
                None => {
                    stats.add_created(child.depth);
                    let child_state = child.state.clone();
                    let child_id = arena.insert(child);
                    frontier.push(child_id, &child_state, child_f);
                }
                Some(incumbent_f) if child_f < incumbent_f => {
                    frontier.remove(&child.state);
                    stats.add_created(child.depth);
                    let child_state = child.state.clone();
                    let child_id = arena.insert(child);
                    frontier.push(child_id, &child_state, child_f);
                }
                Some(_) => {
                    stats.add_reached_duplicate(child.depth);
                }
            }
        }
    }

    SearchOutcome::exhausted(arena, stats)
}

pub fn uniform_cost_search<P: Problem>(problem: &P) -> SearchOutcome<P::State, P::Action> {
    best_first_graph_search(problem, |node| node.path_cost, false)
}

pub fn greedy_best_first_search<P: Problem>(problem: &P) -> SearchOutcome<P::State, P::Action> {
    best_first_graph_search(problem, |node| problem.heuristic(&node.state), false)
}

/// A* graph search: `f = path_cost + heuristic`. Optimal only if the
/// heuristic never overestimates.
pub fn astar_graph_search<P: Problem>(
    problem: &P,
    print_status: bool,
) -> SearchOutcome<P::State, P::Action> {
    best_first_graph_search(
        problem,
        |node| node.path_cost + problem.heuristic(&node.state),
        print_status,
    )
}

pub fn astar_tree_search<P: Problem>(problem: &P) -> SearchOutcome<P::State, P::Action> {
    best_first_tree_search(problem, |node| {
        node.path_cost + problem.heuristic(&node.state)
    })
}
