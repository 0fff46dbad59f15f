//! Frontier queues for the search algorithms.
//!
//! The uninformed searches only need push/pop plus a state membership test.
//! The best-first searches additionally need to look up and evict the entry
//! for a given state when a cheaper path to it is found.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::hash::Hash;

use fnv::FnvHashMap;

use crate::data::Cost;
use crate::search::node::NodeId;

pub trait Frontier<S> {
    fn push(&mut self, id: NodeId, state: &S);
    fn pop(&mut self) -> Option<NodeId>;
    fn contains(&self, state: &S) -> bool;
    fn is_empty(&self) -> bool;
}

/// FIFO discipline - breadth-first.
pub struct FifoFrontier<S> {
    queue: VecDeque<(NodeId, S)>,
    members: FnvHashMap<S, u32>,
}

impl<S: Clone + Eq + Hash> FifoFrontier<S> {
    pub fn new() -> Self {
        FifoFrontier {
            queue: VecDeque::new(),
            members: FnvHashMap::default(),
        }
    }
}

impl<S: Clone + Eq + Hash> Frontier<S> for FifoFrontier<S> {
    fn push(&mut self, id: NodeId, state: &S) {
        *self.members.entry(state.clone()).or_insert(0) += 1;
        self.queue.push_back((id, state.clone()));
    }

    fn pop(&mut self) -> Option<NodeId> {
        let (id, state) = self.queue.pop_front()?;
        let count = self.members.get_mut(&state).unwrap();
        *count -= 1;
        if *count == 0 {
            self.members.remove(&state);
        }
        Some(id)
    }

    fn contains(&self, state: &S) -> bool {
        self.members.contains_key(state)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// LIFO discipline - depth-first.
pub struct LifoFrontier<S> {
    stack: Vec<(NodeId, S)>,
    members: FnvHashMap<S, u32>,
}

impl<S: Clone + Eq + Hash> LifoFrontier<S> {
    pub fn new() -> Self {
        LifoFrontier {
            stack: Vec::new(),
            members: FnvHashMap::default(),
        }
    }
}

impl<S: Clone + Eq + Hash> Frontier<S> for LifoFrontier<S> {
    fn push(&mut self, id: NodeId, state: &S) {
        *self.members.entry(state.clone()).or_insert(0) += 1;
        self.stack.push((id, state.clone()));
    }

    fn pop(&mut self) -> Option<NodeId> {
        let (id, state) = self.stack.pop()?;
        let count = self.members.get_mut(&state).unwrap();
        *count -= 1;
        if *count == 0 {
            self.members.remove(&state);
        }
        Some(id)
    }

    fn contains(&self, state: &S) -> bool {
        self.members.contains_key(state)
    }

    fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

struct Entry<S> {
    f: Cost,
    seq: u64,
    id: NodeId,
    state: S,
}

impl<S> PartialEq for Entry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl<S> Eq for Entry<S> {}

impl<S> PartialOrd for Entry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Entry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // seq breaks f ties in insertion order, pinning pop determinism
        (self.f, self.seq).cmp(&(other.f, other.seq))
    }
}

/// Min-f priority queue with per-state lookup.
///
/// Removal is lazy: evicted or superseded heap entries stay in the heap
/// and are skipped on pop when their sequence number no longer matches
/// the live entry for that state.
pub struct PriorityFrontier<S> {
    heap: BinaryHeap<Reverse<Entry<S>>>,
    live: FnvHashMap<S, (Cost, u64)>,
    next_seq: u64,
}

impl<S: Clone + Eq + Hash> PriorityFrontier<S> {
    pub fn new() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            live: FnvHashMap::default(),
            next_seq: 0,
        }
    }

    /// Inserts a node with priority `f`. If the state is already present
    /// the old entry is superseded.
    pub fn push(&mut self, id: NodeId, state: &S, f: Cost) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(state.clone(), (f, seq));
        self.heap.push(Reverse(Entry {
            f,
            seq,
            id,
            state: state.clone(),
        }));
    }

    /// Pops the node with the lowest `f`, skipping stale entries.
    pub fn pop(&mut self) -> Option<NodeId> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if let Some(&(_, live_seq)) = self.live.get(&entry.state) {
                if live_seq == entry.seq {
                    self.live.remove(&entry.state);
                    return Some(entry.id);
                }
            }
        }
        None
    }

    pub fn contains(&self, state: &S) -> bool {
        self.live.contains_key(state)
    }

    /// The priority of the live entry for `state`, if present.
    pub fn priority(&self, state: &S) -> Option<Cost> {
        self.live.get(state).map(|&(f, _)| f)
    }

    /// Evicts the live entry for `state`. Returns whether one existed.
    pub fn remove(&mut self, state: &S) -> bool {
        self.live.remove(state).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::node::{Arena, Node};

    fn ids(n: usize) -> Vec<NodeId> {
        // NodeId construction goes through an arena
        let mut arena: Arena<usize, ()> = Arena::new();
        let root = arena.root(0);
        let mut ids = vec![root];
        for i in 1..n {
            ids.push(arena.insert(Node {
                state: i,
                parent: Some(root),
                action: None,
                path_cost: 0,
                depth: 1,
            }));
        }
        ids
    }

    #[test]
    fn pops_minimum_first() {
        let ids = ids(3);
        let mut frontier: PriorityFrontier<u32> = PriorityFrontier::new();
        frontier.push(ids[0], &0, 5);
        frontier.push(ids[1], &1, 2);
        frontier.push(ids[2], &2, 7);
        assert_eq!(frontier.pop(), Some(ids[1]));
        assert_eq!(frontier.pop(), Some(ids[0]));
        assert_eq!(frontier.pop(), Some(ids[2]));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn ties_break_in_insertion_order() {
        let ids = ids(3);
        let mut frontier: PriorityFrontier<u32> = PriorityFrontier::new();
        frontier.push(ids[2], &2, 3);
        frontier.push(ids[0], &0, 3);
        frontier.push(ids[1], &1, 3);
        assert_eq!(frontier.pop(), Some(ids[2]));
        assert_eq!(frontier.pop(), Some(ids[0]));
        assert_eq!(frontier.pop(), Some(ids[1]));
    }

    #[test]
    fn eviction_and_replacement() {
        let ids = ids(2);
        let mut frontier: PriorityFrontier<u32> = PriorityFrontier::new();
        frontier.push(ids[0], &7, 10);
        assert_eq!(frontier.priority(&7), Some(10));

        // cheaper path to the same state
        assert!(frontier.remove(&7));
        frontier.push(ids[1], &7, 4);
        assert_eq!(frontier.priority(&7), Some(4));
        assert!(frontier.contains(&7));

        // the stale heap entry must not resurface
        assert_eq!(frontier.pop(), Some(ids[1]));
        assert_eq!(frontier.pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn fifo_and_lifo_order() {
        let ids = ids(3);

        let mut fifo: FifoFrontier<u32> = FifoFrontier::new();
        let mut lifo: LifoFrontier<u32> = LifoFrontier::new();
        for (i, &id) in ids.iter().enumerate() {
            fifo.push(id, &(i as u32));
            lifo.push(id, &(i as u32));
        }
        assert!(fifo.contains(&1));
        assert_eq!(fifo.pop(), Some(ids[0]));
        assert_eq!(lifo.pop(), Some(ids[2]));
        assert!(!lifo.contains(&2));
    }
}
