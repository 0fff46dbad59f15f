use std::ops::Index;

use crate::data::Cost;

/// Index into the arena of one search run. Never outlives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node<S, A> {
    pub state: S,
    /// `None` for the root.
    pub parent: Option<NodeId>,
    /// The action that produced this node from its parent. `None` for the root.
    pub action: Option<A>,
    /// Accumulated cost from the root.
    pub path_cost: Cost,
    pub depth: u32,
}

/// All nodes created by one search, addressed by `NodeId`.
///
/// Parent links are indices instead of references, so the node tree needs
/// no lifetimes and is acyclic by construction - every node except the
/// root has exactly one parent that was created before it.
#[derive(Debug)]
pub struct Arena<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S, A: Copy> Arena<S, A> {
    pub fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    pub fn root(&mut self, state: S) -> NodeId {
        debug_assert!(self.nodes.is_empty());
        self.insert(Node {
            state,
            parent: None,
            action: None,
            path_cost: 0,
            depth: 0,
        })
    }

    pub fn insert(&mut self, node: Node<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The action sequence from the root to `goal`, reconstructed by
    /// walking parent links and reversing. Empty for the root itself.
    pub fn actions_to(&self, goal: NodeId) -> Vec<A> {
        let mut actions = Vec::new();
        let mut cur = &self[goal];
        while let Some(parent) = cur.parent {
            // every non-root node records the action that created it
            actions.push(cur.action.unwrap());
            cur = &self[parent];
        }
        actions.reverse();
        actions
    }
}

impl<S, A> Index<NodeId> for Arena<S, A> {
    type Output = Node<S, A>;

    fn index(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0]
    }
}

impl<S, A: Copy> Default for Arena<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
