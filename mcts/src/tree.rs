//! Arena-allocated search tree.
//!
//! Nodes are stored in a contiguous `Vec` and addressed by `NodeId`;
//! children hold their move, parents are back-references only.

use connectk::Move;

use crate::node::{MctsNode, NodeId};

/// Search tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<MctsNode>,
    root: NodeId,
}

impl SearchTree {
    /// Create a tree holding only an unexpanded root.
    pub fn new() -> Self {
        Self {
            nodes: vec![MctsNode::new_root()],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach one child per (move, prior) pair to `parent` in a single
    /// batch. Expansion happens at most once per node.
    pub fn add_children(&mut self, parent: NodeId, moves: impl IntoIterator<Item = (Move, f32)>) {
        debug_assert!(!self.get(parent).is_expanded());

        let mut child_ids = Vec::new();
        for (mv, prior) in moves {
            let id = NodeId(self.nodes.len() as u32);
            self.nodes.push(MctsNode::new_child(parent, mv, prior));
            child_ids.push(id);
        }
        self.get_mut(parent).children = child_ids;
    }

    /// Propagate a value from `leaf` to the root.
    ///
    /// Every node on the path gains one visit and the current value;
    /// the value is negated before each step toward the parent, since
    /// each ply alternates perspective.
    pub fn backup(&mut self, leaf: NodeId, value: f32) {
        let mut current = leaf;
        let mut value = value;

        while current.is_some() {
            let node = self.get_mut(current);
            node.visit_count += 1;
            node.total_value += value;

            value = -value;
            current = node.parent;
        }
    }

    /// Root policy as the normalized child-visit distribution over a
    /// `num_cells`-entry vector.
    ///
    /// When no root child has been visited yet, falls back to the
    /// children's stored priors (already masked and normalized by the
    /// expansion step).
    pub fn root_policy(&self, num_cells: usize, cols: usize) -> Vec<f32> {
        let mut policy = vec![0.0f32; num_cells];
        let root = self.get(self.root);

        if root.children.is_empty() {
            return policy;
        }

        let total_visits: u32 = root
            .children
            .iter()
            .map(|&id| self.get(id).visit_count)
            .sum();

        for &id in &root.children {
            let child = self.get(id);
            let mv = match child.mv {
                Some(mv) => mv,
                None => continue,
            };
            let weight = if total_visits > 0 {
                child.visit_count as f32 / total_visits as f32
            } else {
                child.prior
            };
            policy[mv.policy_index(cols)] = weight;
        }

        policy
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}
