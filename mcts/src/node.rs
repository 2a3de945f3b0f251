//! Search tree node representation.
//!
//! Nodes live in an arena and reference each other by index, avoiding
//! ownership cycles between parent and children while keeping upward
//! walks O(1) for backup.

use connectk::Move;

/// Index into the node arena. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for the root).
    pub parent: NodeId,

    /// Move that produced this node from the parent's state (None for
    /// the root).
    pub mv: Option<Move>,

    /// Children indices, populated once by a single batch expansion.
    pub children: Vec<NodeId>,

    /// Number of backups that have passed through this node.
    pub visit_count: u32,

    /// Sum of values backed up through this node.
    pub total_value: f32,

    /// Prior probability from the oracle's policy at creation time,
    /// fixed for the node's lifetime.
    pub prior: f32,
}

impl MctsNode {
    pub fn new_root() -> Self {
        Self {
            parent: NodeId::NONE,
            mv: None,
            children: Vec::new(),
            visit_count: 0,
            total_value: 0.0,
            prior: 1.0,
        }
    }

    pub fn new_child(parent: NodeId, mv: Move, prior: f32) -> Self {
        Self {
            parent,
            mv: Some(mv),
            children: Vec::new(),
            visit_count: 0,
            total_value: 0.0,
            prior,
        }
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Modified UCT score used during selection.
    ///
    /// With visit count `n`, accumulated value `u`, prior `p`, parent
    /// visit count `Np`, and exploration weight `epsilon`:
    ///
    /// - unvisited: `epsilon * p * sqrt(Np / (n + 1))`
    /// - visited:   `(1 - 0.5 * (u/n + 1)) + epsilon * p * sqrt(Np / (n + 1))`
    ///
    /// The exploitation term maps an average value in [-1, 1] into
    /// [0, 1] with inverted polarity (a higher average scores lower).
    /// That orientation is intentional and load-bearing; callers must
    /// not "fix" it.
    #[inline]
    pub fn uct(&self, parent_visits: u32, epsilon: f32) -> f32 {
        let n = self.visit_count as f32;
        let explore = epsilon * self.prior * (parent_visits as f32 / (n + 1.0)).sqrt();

        if self.visit_count == 0 {
            explore
        } else {
            let avg = self.total_value / n;
            (1.0 - 0.5 * (avg + 1.0)) + explore
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn new_root_defaults() {
        let node = MctsNode::new_root();
        assert!(node.parent.is_none());
        assert!(node.mv.is_none());
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.prior, 1.0);
        assert!(!node.is_expanded());
    }

    #[test]
    fn unvisited_uct_is_prior_scaled_exploration() {
        let node = MctsNode::new_child(NodeId(0), Move::new(1, 1), 0.5);
        // epsilon * prior * sqrt(Np / 1) = 2.0 * 0.5 * sqrt(4) = 2.0
        let score = node.uct(4, 2.0);
        assert!((score - 2.0).abs() < 1e-6);
    }

    #[test]
    fn visited_uct_combines_exploit_and_explore() {
        let mut node = MctsNode::new_child(NodeId(0), Move::new(1, 1), 0.25);
        node.visit_count = 4;
        node.total_value = 2.0; // avg 0.5

        // exploit = 1 - 0.5 * (0.5 + 1) = 0.25
        // explore = 1.0 * 0.25 * sqrt(16 / 5)
        let expected = 0.25 + 0.25 * (16.0f32 / 5.0).sqrt();
        assert!((node.uct(16, 1.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn uct_polarity_at_value_bounds() {
        // Average value +1 (certain win for the node's mover) scores 0
        // exploitation; average -1 scores 1. The inversion is by contract.
        let mut won = MctsNode::new_child(NodeId(0), Move::new(1, 1), 0.0);
        won.visit_count = 2;
        won.total_value = 2.0;
        assert!((won.uct(10, 0.0) - 0.0).abs() < 1e-6);

        let mut lost = MctsNode::new_child(NodeId(0), Move::new(2, 1), 0.0);
        lost.visit_count = 2;
        lost.total_value = -2.0;
        assert!((lost.uct(10, 0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn uct_with_zero_parent_visits_is_zero_for_unvisited() {
        let node = MctsNode::new_child(NodeId(0), Move::new(1, 1), 0.7);
        assert_eq!(node.uct(0, 1.5), 0.0);
    }
}
