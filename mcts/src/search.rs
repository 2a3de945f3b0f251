//! The select → expand → backup search loop.
//!
//! Each `search` call builds a fresh tree rooted at the given board and
//! runs the configured number of simulations strictly sequentially,
//! consulting the oracle once per non-terminal leaf. A failed simulation
//! aborts the whole call; partial statistics are never exposed.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use connectk::{encode_planes, BoardState, IllegalMoveError, Outcome};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::oracle::{Oracle, OracleError};
use crate::tree::SearchTree;

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A simulated move was rejected by the board; the tree no longer
    /// matches the game rules.
    #[error("illegal move during simulation: {0}")]
    IllegalMove(#[from] IllegalMoveError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// The oracle's policy vector does not cover the board.
    #[error("policy has {got} entries, expected {expected}")]
    PolicyShape { expected: usize, got: usize },

    /// After masking, no probability mass remains on legal moves.
    #[error("no probability mass on legal moves after masking")]
    DegeneratePolicy,
}

/// Oracle-guided Monte Carlo Tree Search engine.
#[derive(Debug, Clone)]
pub struct MctsEngine {
    config: MctsConfig,
}

impl MctsEngine {
    pub fn new(config: MctsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run a full search from `root` and return the move policy: the
    /// root's normalized child-visit distribution over all
    /// `rows * cols` cells (priors when no child has been visited yet).
    pub fn search<O: Oracle>(
        &self,
        root: &BoardState,
        oracle: &O,
        rng: &mut ChaCha20Rng,
    ) -> Result<Vec<f32>, SearchError> {
        let num_cells = root.rows() * root.cols();
        let mut tree = SearchTree::new();

        for sim in 0..self.config.num_simulations {
            self.simulate(&mut tree, root, oracle, rng)?;
            trace!(sim, nodes = tree.len(), "simulation complete");
        }

        let root_node = tree.get(tree.root());
        debug!(
            simulations = self.config.num_simulations,
            nodes = tree.len(),
            root_visits = root_node.visit_count,
            "search complete"
        );

        Ok(tree.root_policy(num_cells, root.cols()))
    }

    /// One simulation: select a leaf, evaluate/expand it, back the value
    /// up to the root.
    fn simulate<O: Oracle>(
        &self,
        tree: &mut SearchTree,
        root: &BoardState,
        oracle: &O,
        rng: &mut ChaCha20Rng,
    ) -> Result<(), SearchError> {
        let (leaf, state) = self.select(tree, root, rng)?;

        if state.is_terminal() {
            // No oracle call at terminal leaves: the outcome itself is
            // the value, oriented to the side to move at the leaf.
            let value = match state.outcome() {
                Some(Outcome::Win(winner)) if winner == state.to_move() => 1.0,
                Some(Outcome::Win(_)) => -1.0,
                _ => 0.0,
            };
            tree.backup(leaf, value);
            return Ok(());
        }

        let evaluation = oracle.evaluate(&encode_planes(&state.canonical()))?;
        if evaluation.policy.len() != state.rows() * state.cols() {
            return Err(SearchError::PolicyShape {
                expected: state.rows() * state.cols(),
                got: evaluation.policy.len(),
            });
        }

        let priors = mask_and_renormalize(&evaluation.policy, &state)?;
        expand(tree, leaf, &state, &priors);
        tree.backup(leaf, evaluation.value);
        Ok(())
    }

    /// Descend from the root by maximal UCT until reaching an unexpanded
    /// node, a never-visited child, or a terminal position. Returns the
    /// stopping node together with the board reached by replaying its
    /// path.
    fn select(
        &self,
        tree: &SearchTree,
        root: &BoardState,
        rng: &mut ChaCha20Rng,
    ) -> Result<(NodeId, BoardState), SearchError> {
        let mut node_id = tree.root();
        let mut state = root.clone();

        loop {
            let node = tree.get(node_id);
            if node.children.is_empty() || state.is_terminal() {
                return Ok((node_id, state));
            }

            // Best UCT among the children, NaN scores excluded; exact
            // ties are broken uniformly at random.
            let parent_visits = node.visit_count;
            let mut best = f32::NEG_INFINITY;
            let mut candidates: Vec<NodeId> = Vec::new();
            for &child_id in &node.children {
                let score = tree.get(child_id).uct(parent_visits, self.config.epsilon);
                if score.is_nan() {
                    continue;
                }
                if score > best {
                    best = score;
                    candidates.clear();
                    candidates.push(child_id);
                } else if score == best {
                    candidates.push(child_id);
                }
            }

            let Some(&chosen) = candidates.get(rng.gen_range(0..candidates.len().max(1))) else {
                // Every child scored NaN; treat this node as the leaf.
                return Ok((node_id, state));
            };

            let child = tree.get(chosen);
            let Some(mv) = child.mv else {
                return Ok((node_id, state));
            };

            state.place(mv)?;
            node_id = chosen;

            if state.is_terminal() || child.visit_count == 0 {
                return Ok((node_id, state));
            }
        }
    }
}

/// Zero out illegal-move entries and renormalize the legal mass to 1.
fn mask_and_renormalize(policy: &[f32], state: &BoardState) -> Result<Vec<f32>, SearchError> {
    let mut masked = vec![0.0f32; policy.len()];
    let mut total = 0.0f32;

    for mv in state.legal_moves() {
        let idx = mv.policy_index(state.cols());
        masked[idx] = policy[idx];
        total += policy[idx];
    }

    if !(total > 0.0) {
        return Err(SearchError::DegeneratePolicy);
    }

    for p in &mut masked {
        *p /= total;
    }
    Ok(masked)
}

/// Attach one child per legal move with its prior, in a single batch.
/// Terminal and already-expanded nodes are left alone.
fn expand(tree: &mut SearchTree, node_id: NodeId, state: &BoardState, priors: &[f32]) {
    if state.is_terminal() || tree.get(node_id).is_expanded() {
        return;
    }

    let cols = state.cols();
    let children = state
        .legal_moves()
        .into_iter()
        .map(|mv| (mv, priors[mv.policy_index(cols)]));
    tree.add_children(node_id, children);
}
