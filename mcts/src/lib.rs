//! Monte Carlo Tree Search guided by an external policy/value oracle.
//!
//! Each simulation runs three phases over an arena-allocated tree:
//!
//! 1. **Selection**: descend from the root by maximal UCT score, breaking
//!    exact ties uniformly at random, until reaching an unexpanded or
//!    terminal position
//! 2. **Expansion**: ask the [`Oracle`] for a policy over the leaf, mask
//!    out illegal moves, renormalize, and attach one child per legal move
//! 3. **Backup**: propagate the oracle's value estimate to the root,
//!    negating at each ply
//!
//! The search is strictly sequential; the tree and its board clones are
//! owned by the engine for the duration of one `search` call.

pub mod config;
pub mod node;
pub mod oracle;
pub mod search;
pub mod tree;

pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use oracle::{Evaluation, Oracle, OracleError, TrainingSample, UniformOracle};
pub use search::{MctsEngine, SearchError};
pub use tree::SearchTree;
