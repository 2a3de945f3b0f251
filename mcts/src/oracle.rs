//! The policy/value oracle contract.
//!
//! The oracle is the one external, learned collaborator of the search:
//! `evaluate` maps an encoded board to (policy over cells, scalar value),
//! `train` consumes one labeled sample. Any concrete network lives behind
//! this trait as a pluggable adapter; the search never depends on its
//! internals.

use serde::Serialize;
use thiserror::Error;

use connectk::NUM_PLANES;

/// Errors surfaced by an oracle. Treated as fatal configuration errors
/// by callers; the search performs no retry around them.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("evaluation failed: {0}")]
    Evaluation(String),

    #[error("training failed: {0}")]
    Training(String),

    #[error("malformed sample: {0}")]
    MalformedSample(String),
}

/// Result of evaluating one encoded board position.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Probability mass over all `rows * cols` cells. Entries for
    /// illegal moves may be non-zero; the search masks and renormalizes.
    pub policy: Vec<f32>,

    /// Value estimate in [-1, 1] from the side-to-move perspective.
    pub value: f32,
}

/// One labeled self-play sample: the encoded board from the acting
/// player's perspective, the search policy played from it, and the final
/// game value from that player's perspective.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSample {
    /// Three binary planes (black, empty, white), canonical perspective.
    pub planes: Vec<f32>,

    /// Policy target over all cells; sums to 1 over legal entries.
    pub policy: Vec<f32>,

    /// Outcome value target in [-1, 1].
    pub value: f32,
}

/// External learned policy/value model consumed by search and training.
///
/// Implementations must serialize their own `evaluate`/`train` calls if
/// shared; the core issues at most one in-flight call at a time.
pub trait Oracle: Send {
    /// Evaluate a board encoded as three planes (see
    /// `connectk::encode_planes`), always black-to-move canonical.
    fn evaluate(&self, planes: &[f32]) -> Result<Evaluation, OracleError>;

    /// Train on a single sample.
    fn train(&mut self, sample: &TrainingSample) -> Result<(), OracleError>;
}

/// Oracle returning a uniform policy over empty cells and a neutral
/// value. Lets the search and trainer run without a model.
#[derive(Debug, Clone, Default)]
pub struct UniformOracle;

impl UniformOracle {
    pub fn new() -> Self {
        Self
    }
}

impl Oracle for UniformOracle {
    fn evaluate(&self, planes: &[f32]) -> Result<Evaluation, OracleError> {
        if planes.is_empty() || planes.len() % NUM_PLANES != 0 {
            return Err(OracleError::Evaluation(format!(
                "expected {} equal planes, got {} floats",
                NUM_PLANES,
                planes.len()
            )));
        }
        let num_cells = planes.len() / NUM_PLANES;

        // Legality is read off the middle (empty) plane.
        let empty = &planes[num_cells..2 * num_cells];
        let num_empty = empty.iter().filter(|&&v| v > 0.0).count();

        let mut policy = vec![0.0f32; num_cells];
        if num_empty > 0 {
            let p = 1.0 / num_empty as f32;
            for (slot, &e) in policy.iter_mut().zip(empty.iter()) {
                if e > 0.0 {
                    *slot = p;
                }
            }
        }

        Ok(Evaluation { policy, value: 0.0 })
    }

    fn train(&mut self, sample: &TrainingSample) -> Result<(), OracleError> {
        if sample.planes.len() != NUM_PLANES * sample.policy.len() {
            return Err(OracleError::MalformedSample(format!(
                "planes/policy shape mismatch: {} floats vs {} cells",
                sample.planes.len(),
                sample.policy.len()
            )));
        }
        // Nothing to learn.
        Ok(())
    }
}
