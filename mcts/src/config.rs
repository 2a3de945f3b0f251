//! Search configuration parameters.

use serde::Deserialize;

fn d_num_simulations() -> u32 {
    100
}
fn d_epsilon() -> f32 {
    1.0
}

/// Configuration for one Monte Carlo Tree Search engine.
#[derive(Debug, Clone, Deserialize)]
pub struct MctsConfig {
    /// Number of simulations per `search` call.
    #[serde(default = "d_num_simulations")]
    pub num_simulations: u32,

    /// Exploration weight in the UCT score. Higher values lean on the
    /// oracle's priors for longer before trusting visit statistics.
    #[serde(default = "d_epsilon")]
    pub epsilon: f32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: d_num_simulations(),
            epsilon: d_epsilon(),
        }
    }
}

impl MctsConfig {
    /// Fast configuration for tests.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 25,
            epsilon: 1.0,
        }
    }

    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }
}
