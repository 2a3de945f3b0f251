//! Game generation and per-sample oracle training.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use connectk::{encode_planes, BoardState, GameConfig, IllegalMoveError, Move, Player};
use mcts::{MctsConfig, MctsEngine, Oracle, OracleError, SearchError, TrainingSample};

fn d_num_games() -> u32 {
    10
}

/// Configuration for a training run.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainerConfig {
    /// Independent self-play games per `train` call.
    #[serde(default = "d_num_games")]
    pub num_games: u32,

    #[serde(default)]
    pub game: GameConfig,

    #[serde(default)]
    pub mcts: MctsConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            num_games: d_num_games(),
            game: GameConfig::default(),
            mcts: MctsConfig::default(),
        }
    }
}

/// Errors from self-play game generation or training.
#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// A sampled move was rejected by the board; policy and board have
    /// diverged.
    #[error("sampled an illegal move: {0}")]
    IllegalMove(#[from] IllegalMoveError),

    /// The move policy carried no positive probability mass.
    #[error("move policy has no positive mass to sample from")]
    ExhaustedPolicy,
}

/// Counters for one `train` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainReport {
    pub games: u32,
    pub samples: usize,
}

/// Plays the engine against itself and feeds the resulting samples to
/// the oracle one at a time.
#[derive(Debug, Clone)]
pub struct SelfPlayTrainer {
    game: GameConfig,
    engine: MctsEngine,
}

impl SelfPlayTrainer {
    pub fn new(game: GameConfig, mcts: MctsConfig) -> Self {
        Self {
            game,
            engine: MctsEngine::new(mcts),
        }
    }

    pub fn from_config(config: &TrainerConfig) -> Self {
        Self::new(config.game.clone(), config.mcts.clone())
    }

    /// Play one full game and return its labeled samples.
    ///
    /// The board is kept in the acting player's frame: the mover is
    /// always the canonical color, and the board is flipped between
    /// plies. Each move records the post-move encoding and the policy
    /// it was drawn from; when the game ends, the oracle's value for
    /// the terminal position is broadcast back over the whole game,
    /// negated for samples whose acting color differs from the final
    /// mover's.
    pub fn self_play<O: Oracle>(
        &self,
        oracle: &O,
        rng: &mut ChaCha20Rng,
    ) -> Result<Vec<TrainingSample>, SelfPlayError> {
        let mut board = BoardState::new(&self.game);
        let mut acting = Player::Black;
        let mut memory: Vec<(Vec<f32>, Vec<f32>, Player)> = Vec::new();

        loop {
            let policy = self.engine.search(&board, oracle, rng)?;
            let mv = sample_move(&policy, board.cols(), rng)?;
            board.place(mv)?;
            memory.push((encode_planes(&board), policy, acting));

            if board.is_terminal() {
                break;
            }
            board = board.flipped();
            acting = acting.opponent();
        }

        let final_acting = acting;
        let terminal_value = oracle.evaluate(&encode_planes(&board))?.value;
        debug!(
            moves = memory.len(),
            outcome = ?board.outcome(),
            terminal_value,
            "self-play game finished"
        );

        let samples = memory
            .into_iter()
            .map(|(planes, policy, color)| TrainingSample {
                planes,
                policy,
                value: if color == final_acting {
                    terminal_value
                } else {
                    -terminal_value
                },
            })
            .collect();
        Ok(samples)
    }

    /// Run `num_games` self-play games, training the oracle on every
    /// sample as it is produced.
    pub fn train<O: Oracle>(
        &self,
        num_games: u32,
        oracle: &mut O,
        rng: &mut ChaCha20Rng,
    ) -> Result<TrainReport, SelfPlayError> {
        let mut report = TrainReport::default();

        for game in 0..num_games {
            let samples = self.self_play(oracle, rng)?;
            for sample in &samples {
                oracle.train(sample)?;
            }

            report.games += 1;
            report.samples += samples.len();
            info!(game, moves = samples.len(), "trained on self-play game");
        }

        Ok(report)
    }
}

/// Weighted-random draw over the policy vector: walk the entries,
/// subtracting each from a draw in [0, 1), and pick where the running
/// total crosses zero. Falls back to the last positive entry if
/// floating-point shortfall leaves the draw uncrossed.
fn sample_move(
    policy: &[f32],
    cols: usize,
    rng: &mut ChaCha20Rng,
) -> Result<Move, SelfPlayError> {
    let mut draw: f32 = rng.gen();
    let mut fallback = None;

    for (index, &p) in policy.iter().enumerate() {
        if p <= 0.0 {
            continue;
        }
        fallback = Some(index);
        draw -= p;
        if draw <= 0.0 {
            return Ok(Move::from_policy_index(index, cols));
        }
    }

    fallback
        .map(|index| Move::from_policy_index(index, cols))
        .ok_or(SelfPlayError::ExhaustedPolicy)
}
