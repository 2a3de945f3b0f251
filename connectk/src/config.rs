//! Game session configuration.
//!
//! The board dimensions and win criterion are owned by one explicit config
//! struct passed into board construction, never ambient global state.

use serde::Deserialize;
use thiserror::Error;

fn d_rows() -> usize {
    3
}
fn d_cols() -> usize {
    3
}
fn d_connect_k() -> usize {
    3
}

/// Errors from validating a game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },

    #[error("connect_k must be at least 1, got {0}")]
    ConnectTooSmall(usize),

    #[error("connect_k {connect_k} cannot exceed the longest board axis {max_axis}")]
    ConnectTooLarge { connect_k: usize, max_axis: usize },
}

/// Configuration for a connect-K game session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Number of rows (R) on the board.
    #[serde(default = "d_rows")]
    pub rows: usize,

    /// Number of columns (C) on the board.
    #[serde(default = "d_cols")]
    pub cols: usize,

    /// Run length K required to win (the connection criterion).
    #[serde(default = "d_connect_k")]
    pub connect_k: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: d_rows(),
            cols: d_cols(),
            connect_k: d_connect_k(),
        }
    }
}

impl GameConfig {
    pub fn new(rows: usize, cols: usize, connect_k: usize) -> Self {
        Self {
            rows,
            cols,
            connect_k,
        }
    }

    /// Total number of cells (and the policy vector length).
    pub fn num_cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Check the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.connect_k == 0 {
            return Err(ConfigError::ConnectTooSmall(self.connect_k));
        }
        let max_axis = self.rows.max(self.cols);
        if self.connect_k > max_axis {
            return Err(ConfigError::ConnectTooLarge {
                connect_k: self.connect_k,
                max_axis,
            });
        }
        Ok(())
    }
}
