//! Connect-K board game model
//!
//! This crate provides the authoritative game state for an N-in-a-row game
//! on an R×C grid:
//! - `BoardState`: grid occupancy, turn tracking, and terminal detection
//! - `check_connect`: the win-condition detector (longest run through a cell)
//! - `encode_planes`: three-plane binary encoding for policy/value networks
//! - `GameConfig`: explicit session configuration (rows, cols, connect-K)
//!
//! The board is the single source of truth for move legality and game end.
//! Search and training layers consume it through `place`, `legal_moves`,
//! and the perspective helpers `flipped`/`canonical`.

pub mod board;
pub mod config;
pub mod connect;
pub mod encode;

pub use board::{BoardState, Cell, IllegalMoveError, Move, Outcome, Player};
pub use config::{ConfigError, GameConfig};
pub use connect::check_connect;
pub use encode::{encode_planes, NUM_PLANES};
