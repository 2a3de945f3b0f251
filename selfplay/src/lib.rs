//! Self-play training loop on top of the search engine.
//!
//! `SelfPlayTrainer` plays full games against itself, turning each game
//! into labeled training samples for the oracle.

mod trainer;

pub use trainer::{SelfPlayError, SelfPlayTrainer, TrainReport, TrainerConfig};
