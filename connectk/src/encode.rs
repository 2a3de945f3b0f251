//! Board encoding for the policy/value oracle.
//!
//! Three R×C binary planes (black-occupied, empty, white-occupied),
//! flattened plane-major and row-major within each plane. Callers are
//! responsible for canonicalizing to the black-to-move perspective
//! before encoding.

use crate::board::{BoardState, Cell};

/// Number of input planes presented to the oracle.
pub const NUM_PLANES: usize = 3;

/// Encode a board as `NUM_PLANES * rows * cols` floats.
pub fn encode_planes(board: &BoardState) -> Vec<f32> {
    let cells = board.rows() * board.cols();
    let mut planes = vec![0.0f32; NUM_PLANES * cells];

    let (black, rest) = planes.split_at_mut(cells);
    let (empty, white) = rest.split_at_mut(cells);

    for row in 1..=board.rows() {
        for col in 1..=board.cols() {
            let idx = (row - 1) * board.cols() + (col - 1);
            match board.cell(col, row) {
                Cell::Black => black[idx] = 1.0,
                Cell::Empty => empty[idx] = 1.0,
                Cell::White => white[idx] = 1.0,
            }
        }
    }

    planes
}
