//! Win-condition detection.
//!
//! A pure scan over the board from a just-played cell: the longest
//! same-colored run through that cell over the four axis orientations.

use crate::board::{BoardState, Cell, Move};

/// Axis direction vectors as (d_col, d_row): horizontal, vertical,
/// diagonal ↘, diagonal ↗.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, -1), (1, 1)];

/// Longest same-colored run through the cell at `mv`.
///
/// For each axis, walk outward from `mv` in both senses while cells stay
/// in bounds and match the color at `mv`; the axis run length is
/// `1 + forward steps + backward steps`. Returns the maximum over the
/// four axes. When several axes tie only the length is reported.
///
/// The cell at `mv` must be occupied; an empty cell would count its
/// empty neighbors.
pub fn check_connect(board: &BoardState, mv: Move) -> usize {
    let color = board.cell(mv.col, mv.row);
    debug_assert_ne!(color, Cell::Empty);

    let rows = board.rows() as isize;
    let cols = board.cols() as isize;

    let mut best = 0usize;
    for (dc, dr) in DIRECTIONS {
        let mut run = 1usize;

        for sense in [1isize, -1] {
            let (step_c, step_r) = (dc * sense, dr * sense);
            let (mut c, mut r) = (mv.col as isize + step_c, mv.row as isize + step_r);
            while c >= 1 && c <= cols && r >= 1 && r <= rows {
                if board.cell(c as usize, r as usize) == color {
                    run += 1;
                    c += step_c;
                    r += step_r;
                } else {
                    break;
                }
            }
        }

        best = best.max(run);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::config::GameConfig;

    /// Build a board by replaying moves; the placement order alternates
    /// colors, so interleave filler moves to control ownership.
    fn board(rows: usize, cols: usize, k: usize) -> BoardState {
        BoardState::new(&GameConfig::new(rows, cols, k))
    }

    #[test]
    fn single_stone_has_run_of_one() {
        for (rows, cols) in [(3, 3), (5, 9), (9, 9), (1, 4)] {
            let b = board(rows, cols, rows.max(cols));
            for mv in b.legal_moves() {
                let mut probe = b.clone();
                probe.place(mv).unwrap();
                assert_eq!(
                    check_connect(&probe, mv),
                    1,
                    "lone stone at ({},{}) on {}x{}",
                    mv.col,
                    mv.row,
                    rows,
                    cols
                );
            }
        }
    }

    #[test]
    fn interior_stone_of_horizontal_run_sees_full_length() {
        // Black run of length 4 along row 2 of a 5x7 board, K high enough
        // that the game stays open while building it.
        let mut b = board(5, 7, 5);
        for col in 1..=4 {
            b.place(Move::new(col, 2)).unwrap(); // black
            b.place(Move::new(col, 5)).unwrap(); // white filler
        }
        for col in 1..=4 {
            assert_eq!(check_connect(&b, Move::new(col, 2)), 4);
        }
    }

    #[test]
    fn vertical_and_diagonal_runs() {
        let mut b = board(6, 6, 6);
        // Black column run at col 2, rows 1..=3.
        for row in 1..=3 {
            b.place(Move::new(2, row)).unwrap(); // black
            b.place(Move::new(6, row)).unwrap(); // white filler
        }
        assert_eq!(check_connect(&b, Move::new(2, 2)), 3);

        // Black ↗ diagonal at (4,1),(5,2): length 2 through either end.
        b.place(Move::new(4, 1)).unwrap(); // black
        b.place(Move::new(6, 4)).unwrap(); // white filler
        b.place(Move::new(5, 2)).unwrap(); // black
        assert_eq!(check_connect(&b, Move::new(4, 1)), 2);
        assert_eq!(check_connect(&b, Move::new(5, 2)), 2);
    }

    #[test]
    fn opponent_stones_break_the_run() {
        let mut b = board(3, 5, 5);
        b.place(Move::new(1, 1)).unwrap(); // black
        b.place(Move::new(2, 1)).unwrap(); // white splits the row
        b.place(Move::new(3, 1)).unwrap(); // black
        assert_eq!(check_connect(&b, Move::new(1, 1)), 1);
        assert_eq!(check_connect(&b, Move::new(3, 1)), 1);
    }

    #[test]
    fn run_is_not_counted_past_the_board_edge() {
        let mut b = board(2, 2, 2);
        b.place(Move::new(1, 1)).unwrap();
        assert_eq!(check_connect(&b, Move::new(1, 1)), 1);
    }

    #[test]
    fn mover_win_reports_at_least_k() {
        let mut b = board(9, 9, 5);
        for col in 1..=5 {
            b.place(Move::new(col, 5)).unwrap(); // black
            if col < 5 {
                b.place(Move::new(col, 9)).unwrap(); // white
            }
        }
        assert_eq!(check_connect(&b, Move::new(3, 5)), 5);
        assert_eq!(b.outcome(), Some(crate::board::Outcome::Win(Player::Black)));
    }
}
