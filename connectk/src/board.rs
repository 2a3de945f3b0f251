//! Board state: occupancy grid, turn tracking, and terminal detection.
//!
//! `BoardState` is the single source of truth for legality and game end.
//! Cells are never reset by normal play (no captures); the only mutation
//! is `place`, which rejects occupied cells and terminal boards.

use thiserror::Error;

use crate::config::GameConfig;
use crate::connect::check_connect;

/// One of the two players. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

/// Occupancy of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// Swap stone colors; empty cells are unaffected.
    pub fn flip(self) -> Cell {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::Black => Cell::White,
            Cell::White => Cell::Black,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Cell {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// A (column, row) cell address, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub col: usize,
    pub row: usize,
}

impl Move {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Index of this move in a row-major policy vector over a C-column board.
    pub fn policy_index(&self, cols: usize) -> usize {
        cols * (self.row - 1) + (self.col - 1)
    }

    /// Inverse of `policy_index`.
    pub fn from_policy_index(index: usize, cols: usize) -> Self {
        Self {
            col: index % cols + 1,
            row: index / cols + 1,
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

/// Errors from attempting to mutate a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[error("cell ({col},{row}) is already occupied")]
    Occupied { col: usize, row: usize },

    #[error("move ({col},{row}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        col: usize,
        row: usize,
        rows: usize,
        cols: usize,
    },

    #[error("the game is already over")]
    GameOver,
}

/// Complete state of a connect-K game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    rows: usize,
    cols: usize,
    connect_k: usize,
    /// Row-major occupancy grid.
    cells: Vec<Cell>,
    to_move: Player,
    move_count: usize,
    outcome: Option<Outcome>,
}

impl BoardState {
    /// Create an empty board for the given session configuration.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            connect_k: config.connect_k,
            cells: vec![Cell::Empty; config.rows * config.cols],
            to_move: Player::Black,
            move_count: 0,
            outcome: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn connect_k(&self) -> usize {
        self.connect_k
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    fn index(&self, col: usize, row: usize) -> usize {
        (row - 1) * self.cols + (col - 1)
    }

    fn in_bounds(&self, mv: Move) -> bool {
        (1..=self.cols).contains(&mv.col) && (1..=self.rows).contains(&mv.row)
    }

    /// Occupancy of the cell at the given 1-indexed coordinates.
    /// Out-of-bounds coordinates read as empty; `check_connect` guards
    /// bounds itself before calling this.
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        if col < 1 || col > self.cols || row < 1 || row > self.rows {
            return Cell::Empty;
        }
        self.cells[self.index(col, row)]
    }

    /// All empty cells, enumerated column-major then row-major.
    ///
    /// The order is fixed so that seeded random sampling over the result
    /// is reproducible.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.rows * self.cols - self.move_count);
        for col in 1..=self.cols {
            for row in 1..=self.rows {
                if self.cells[self.index(col, row)] == Cell::Empty {
                    moves.push(Move::new(col, row));
                }
            }
        }
        moves
    }

    /// Place a stone for the side to move.
    ///
    /// On success the cell takes the mover's color, `move_count` is
    /// incremented, the win/draw condition is evaluated, and the turn
    /// flips. On error the board is left untouched.
    pub fn place(&mut self, mv: Move) -> Result<(), IllegalMoveError> {
        if self.is_terminal() {
            return Err(IllegalMoveError::GameOver);
        }
        if !self.in_bounds(mv) {
            return Err(IllegalMoveError::OutOfBounds {
                col: mv.col,
                row: mv.row,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let idx = self.index(mv.col, mv.row);
        if self.cells[idx] != Cell::Empty {
            return Err(IllegalMoveError::Occupied {
                col: mv.col,
                row: mv.row,
            });
        }

        let mover = self.to_move;
        self.cells[idx] = Cell::from(mover);
        self.move_count += 1;

        if check_connect(self, mv) >= self.connect_k {
            self.outcome = Some(Outcome::Win(mover));
        } else if self.move_count == self.rows * self.cols {
            self.outcome = Some(Outcome::Draw);
        }

        // The turn alternates with every accepted move, terminal included.
        self.to_move = mover.opponent();
        Ok(())
    }

    /// Color-swapped copy: every stone, the side to move, and any winner
    /// are flipped.
    pub fn flipped(&self) -> BoardState {
        BoardState {
            rows: self.rows,
            cols: self.cols,
            connect_k: self.connect_k,
            cells: self.cells.iter().map(|c| c.flip()).collect(),
            to_move: self.to_move.opponent(),
            move_count: self.move_count,
            outcome: self.outcome.map(|o| match o {
                Outcome::Win(p) => Outcome::Win(p.opponent()),
                Outcome::Draw => Outcome::Draw,
            }),
        }
    }

    /// The board presented from the canonical black-to-move perspective.
    pub fn canonical(&self) -> BoardState {
        match self.to_move {
            Player::Black => self.clone(),
            Player::White => self.flipped(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: usize, cols: usize, k: usize) -> BoardState {
        BoardState::new(&GameConfig::new(rows, cols, k))
    }

    #[test]
    fn new_board_is_empty_and_black_to_move() {
        let b = board(3, 3, 3);
        assert_eq!(b.move_count(), 0);
        assert_eq!(b.to_move(), Player::Black);
        assert!(!b.is_terminal());
        assert_eq!(b.legal_moves().len(), 9);
    }

    #[test]
    fn legal_moves_are_column_major() {
        let b = board(2, 3, 2);
        let moves = b.legal_moves();
        assert_eq!(
            moves,
            vec![
                Move::new(1, 1),
                Move::new(1, 2),
                Move::new(2, 1),
                Move::new(2, 2),
                Move::new(3, 1),
                Move::new(3, 2),
            ]
        );
    }

    #[test]
    fn place_flips_turn_and_counts() {
        let mut b = board(3, 3, 3);
        b.place(Move::new(2, 2)).unwrap();
        assert_eq!(b.cell(2, 2), Cell::Black);
        assert_eq!(b.to_move(), Player::White);
        assert_eq!(b.move_count(), 1);
        assert_eq!(b.legal_moves().len(), 8);
    }

    #[test]
    fn place_on_occupied_cell_fails_and_leaves_board_unchanged() {
        let mut b = board(3, 3, 3);
        b.place(Move::new(1, 1)).unwrap();
        let before = b.clone();

        let err = b.place(Move::new(1, 1)).unwrap_err();
        assert_eq!(err, IllegalMoveError::Occupied { col: 1, row: 1 });
        assert_eq!(b, before);
    }

    #[test]
    fn place_out_of_bounds_fails() {
        let mut b = board(3, 3, 3);
        assert!(matches!(
            b.place(Move::new(4, 1)),
            Err(IllegalMoveError::OutOfBounds { .. })
        ));
        assert!(matches!(
            b.place(Move::new(1, 0)),
            Err(IllegalMoveError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn legal_move_count_plus_occupied_equals_cells() {
        let mut b = board(3, 4, 3);
        let total = 12;
        assert_eq!(b.legal_moves().len() + b.move_count(), total);

        for mv in [Move::new(1, 1), Move::new(2, 2), Move::new(3, 3)] {
            b.place(mv).unwrap();
            assert_eq!(b.legal_moves().len() + b.move_count(), total);
        }
    }

    #[test]
    fn row_win_on_three_by_three() {
        // Black fills (1,1),(2,1),(3,1) along row 1 while white answers on row 2.
        let mut b = board(3, 3, 3);
        b.place(Move::new(1, 1)).unwrap(); // black
        b.place(Move::new(1, 2)).unwrap(); // white
        b.place(Move::new(2, 1)).unwrap(); // black
        b.place(Move::new(2, 2)).unwrap(); // white
        b.place(Move::new(3, 1)).unwrap(); // black wins

        assert_eq!(b.outcome(), Some(Outcome::Win(Player::Black)));
        assert!(b.is_terminal());
        // Turn still alternates through the terminal move.
        assert_eq!(b.to_move(), Player::White);
        assert_eq!(b.place(Move::new(3, 3)), Err(IllegalMoveError::GameOver));
    }

    #[test]
    fn nine_by_nine_connect_five_column_run() {
        // Five black stones at (1,5)..(5,5) with white replies elsewhere.
        let mut b = board(9, 9, 5);
        for col in 1..=5 {
            b.place(Move::new(col, 5)).unwrap(); // black
            if col < 5 {
                b.place(Move::new(col, 9)).unwrap(); // white, out of the way
            }
        }
        assert_eq!(b.outcome(), Some(Outcome::Win(Player::Black)));
        assert_eq!(b.move_count(), 9);
    }

    #[test]
    fn full_board_without_run_is_a_draw() {
        // 1x2 board with K=2: one black then one white stone, no run.
        let mut b = board(1, 2, 2);
        b.place(Move::new(1, 1)).unwrap();
        b.place(Move::new(2, 1)).unwrap();

        assert_eq!(b.outcome(), Some(Outcome::Draw));
        assert!(b.is_terminal());
        assert!(b.legal_moves().is_empty());
    }

    #[test]
    fn flipped_swaps_colors_and_winner() {
        let mut b = board(3, 3, 3);
        b.place(Move::new(1, 1)).unwrap();
        b.place(Move::new(1, 2)).unwrap();
        b.place(Move::new(2, 1)).unwrap();
        b.place(Move::new(2, 2)).unwrap();
        b.place(Move::new(3, 1)).unwrap();

        let f = b.flipped();
        assert_eq!(f.cell(1, 1), Cell::White);
        assert_eq!(f.cell(1, 2), Cell::Black);
        assert_eq!(f.outcome(), Some(Outcome::Win(Player::White)));
        assert_eq!(f.to_move(), Player::Black);
        assert_eq!(f.flipped(), b);
    }

    #[test]
    fn canonical_is_identity_for_black_and_flip_for_white() {
        let mut b = board(3, 3, 3);
        assert_eq!(b.canonical(), b);

        b.place(Move::new(2, 2)).unwrap();
        let canon = b.canonical();
        assert_eq!(canon.to_move(), Player::Black);
        assert_eq!(canon.cell(2, 2), Cell::White);
    }

    #[test]
    fn policy_index_round_trip() {
        let cols = 7;
        for index in 0..42 {
            let mv = Move::from_policy_index(index, cols);
            assert_eq!(mv.policy_index(cols), index);
        }
        assert_eq!(Move::new(1, 1).policy_index(cols), 0);
        assert_eq!(Move::new(7, 1).policy_index(cols), 6);
        assert_eq!(Move::new(1, 2).policy_index(cols), 7);
    }
}
