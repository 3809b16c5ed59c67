//! Puzzle module - hand-authored levels with fixed layouts and win targets
//!
//! Each level pins its starting colors, a move budget, and a completion
//! target. Every layout locks the center 2x2 block as its obstacle.

use crate::board::Board;
use crate::types::{Cell, CellState, BOARD_SIZE};

/// Completion condition for a puzzle level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleTarget {
    /// Reach at least this score
    Score(u32),
    /// Remove every tile in the given state from the board
    ClearState(CellState),
}

/// A single puzzle level definition
#[derive(Debug, Clone, Copy)]
pub struct PuzzleLevel {
    pub level: u32,
    pub layout: [[u8; BOARD_SIZE]; BOARD_SIZE],
    pub moves: u32,
    pub target: PuzzleTarget,
}

/// The built-in level set, in play order
pub fn levels() -> &'static [PuzzleLevel] {
    &LEVELS
}

/// Look up a level by number, falling back to the first level
pub fn level(number: u32) -> &'static PuzzleLevel {
    LEVELS
        .iter()
        .find(|l| l.level == number)
        .unwrap_or(&LEVELS[0])
}

/// Build the starting board for a level: its color layout with the center
/// 2x2 block locked
pub fn build_board(level: &PuzzleLevel) -> Board {
    let mut board = Board::from_colors(&level.layout);
    for row in 3..=4 {
        for col in 3..=4 {
            if let Some(cell) = board.get(row, col) {
                if let Some(color) = cell.color {
                    board.set(row, col, Cell::locked(color));
                }
            }
        }
    }
    board
}

/// True once the target is met on the given board and score
pub fn is_complete(target: PuzzleTarget, board: &Board, score: u32) -> bool {
    match target {
        PuzzleTarget::Score(goal) => score >= goal,
        PuzzleTarget::ClearState(state) => board.cells().iter().all(|c| c.state != state),
    }
}

static LEVELS: [PuzzleLevel; 2] = [
    PuzzleLevel {
        level: 1,
        layout: [
            [0, 1, 2, 3, 4, 5, 6, 0],
            [1, 2, 3, 4, 5, 6, 0, 1],
            [2, 3, 4, 5, 6, 0, 1, 2],
            [3, 4, 5, 6, 0, 1, 2, 3],
            [4, 5, 6, 0, 1, 2, 3, 4],
            [5, 6, 0, 1, 2, 3, 4, 5],
            [6, 0, 1, 2, 3, 4, 5, 6],
            [0, 1, 2, 3, 4, 5, 6, 0],
        ],
        moves: 5,
        target: PuzzleTarget::Score(500),
    },
    PuzzleLevel {
        level: 2,
        layout: [
            [0, 0, 1, 1, 2, 2, 3, 3],
            [0, 0, 1, 1, 2, 2, 3, 3],
            [4, 4, 5, 5, 6, 6, 0, 0],
            [4, 4, 5, 5, 6, 6, 0, 0],
            [1, 1, 2, 2, 3, 3, 4, 4],
            [1, 1, 2, 2, 3, 3, 4, 4],
            [5, 5, 6, 6, 0, 0, 1, 1],
            [5, 5, 6, 6, 0, 0, 1, 1],
        ],
        moves: 3,
        target: PuzzleTarget::ClearState(CellState::Locked),
    },
];
