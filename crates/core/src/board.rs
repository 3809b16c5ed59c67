//! Board module - manages the 8x8 tile grid
//!
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where row ranges 0..7 (top to bottom),
//! col ranges 0..7 (left to right).

use arrayvec::ArrayVec;

use crate::matcher;
use crate::rng::SimpleRng;
use crate::types::{
    Cell, CellState, Coord, Difficulty, GameMode, SpecialKind, BOARD_SIZE, COLORS, FROZEN_LAYERS,
};

/// Total number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Specials eligible for random seeding (rainbow only comes from 3-in-a-row
/// promotions)
const SEEDED_SPECIALS: [SpecialKind; 3] = [SpecialKind::Row, SpecialKind::Col, SpecialKind::Bomb];

/// The game board - 8x8 grid using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; CELL_COUNT],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return None;
        }
        Some(row * BOARD_SIZE + col)
    }

    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get cell at (row, col). Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Get cell at a coordinate. Returns None if out of bounds
    pub fn at(&self, coord: Coord) -> Option<Cell> {
        self.get(coord.row, coord.col)
    }

    /// Set cell at (row, col). Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Swap the contents of two in-bounds cells
    pub fn swap(&mut self, a: Coord, b: Coord) {
        if let (Some(i), Some(j)) = (Self::index(a.row, a.col), Self::index(b.row, b.col)) {
            self.cells.swap(i, j);
        }
    }

    /// Clear the cell at a coordinate, upholding the empty-cell invariant
    pub fn clear_at(&mut self, coord: Coord) {
        if let Some(idx) = Self::index(coord.row, coord.col) {
            self.cells[idx].clear();
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a board from a grid of plain colors (no specials, no states)
    pub fn from_colors(colors: &[[u8; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Board::new();
        for (row, row_colors) in colors.iter().enumerate() {
            for (col, &color) in row_colors.iter().enumerate() {
                board.set(row, col, Cell::normal(color));
            }
        }
        board
    }

    /// Generate a fresh random board for the given mode and progression.
    ///
    /// Regenerates until the board has no pre-formed match and at least one
    /// valid move, so every new board starts stable and playable.
    pub fn generate(
        rng: &mut SimpleRng,
        level: u32,
        difficulty: Difficulty,
        mode: GameMode,
    ) -> Self {
        loop {
            let board = Self::fill_random(rng, level, difficulty, mode);
            if matcher::find_matches(&board).cells.is_empty() && board.has_valid_move() {
                return board;
            }
        }
    }

    /// One random fill pass with local run avoidance and special seeding
    fn fill_random(rng: &mut SimpleRng, level: u32, difficulty: Difficulty, mode: GameMode) -> Self {
        let (special_pm, state_pm) = seeding_rates(level, difficulty, mode);

        let mut board = Board::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let color = board.pick_color(rng, row, col);

                let mut cell = Cell::normal(color);
                if rng.chance(special_pm) {
                    let kind = SEEDED_SPECIALS[rng.next_range(3) as usize];
                    cell = Cell::special(color, kind);
                } else if rng.chance(state_pm) {
                    cell = if rng.next_range(2) == 0 {
                        Cell::locked(color)
                    } else {
                        Cell::frozen(color, FROZEN_LAYERS)
                    };
                }

                board.set(row, col, cell);
            }
        }
        board
    }

    /// Pick a color that does not complete a run of three with the two cells
    /// to the left or the two cells above
    fn pick_color(&self, rng: &mut SimpleRng, row: usize, col: usize) -> u8 {
        let mut available: ArrayVec<u8, { COLORS as usize }> = (0..COLORS).collect();

        if col >= 2 {
            let left1 = self.get(row, col - 1).and_then(|c| c.color);
            let left2 = self.get(row, col - 2).and_then(|c| c.color);
            if left1.is_some() && left1 == left2 {
                available.retain(|&mut c| Some(c) != left1);
            }
        }
        if row >= 2 {
            let up1 = self.get(row - 1, col).and_then(|c| c.color);
            let up2 = self.get(row - 2, col).and_then(|c| c.color);
            if up1.is_some() && up1 == up2 {
                available.retain(|&mut c| Some(c) != up1);
            }
        }

        available[rng.next_range(available.len() as u32) as usize]
    }

    /// Compact every column downward, preserving vertical order of the
    /// surviving tiles. Returns the destination coordinates of tiles that
    /// moved.
    pub fn drop_cells(&mut self) -> ArrayVec<Coord, CELL_COUNT> {
        let mut moved = ArrayVec::new();

        for col in 0..BOARD_SIZE {
            let mut write_row = BOARD_SIZE;
            for read_row in (0..BOARD_SIZE).rev() {
                if let Some(cell) = self.get(read_row, col) {
                    if !cell.is_empty() {
                        write_row -= 1;
                        if write_row != read_row {
                            self.set(write_row, col, cell);
                            self.clear_at(Coord::new(read_row, col));
                            moved.push(Coord::new(write_row, col));
                        }
                    }
                }
            }
            for row in 0..write_row {
                self.clear_at(Coord::new(row, col));
            }
        }

        moved
    }

    /// Fill the empty cells left at the top of each column with fresh random
    /// tiles. Returns the filled coordinates.
    pub fn refill_top(&mut self, rng: &mut SimpleRng) -> ArrayVec<Coord, CELL_COUNT> {
        let mut filled = ArrayVec::new();

        for col in 0..BOARD_SIZE {
            for row in 0..BOARD_SIZE {
                match self.get(row, col) {
                    Some(cell) if cell.is_empty() => {
                        let color = rng.next_range(COLORS as u32) as u8;
                        self.set(row, col, Cell::normal(color));
                        filled.push(Coord::new(row, col));
                    }
                    // Columns are compacted, so the first occupied cell ends
                    // the empty run
                    _ => break,
                }
            }
        }

        filled
    }

    /// Find the first swap of adjacent cells that would produce a match.
    ///
    /// Probes right and down swaps on a scratch copy, scanning row-major, so
    /// the result is deterministic for a given board.
    pub fn find_first_move(&self) -> Option<(Coord, Coord)> {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let here = Coord::new(row, col);
                for other in [Coord::new(row, col + 1), Coord::new(row + 1, col)] {
                    if other.row >= BOARD_SIZE || other.col >= BOARD_SIZE {
                        continue;
                    }
                    let mut probe = self.clone();
                    probe.swap(here, other);
                    if !matcher::find_matches(&probe).cells.is_empty() {
                        return Some((here, other));
                    }
                }
            }
        }
        None
    }

    /// Check whether any adjacent swap would produce a match
    pub fn has_valid_move(&self) -> bool {
        self.find_first_move().is_some()
    }

    /// Shuffle the existing tiles in place until the board is stable and has
    /// at least one valid move
    pub fn rearrange(&mut self, rng: &mut SimpleRng) {
        loop {
            rng.shuffle(&mut self.cells);
            if matcher::find_matches(self).cells.is_empty() && self.has_valid_move() {
                return;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-mille seeding rates for specials and states during generation
fn seeding_rates(level: u32, difficulty: Difficulty, mode: GameMode) -> (u32, u32) {
    if mode == GameMode::SpecialChallenge {
        return (500, 100);
    }

    let (special_adj, state_adj) = match difficulty {
        Difficulty::Easy => (-10i32, -5i32),
        Difficulty::Normal => (0, 0),
        Difficulty::Hard => (30, 20),
    };
    let special = (level as i32 * 20 + special_adj).max(0) as u32;
    let state = (level as i32 * 10 + state_adj).max(0) as u32;
    (special, state)
}
