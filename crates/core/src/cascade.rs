//! Cascade module - stepwise chain-reaction resolution
//!
//! A cascade advances one step at a time so the caller can pace the steps
//! for animation. Each step scans for matches, clears them (honoring locked
//! and frozen states), drops survivors, refills the top, and stamps earned
//! special tiles onto whatever landed at the run centers.
//!
//! A hard step cap forces runaway chains to settle; hitting it is surfaced
//! so the session can count it.

use crate::board::Board;
use crate::matcher::{self, Promotion};
use crate::rng::SimpleRng;
use crate::types::{Cell, CellState, CASCADE_MAX_STEPS, CASCADE_STEP_MS};

/// Pacing and safety limits for a cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeConfig {
    /// Delay between steps, driven by the session clock
    pub step_delay_ms: u32,
    /// Steps after which the cascade is forced stable
    pub max_steps: u32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: CASCADE_STEP_MS,
            max_steps: CASCADE_MAX_STEPS,
        }
    }
}

/// Outcome of one cascade step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    /// Matches were found and processed
    Matched {
        /// Tiles actually removed (unlocked and still-frozen tiles are not
        /// counted)
        cleared: u32,
        /// Special tiles stamped from run promotions
        promoted: u32,
        /// Tiles that fell during compaction
        fell: u32,
        /// Fresh tiles spawned at the top
        refilled: u32,
    },
    /// No matches remain; the board is stable
    Stable,
    /// The step cap was reached; the cascade is forced stable
    CapHit,
}

/// Stepwise cascade resolver
#[derive(Debug, Clone)]
pub struct CascadeEngine {
    config: CascadeConfig,
    steps: u32,
}

impl CascadeEngine {
    pub fn new(config: CascadeConfig) -> Self {
        Self { config, steps: 0 }
    }

    pub fn config(&self) -> CascadeConfig {
        self.config
    }

    /// Steps taken since the last `begin`
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Reset the step counter for a new cascade
    pub fn begin(&mut self) {
        self.steps = 0;
    }

    /// Advance the cascade by one step
    pub fn resolve_step(&mut self, board: &mut Board, rng: &mut SimpleRng) -> CascadeStep {
        if self.steps >= self.config.max_steps {
            return CascadeStep::CapHit;
        }
        self.steps += 1;

        let scan = matcher::find_matches(board);
        if scan.cells.is_empty() {
            return CascadeStep::Stable;
        }

        let mut cleared = 0;
        for &coord in &scan.cells {
            let Some(mut cell) = board.at(coord) else {
                continue;
            };
            // A coordinate shared by a row and a column run appears twice;
            // once emptied it scores nothing more
            if cell.is_empty() {
                continue;
            }

            match cell.state {
                CellState::Locked => {
                    // First match unlocks, it does not clear
                    cell.state = CellState::Normal;
                    board.set(coord.row, coord.col, cell);
                }
                CellState::Frozen => {
                    cell.frozen_layers = cell.frozen_layers.saturating_sub(1);
                    if cell.frozen_layers > 0 {
                        board.set(coord.row, coord.col, cell);
                    } else {
                        board.clear_at(coord);
                        cleared += 1;
                    }
                }
                CellState::Normal | CellState::Chained => {
                    board.clear_at(coord);
                    cleared += 1;
                }
            }
        }

        let fell = board.drop_cells().len() as u32;
        let refilled = board.refill_top(rng).len() as u32;
        let promoted = apply_promotions(board, &scan.promotions);

        CascadeStep::Matched {
            cleared,
            promoted,
            fell,
            refilled,
        }
    }
}

/// Stamp earned specials onto whatever tile now occupies each run center
fn apply_promotions(board: &mut Board, promotions: &[Promotion]) -> u32 {
    let mut applied = 0;
    for promo in promotions {
        if let Some(cell) = board.at(promo.at) {
            if let Some(color) = cell.color {
                board.set(promo.at.row, promo.at.col, Cell::special(color, promo.kind));
                applied += 1;
            }
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SpecialKind, BOARD_SIZE};

    fn striped_board() -> Board {
        let mut colors = [[0u8; BOARD_SIZE]; BOARD_SIZE];
        for (row, row_colors) in colors.iter_mut().enumerate() {
            for (col, c) in row_colors.iter_mut().enumerate() {
                *c = ((col + 2 * row) % 7) as u8;
            }
        }
        Board::from_colors(&colors)
    }

    #[test]
    fn test_stable_board_resolves_immediately() {
        let mut board = striped_board();
        let mut rng = SimpleRng::new(1);
        let mut engine = CascadeEngine::new(CascadeConfig::default());
        engine.begin();

        assert_eq!(engine.resolve_step(&mut board, &mut rng), CascadeStep::Stable);
    }

    #[test]
    fn test_match_clears_and_refills() {
        let mut board = striped_board();
        board.set(0, 0, Cell::normal(6));
        board.set(0, 1, Cell::normal(6));
        board.set(0, 2, Cell::normal(6));

        let mut rng = SimpleRng::new(1);
        let mut engine = CascadeEngine::new(CascadeConfig::default());
        engine.begin();

        match engine.resolve_step(&mut board, &mut rng) {
            CascadeStep::Matched {
                cleared, refilled, ..
            } => {
                assert_eq!(cleared, 3);
                assert_eq!(refilled, 3);
            }
            other => panic!("expected a match, got {:?}", other),
        }
        // The board is full again after the step
        assert!(board.cells().iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_locked_tile_unlocks_without_clearing() {
        let mut board = striped_board();
        board.set(0, 0, Cell::normal(6));
        board.set(0, 1, Cell::locked(6));
        board.set(0, 2, Cell::normal(6));

        let mut rng = SimpleRng::new(1);
        let mut engine = CascadeEngine::new(CascadeConfig::default());
        engine.begin();

        match engine.resolve_step(&mut board, &mut rng) {
            CascadeStep::Matched { cleared, .. } => assert_eq!(cleared, 2),
            other => panic!("expected a match, got {:?}", other),
        }
        // The formerly locked tile survived in place (nothing was cleared in
        // its column) and is now normal
        let survivor = board.get(0, 1);
        assert_eq!(survivor.and_then(|c| c.color), Some(6));
        assert_eq!(survivor.map(|c| c.state), Some(CellState::Normal));
    }

    #[test]
    fn test_frozen_tile_needs_two_hits() {
        let mut board = striped_board();
        board.set(7, 0, Cell::normal(6));
        board.set(7, 1, Cell::frozen(6, 2));
        board.set(7, 2, Cell::normal(6));

        let mut rng = SimpleRng::new(1);
        let mut engine = CascadeEngine::new(CascadeConfig::default());
        engine.begin();

        match engine.resolve_step(&mut board, &mut rng) {
            CascadeStep::Matched { cleared, .. } => assert_eq!(cleared, 2),
            other => panic!("expected a match, got {:?}", other),
        }
        // One layer gone, tile still frozen in place at the bottom row
        let cell = board.get(7, 1);
        assert_eq!(cell.map(|c| c.state), Some(CellState::Frozen));
        assert_eq!(cell.and_then(|c| c.color), Some(6));
        assert_eq!(cell.map(|c| c.frozen_layers), Some(1));
    }

    #[test]
    fn test_cross_match_thaws_frozen_tile_in_one_step() {
        let mut board = striped_board();
        // Frozen tile at the crossing of a horizontal and a vertical run
        board.set(2, 1, Cell::normal(6));
        board.set(2, 2, Cell::frozen(6, 2));
        board.set(2, 3, Cell::normal(6));
        board.set(1, 2, Cell::normal(6));
        board.set(3, 2, Cell::normal(6));

        let mut rng = SimpleRng::new(1);
        let mut engine = CascadeEngine::new(CascadeConfig::default());
        engine.begin();

        match engine.resolve_step(&mut board, &mut rng) {
            CascadeStep::Matched { cleared, .. } => {
                // Both layers lost in one step: 4 plain tiles + the thawed one
                assert_eq!(cleared, 5);
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_promotion_lands_on_refilled_board() {
        let mut board = striped_board();
        for col in 2..6 {
            board.set(1, col, Cell::normal(6));
        }

        let mut rng = SimpleRng::new(1);
        let mut engine = CascadeEngine::new(CascadeConfig::default());
        engine.begin();

        match engine.resolve_step(&mut board, &mut rng) {
            CascadeStep::Matched { promoted, .. } => assert_eq!(promoted, 1),
            other => panic!("expected a match, got {:?}", other),
        }
        // The run center inherits the color of whatever fell there
        assert_eq!(
            board.get(1, 3).and_then(|c| c.special),
            Some(SpecialKind::Row)
        );
    }

    #[test]
    fn test_cap_forces_settle() {
        let mut board = striped_board();
        let mut rng = SimpleRng::new(1);
        let mut engine = CascadeEngine::new(CascadeConfig {
            step_delay_ms: 0,
            max_steps: 0,
        });
        engine.begin();

        assert_eq!(engine.resolve_step(&mut board, &mut rng), CascadeStep::CapHit);
    }
}
