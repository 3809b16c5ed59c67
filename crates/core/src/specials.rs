//! Specials module - blast footprints for activated special tiles
//!
//! Row and column clearers sweep their full line, bombs take the 3x3
//! neighborhood clamped to the board. Rainbows have no blast of their own
//! (their power is matching any color).

use arrayvec::ArrayVec;

use crate::types::{Coord, SpecialKind, BOARD_SIZE};

/// Largest blast footprint (a full 3x3 bomb)
pub const BLAST_MAX: usize = 9;

/// Coordinates removed when a special tile at `at` is activated, including
/// the tile itself
pub fn blast_pattern(kind: SpecialKind, at: Coord) -> ArrayVec<Coord, BLAST_MAX> {
    let mut pattern = ArrayVec::new();

    match kind {
        SpecialKind::Row => {
            for col in 0..BOARD_SIZE {
                pattern.push(Coord::new(at.row, col));
            }
        }
        SpecialKind::Col => {
            for row in 0..BOARD_SIZE {
                pattern.push(Coord::new(row, at.col));
            }
        }
        SpecialKind::Bomb => {
            let row_lo = at.row.saturating_sub(1);
            let row_hi = (at.row + 1).min(BOARD_SIZE - 1);
            let col_lo = at.col.saturating_sub(1);
            let col_hi = (at.col + 1).min(BOARD_SIZE - 1);
            for row in row_lo..=row_hi {
                for col in col_lo..=col_hi {
                    pattern.push(Coord::new(row, col));
                }
            }
        }
        SpecialKind::Rainbow => {}
    }

    pattern
}
