//! Matcher module - run detection and special-tile promotion
//!
//! Scans rows then columns for runs of three or more matchable tiles.
//! The two passes use independent visited sets, so a tile sitting in both a
//! horizontal and a vertical run is reported twice (frozen tiles rely on
//! this to lose two layers in one pass).

use arrayvec::ArrayVec;

use crate::board::{Board, CELL_COUNT};
use crate::types::{Cell, Coord, SpecialKind, BOARD_SIZE};

/// A special tile earned by a run, staged until the matched tiles clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Promotion {
    pub at: Coord,
    pub kind: SpecialKind,
}

/// Result of one full board scan
#[derive(Debug, Clone, Default)]
pub struct MatchScan {
    /// Matched coordinates, row pass first then column pass.
    /// May repeat a coordinate that sits in runs of both orientations.
    pub cells: ArrayVec<Coord, { 2 * CELL_COUNT }>,
    /// Promotions earned, at most one per coordinate
    pub promotions: ArrayVec<Promotion, 32>,
}

/// Two tiles match if neither is empty and either carries a rainbow or their
/// colors are equal
pub fn is_matchable(a: Cell, b: Cell) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.special == Some(SpecialKind::Rainbow) || b.special == Some(SpecialKind::Rainbow) {
        return true;
    }
    a.color == b.color
}

/// Scan the whole board for runs of three or more
pub fn find_matches(board: &Board) -> MatchScan {
    let mut scan = MatchScan::default();

    // Row pass
    for row in 0..BOARD_SIZE {
        scan_line(board, &mut scan, |i| Coord::new(row, i), true);
    }
    // Column pass
    for col in 0..BOARD_SIZE {
        scan_line(board, &mut scan, |i| Coord::new(i, col), false);
    }

    scan
}

/// Scan one line for maximal runs. Runs are built from pairwise-consecutive
/// matchability, so a rainbow bridges neighbors of different colors.
fn scan_line(
    board: &Board,
    scan: &mut MatchScan,
    coord_at: impl Fn(usize) -> Coord,
    horizontal: bool,
) {
    let mut start = 0;
    while start < BOARD_SIZE {
        let mut end = start + 1;
        while end < BOARD_SIZE {
            let prev = board.at(coord_at(end - 1));
            let here = board.at(coord_at(end));
            match (prev, here) {
                (Some(a), Some(b)) if is_matchable(a, b) => end += 1,
                _ => break,
            }
        }

        let len = end - start;
        if len >= 3 {
            for i in start..end {
                scan.cells.push(coord_at(i));
            }
            record_promotion(board, scan, &coord_at, start, end, horizontal);
        }

        start = end;
    }
}

/// Stage a promotion for a qualifying run, anchored at the run's center.
///
/// Priority: a run containing a rainbow always re-earns a rainbow; five or
/// more earns a bomb; exactly four earns a row or column clearer matching
/// the run's orientation. Plain runs of three earn nothing.
fn record_promotion(
    board: &Board,
    scan: &mut MatchScan,
    coord_at: &impl Fn(usize) -> Coord,
    start: usize,
    end: usize,
    horizontal: bool,
) {
    let len = end - start;
    let has_rainbow = (start..end)
        .filter_map(|i| board.at(coord_at(i)))
        .any(|c| c.special == Some(SpecialKind::Rainbow));

    let kind = if has_rainbow {
        SpecialKind::Rainbow
    } else if len >= 5 {
        SpecialKind::Bomb
    } else if len == 4 {
        if horizontal {
            SpecialKind::Row
        } else {
            SpecialKind::Col
        }
    } else {
        return;
    };

    let at = coord_at((start + end - 1) / 2);
    if scan.promotions.iter().any(|p| p.at == at) {
        return;
    }
    if !scan.promotions.is_full() {
        scan.promotions.push(Promotion { at, kind });
    }
}
