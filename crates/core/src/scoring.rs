//! Scoring module - match scores, combo bonuses, and chain time bonuses
//!
//! All arithmetic is integer-only so scores are deterministic across
//! platforms. Bonus fractions truncate toward zero like the floor of the
//! equivalent percentage.

use crate::types::{CHAIN_BONUS_MAX_SECS, CHAIN_BONUS_MIN_SECS, COMBO_MILESTONES};

/// Breakdown of the score awarded for one cascade step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchScore {
    pub base: u32,
    pub combo_bonus: u32,
    pub milestone_bonus: u32,
    pub total: u32,
}

/// Score for a batch of cleared tiles.
///
/// Base is 10 points per tile scaled by level. Each running combo adds 10%
/// of base; an active milestone adds 5% of base per milestone count.
pub fn match_score(cleared: u32, level: u32, combo: u32, milestone: u32) -> MatchScore {
    let base = cleared * 10 * level;
    let combo_bonus = base * combo / 10;
    let milestone_bonus = if milestone > 0 {
        base * milestone * 5 / 100
    } else {
        0
    };
    MatchScore {
        base,
        combo_bonus,
        milestone_bonus,
        total: base + combo_bonus + milestone_bonus,
    }
}

/// Score for tiles removed by a special-tile blast (15 per tile, scaled by
/// level, no combo scaling)
pub fn special_score(cleared: u32, level: u32) -> u32 {
    cleared * 15 * level
}

/// Seconds awarded per chain step in chain-storm mode: half the combo count,
/// clamped to [1, 5]
pub fn chain_time_bonus(combo: u32) -> u32 {
    (combo / 2).clamp(CHAIN_BONUS_MIN_SECS, CHAIN_BONUS_MAX_SECS)
}

/// The milestone value reached by this combo count, if any
pub fn milestone_for(combo: u32) -> Option<u32> {
    COMBO_MILESTONES.iter().copied().find(|&m| m == combo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_score_scales_with_level() {
        let s1 = match_score(3, 1, 0, 0);
        assert_eq!(s1.base, 30);
        assert_eq!(s1.total, 30);

        let s2 = match_score(3, 4, 0, 0);
        assert_eq!(s2.total, 120);
    }

    #[test]
    fn test_combo_bonus_is_ten_percent_per_combo() {
        let s = match_score(3, 1, 2, 0);
        assert_eq!(s.base, 30);
        assert_eq!(s.combo_bonus, 6);
        assert_eq!(s.total, 36);
    }

    #[test]
    fn test_milestone_bonus() {
        let s = match_score(4, 2, 0, 5);
        // base 80, milestone 5 adds 25%
        assert_eq!(s.base, 80);
        assert_eq!(s.milestone_bonus, 20);
        assert_eq!(s.total, 100);

        assert_eq!(match_score(4, 2, 0, 0).milestone_bonus, 0);
    }

    #[test]
    fn test_bonus_truncation() {
        // base 10: one combo gives exactly 1, milestone 5 gives 2 (10 * 25%
        // truncated)
        let s = match_score(1, 1, 1, 5);
        assert_eq!(s.combo_bonus, 1);
        assert_eq!(s.milestone_bonus, 2);
    }

    #[test]
    fn test_special_score() {
        assert_eq!(special_score(9, 1), 135);
        assert_eq!(special_score(8, 3), 360);
    }

    #[test]
    fn test_chain_time_bonus_clamps() {
        assert_eq!(chain_time_bonus(0), 1);
        assert_eq!(chain_time_bonus(1), 1);
        assert_eq!(chain_time_bonus(4), 2);
        assert_eq!(chain_time_bonus(10), 5);
        assert_eq!(chain_time_bonus(40), 5);
    }

    #[test]
    fn test_milestones_fire_exactly_on_thresholds() {
        assert_eq!(milestone_for(4), None);
        assert_eq!(milestone_for(5), Some(5));
        assert_eq!(milestone_for(6), None);
        assert_eq!(milestone_for(20), Some(20));
        assert_eq!(milestone_for(21), None);
    }
}
