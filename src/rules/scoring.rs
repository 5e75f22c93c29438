//! End-of-game score formula.

use crate::core::ScoringRules;

/// Score for a finished (or in-progress) round.
///
/// `max(0, pairs_solved * pair_points + time_remaining * second_points - moves * move_penalty)`
#[must_use]
pub fn compute_score(rules: &ScoringRules, pairs_solved: u32, time_remaining: u32, moves: u32) -> u32 {
    let gained = i64::from(pairs_solved) * i64::from(rules.pair_points)
        + i64::from(time_remaining) * i64::from(rules.second_points);
    let penalty = i64::from(moves) * i64::from(rules.move_penalty);
    (gained - penalty).clamp(0, i64::from(u32::MAX)) as u32
}
