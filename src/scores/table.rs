//! High-score entries and the per-tier table.

use serde::{Deserialize, Serialize};

use crate::core::DifficultyTier;

/// One finished game on the high-score list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub score: u32,
    pub moves: u32,
    pub time_remaining: u32,
}

/// Best scores per tier, each list sorted by descending score.
///
/// Serializes as `{"easy": [...], "medium": [...], "hard": [...]}`.
/// Missing tiers deserialize as empty lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    #[serde(default)]
    easy: Vec<ScoreEntry>,
    #[serde(default)]
    medium: Vec<ScoreEntry>,
    #[serde(default)]
    hard: Vec<ScoreEntry>,
}

impl ScoreTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for a tier, best first.
    #[must_use]
    pub fn entries(&self, tier: DifficultyTier) -> &[ScoreEntry] {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Medium => &self.medium,
            DifficultyTier::Hard => &self.hard,
        }
    }

    fn entries_mut(&mut self, tier: DifficultyTier) -> &mut Vec<ScoreEntry> {
        match tier {
            DifficultyTier::Easy => &mut self.easy,
            DifficultyTier::Medium => &mut self.medium,
            DifficultyTier::Hard => &mut self.hard,
        }
    }

    /// Add an entry, re-sort and keep the best `limit`.
    ///
    /// The sort is stable, so on equal scores older entries stay ahead.
    /// Returns the entry's rank (0-based) if it made the list.
    pub fn insert(&mut self, tier: DifficultyTier, entry: ScoreEntry, limit: usize) -> Option<usize> {
        let list = self.entries_mut(tier);
        // Stored lists may have been edited by hand.
        list.sort_by(|a, b| b.score.cmp(&a.score));

        let rank = list.iter().take_while(|e| e.score >= entry.score).count();
        let kept = rank < limit;
        if kept {
            list.insert(rank, entry);
        }
        list.truncate(limit);
        kept.then_some(rank)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.easy.is_empty() && self.medium.is_empty() && self.hard.is_empty()
    }

    /// Best entry for a tier.
    #[must_use]
    pub fn best(&self, tier: DifficultyTier) -> Option<&ScoreEntry> {
        self.entries(tier).first()
    }
}
