//! Callback interfaces the session drives.
//!
//! Frontends implement `Presenter` for visual/audio output and `Scheduler`
//! for the two timed callbacks (countdown and mismatch re-hide). Both are
//! fire-and-forget: the engine ignores late calls, so nothing has to be
//! cancelled except the countdown on restart.

use std::time::Duration;

use crate::cards::Board;
use crate::core::DifficultyTier;
use crate::rules::MismatchTicket;
use crate::scores::ScoreEntry;

/// Audio cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Flip,
    Match,
    Victory,
    Defeat,
}

/// How the finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Won(ScoreEntry),
    TimeUp,
}

/// Everything the end-of-game screen shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndScreen {
    pub tier: DifficultyTier,
    pub result: GameResult,
    /// The tier's high scores after this game was recorded.
    pub high_scores: Vec<ScoreEntry>,
    /// Rank of this game on the list, if it made it.
    pub rank: Option<usize>,
}

impl EndScreen {
    /// Headline text.
    #[must_use]
    pub fn headline(&self) -> String {
        match self.result {
            GameResult::Won(entry) => format!(
                "Congratulations! Score: {} ({} moves / {}s left)",
                entry.score, entry.moves, entry.time_remaining
            ),
            GameResult::TimeUp => "Time's up!".to_string(),
        }
    }

    /// One line per high-score entry, numbered from 1.
    #[must_use]
    pub fn high_score_lines(&self) -> Vec<String> {
        self.high_scores
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "{}. {} pts ({} moves / {}s left)",
                    i + 1,
                    e.score,
                    e.moves,
                    e.time_remaining
                )
            })
            .collect()
    }
}

/// Visual and audio output.
pub trait Presenter {
    /// Lay out a fresh board, every card face-down.
    fn render_board(&mut self, board: &Board);

    /// Turn a card face-up.
    fn reveal(&mut self, position: usize);

    /// Turn a card face-down.
    fn hide(&mut self, position: usize);

    /// Mark a pair as permanently solved. Defaults to nothing extra.
    fn mark_solved(&mut self, _positions: [usize; 2]) {}

    /// Only called while sound is enabled.
    fn play_sound(&mut self, cue: SoundCue);

    fn update_stats(&mut self, moves: u32, time_remaining: u32);

    /// Prompt shown before a game starts, or after the tier changes.
    fn show_start_prompt(&mut self);

    fn show_end_screen(&mut self, screen: &EndScreen);

    fn hide_end_screen(&mut self);
}

/// Owner of the countdown and the delayed re-hide.
pub trait Scheduler {
    /// Call `GameSession::tick` every `interval` until stopped.
    fn start_countdown(&mut self, interval: Duration);

    fn stop_countdown(&mut self);

    /// Call `GameSession::resolve_mismatch(ticket)` once after `delay`.
    fn schedule_mismatch(&mut self, ticket: MismatchTicket, delay: Duration);
}
