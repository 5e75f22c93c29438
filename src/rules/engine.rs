//! The game-state engine.
//!
//! `GameEngine` owns the board and round state and exposes the four
//! triggers that mutate it: `start`, `flip_card`, `resolve_mismatch` and
//! `tick`. It performs no I/O and owns no timers; callers react to the
//! returned outcome values.
//!
//! ## Stale callbacks
//!
//! Every `start` (and `abandon`) bumps a generation counter. Mismatch
//! tickets carry the generation they were issued in, so a re-hide
//! scheduled during an earlier game is ignored. Ticks are ignored once the
//! phase has left `Running`.

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::scoring::compute_score;
use crate::cards::Board;
use crate::core::{ConfigError, DifficultyTier, EngineConfig, GameRng};
use crate::scores::ScoreEntry;

/// Lifecycle of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    Won,
    Lost,
}

impl Phase {
    /// Won or lost.
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// Why a flip request was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    NotRunning,
    PairPending,
    AlreadyFlipped,
    AlreadySolved,
    OutOfRange,
}

/// Handle for re-hiding a mismatched pair.
///
/// Only valid for the game it was issued in and only while that exact
/// pair is still pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MismatchTicket {
    pub generation: u64,
    pub positions: [usize; 2],
}

/// Result of a flip request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// No state change.
    Rejected(RejectReason),
    /// First card of a pair is now face-up.
    Revealed { position: usize },
    /// Second card matched the first; both are solved.
    Matched { positions: [usize; 2] },
    /// Second card did not match. Both stay face-up until the ticket is
    /// resolved after `delay`.
    Mismatch {
        position: usize,
        ticket: MismatchTicket,
        delay: Duration,
    },
    /// The final pair was matched; the game is won.
    Won { positions: [usize; 2], entry: ScoreEntry },
}

impl FlipOutcome {
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, FlipOutcome::Rejected(_))
    }

    /// Position turned face-up by this flip, if any.
    #[must_use]
    pub fn revealed_position(&self) -> Option<usize> {
        match self {
            FlipOutcome::Rejected(_) => None,
            FlipOutcome::Revealed { position } | FlipOutcome::Mismatch { position, .. } => Some(*position),
            FlipOutcome::Matched { positions } | FlipOutcome::Won { positions, .. } => Some(positions[1]),
        }
    }
}

/// Result of a countdown step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Phase was not `Running`.
    Ignored,
    /// Time was decremented and the game continues.
    Running { time_remaining: u32 },
    /// Time ran out.
    Lost,
}

/// Mutable state of the current round.
#[derive(Clone, Debug, Default)]
pub struct RoundState {
    flipped: SmallVec<[usize; 2]>,
    solved: FxHashSet<usize>,
    moves: u32,
    time_remaining: u32,
    phase: Phase,
}

impl RoundState {
    fn fresh(time_limit_secs: u32) -> Self {
        Self {
            flipped: SmallVec::new(),
            solved: FxHashSet::default(),
            moves: 0,
            time_remaining: time_limit_secs,
            phase: Phase::Running,
        }
    }
}

/// Serializable view of the engine for frontends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub tier: DifficultyTier,
    pub phase: Phase,
    pub moves: u32,
    pub time_remaining: u32,
    pub flipped: Vec<usize>,
    pub solved: Vec<usize>,
    pub board_size: usize,
    pub generation: u64,
}

/// Memory-match game engine.
///
/// ```
/// use memory_match::{DifficultyTier, EngineConfig, FlipOutcome, GameEngine, Phase};
///
/// let mut engine = GameEngine::with_seed(EngineConfig::default(), 1).unwrap();
/// let board = engine.start(DifficultyTier::Easy).unwrap().clone();
/// assert_eq!(board.len(), 12);
///
/// let partner = board.partner_of(0).unwrap();
/// engine.flip_card(0);
/// assert!(matches!(engine.flip_card(partner), FlipOutcome::Matched { .. }));
/// assert_eq!(engine.phase(), Phase::Running);
/// ```
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: EngineConfig,
    rng: GameRng,
    tier: DifficultyTier,
    board: Board,
    round: RoundState,
    generation: u64,
}

impl GameEngine {
    /// Create an engine with an entropy-seeded RNG.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Create an engine whose boards are reproducible from `seed`.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, GameRng::new(seed))
    }

    fn with_rng(config: EngineConfig, rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            tier: DifficultyTier::default(),
            board: Board::default(),
            round: RoundState::default(),
            generation: 0,
        })
    }

    /// Deal a fresh board for `tier` and start the countdown.
    ///
    /// Discards any game in progress, including a pending mismatch.
    pub fn start(&mut self, tier: DifficultyTier) -> Result<&Board, ConfigError> {
        self.config.check_tier(tier)?;
        let settings = tier.settings();
        let available = self.config.catalog.len();
        let board = Board::deal(&self.config.catalog, settings.pair_count, &mut self.rng).ok_or(
            ConfigError::CatalogTooSmall {
                tier,
                requested: settings.pair_count,
                available,
            },
        )?;

        self.generation = self.generation.wrapping_add(1);
        self.tier = tier;
        self.board = board;
        self.round = RoundState::fresh(settings.time_limit_secs);

        info!(
            tier = %tier,
            cards = self.board.len(),
            time_limit = settings.time_limit_secs,
            generation = self.generation,
            "game started"
        );
        Ok(&self.board)
    }

    /// Drop the current game without scoring it.
    pub fn abandon(&mut self) {
        if self.round.phase == Phase::NotStarted {
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        self.round = RoundState::default();
        info!(tier = %self.tier, generation = self.generation, "game abandoned");
    }

    /// Turn the card at `position` face-up.
    pub fn flip_card(&mut self, position: usize) -> FlipOutcome {
        if let Err(reason) = self.check_flip(position) {
            trace!(position, ?reason, "flip rejected");
            return FlipOutcome::Rejected(reason);
        }

        self.round.flipped.push(position);
        self.round.moves += 1;
        debug!(position, moves = self.round.moves, "card flipped");

        if self.round.flipped.len() < 2 {
            return FlipOutcome::Revealed { position };
        }

        let positions = [self.round.flipped[0], self.round.flipped[1]];
        if self.same_image(positions) {
            self.round.flipped.clear();
            self.round.solved.extend(positions);
            debug!(?positions, solved = self.round.solved.len(), "pair matched");

            if self.round.solved.len() == self.board.len() {
                self.round.phase = Phase::Won;
                let entry = self.score_entry();
                info!(
                    tier = %self.tier,
                    score = entry.score,
                    moves = entry.moves,
                    time_remaining = entry.time_remaining,
                    "game won"
                );
                return FlipOutcome::Won { positions, entry };
            }
            FlipOutcome::Matched { positions }
        } else {
            debug!(?positions, "pair mismatched");
            FlipOutcome::Mismatch {
                position,
                ticket: MismatchTicket {
                    generation: self.generation,
                    positions,
                },
                delay: self.config.reveal_delay,
            }
        }
    }

    fn check_flip(&self, position: usize) -> Result<(), RejectReason> {
        if self.round.phase != Phase::Running {
            return Err(RejectReason::NotRunning);
        }
        if self.round.flipped.len() >= 2 {
            return Err(RejectReason::PairPending);
        }
        if position >= self.board.len() {
            return Err(RejectReason::OutOfRange);
        }
        if self.round.flipped.contains(&position) {
            return Err(RejectReason::AlreadyFlipped);
        }
        if self.round.solved.contains(&position) {
            return Err(RejectReason::AlreadySolved);
        }
        Ok(())
    }

    fn same_image(&self, [a, b]: [usize; 2]) -> bool {
        match (self.board.get(a), self.board.get(b)) {
            (Some(a), Some(b)) => a.image_id == b.image_id,
            _ => false,
        }
    }

    /// Turn a mismatched pair face-down again.
    ///
    /// Returns the hidden positions, or `None` if the ticket is stale: the
    /// game ended or restarted, or the pair is no longer pending.
    pub fn resolve_mismatch(&mut self, ticket: &MismatchTicket) -> Option<[usize; 2]> {
        if self.round.phase != Phase::Running
            || ticket.generation != self.generation
            || self.round.flipped.as_slice() != ticket.positions.as_slice()
        {
            debug!(?ticket, generation = self.generation, "stale mismatch ticket ignored");
            return None;
        }
        self.round.flipped.clear();
        Some(ticket.positions)
    }

    /// Advance the countdown by one step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.round.phase != Phase::Running {
            return TickOutcome::Ignored;
        }
        self.round.time_remaining = self.round.time_remaining.saturating_sub(1);
        trace!(time_remaining = self.round.time_remaining, "tick");

        if self.round.time_remaining == 0 {
            self.round.phase = Phase::Lost;
            info!(
                tier = %self.tier,
                moves = self.round.moves,
                solved = self.round.solved.len(),
                "time up"
            );
            return TickOutcome::Lost;
        }
        TickOutcome::Running {
            time_remaining: self.round.time_remaining,
        }
    }

    /// Score for the current round state.
    #[must_use]
    pub fn compute_score(&self) -> u32 {
        compute_score(
            &self.config.scoring,
            self.pairs_solved(),
            self.round.time_remaining,
            self.round.moves,
        )
    }

    /// The high-score entry for the current round state.
    #[must_use]
    pub fn score_entry(&self) -> ScoreEntry {
        ScoreEntry {
            score: self.compute_score(),
            moves: self.round.moves,
            time_remaining: self.round.time_remaining,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    #[must_use]
    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.round.moves
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.round.time_remaining
    }

    /// Pending positions, in flip order.
    #[must_use]
    pub fn flipped(&self) -> &[usize] {
        &self.round.flipped
    }

    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.round.solved.len()
    }

    #[must_use]
    pub fn pairs_solved(&self) -> u32 {
        (self.round.solved.len() / 2) as u32
    }

    #[must_use]
    pub fn is_solved(&self, position: usize) -> bool {
        self.round.solved.contains(&position)
    }

    /// Pending or solved.
    #[must_use]
    pub fn is_face_up(&self, position: usize) -> bool {
        self.is_solved(position) || self.round.flipped.contains(&position)
    }

    /// True while the countdown should be running.
    #[must_use]
    pub fn countdown_active(&self) -> bool {
        self.round.phase == Phase::Running
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        let mut solved: Vec<usize> = self.round.solved.iter().copied().collect();
        solved.sort_unstable();
        RoundSnapshot {
            tier: self.tier,
            phase: self.round.phase,
            moves: self.round.moves,
            time_remaining: self.round.time_remaining,
            flipped: self.round.flipped.to_vec(),
            solved,
            board_size: self.board.len(),
            generation: self.generation,
        }
    }
}
