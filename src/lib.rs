//! # memory-match
//!
//! Engine for a memory-matching card game: a shuffled board of face-down
//! card pairs is revealed two at a time against a countdown, and wins are
//! recorded in a persisted top-5 table per difficulty tier.
//!
//! ## Design Principles
//!
//! 1. **Owned state**: `GameEngine` is an explicit value; no statics.
//!
//! 2. **Outcomes, not callbacks**: every trigger returns a value describing
//!    what happened. Timed follow-ups (countdown, mismatch re-hide) are
//!    requests the caller schedules; late calls are ignored by phase and
//!    generation checks.
//!
//! 3. **Uniform shuffle**: boards are dealt with Fisher-Yates over a
//!    seedable ChaCha8 RNG, so layouts are reproducible in tests.
//!
//! ## Modules
//!
//! - `core`: Difficulty tiers, configuration, errors, RNG
//! - `cards`: Image catalog, cards, board dealing
//! - `rules`: The flip/match/timer state machine and scoring
//! - `scores`: High-score table and key-value persistence
//! - `session`: Presenter/scheduler glue for frontends

pub mod core;
pub mod cards;
pub mod rules;
pub mod scores;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, DifficultyTier, EngineConfig, Error, GameRng, Result, ScoringRules, StoreError, TierSettings,
};

pub use crate::cards::{Board, Card, ImageCatalog, ImageId, ImagePair};

pub use crate::rules::{
    compute_score, FlipOutcome, GameEngine, MismatchTicket, Phase, RejectReason, RoundSnapshot, TickOutcome,
};

pub use crate::scores::{FileStore, KeyValueStore, MemoryStore, ScoreEntry, ScoreStore, ScoreTable, SCORES_KEY};

pub use crate::session::{EndScreen, GameResult, GameSession, Presenter, Scheduler, Settings, SoundCue};
