//! Game rules: the flip/match state machine and the score formula.
//!
//! `GameEngine` is the only place round state changes. Presentation and
//! persistence react to the outcome values it returns.

pub mod engine;
pub mod scoring;

pub use engine::{
    FlipOutcome, GameEngine, MismatchTicket, Phase, RejectReason, RoundSnapshot, RoundState, TickOutcome,
};
pub use scoring::compute_score;
