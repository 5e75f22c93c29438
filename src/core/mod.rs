//! Core engine types: configuration, errors, RNG.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{DifficultyTier, EngineConfig, ScoringRules, TierSettings};
pub use error::{ConfigError, Error, Result, StoreError};
pub use rng::GameRng;
