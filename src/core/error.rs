//! Error types for the game engine and score persistence.

use thiserror::Error;

use super::config::DifficultyTier;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Invalid engine configuration. Raised at construction, never mid-game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tier {tier} needs {requested} image pairs but the catalog only has {available}")]
    CatalogTooSmall {
        tier: DifficultyTier,
        requested: usize,
        available: usize,
    },

    #[error("image catalog is empty")]
    EmptyCatalog,

    #[error("unknown difficulty tier: {0:?}")]
    UnknownTier(String),
}

/// Failures while persisting the score table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode score table: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Crate-wide error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
