//! High-score table and its persistence.
//!
//! - `ScoreTable`: top entries per tier, JSON-compatible
//! - `ScoreStore`: load / record over any `KeyValueStore`
//! - `MemoryStore`, `FileStore`: the two backends

pub mod store;
pub mod table;

pub use store::{FileStore, KeyValueStore, MemoryStore, ScoreStore, DEFAULT_LIMIT, SCORES_KEY};
pub use table::{ScoreEntry, ScoreTable};
