//! Score persistence over a key-value string store.
//!
//! The whole `ScoreTable` is stored as JSON under [`SCORES_KEY`]. Reads
//! fail soft: a missing, unreadable or corrupt value loads as an empty
//! table.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::table::{ScoreEntry, ScoreTable};
use crate::core::{DifficultyTier, StoreError};

/// Key the score table is stored under.
pub const SCORES_KEY: &str = "memoryGameHighScores";

/// Default number of entries kept per tier.
pub const DEFAULT_LIMIT: usize = 5;

/// A string-valued key-value store.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Absent keys are not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store. Contents are lost on drop.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$HOME/.config/memory-match`, if `HOME` is set.
    #[must_use]
    pub fn default_location() -> Option<Self> {
        let home = std::env::var_os("HOME")?;
        Some(Self::new(PathBuf::from(home).join(".config").join("memory-match")))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        // Readers never see a partially written value.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Persisted top-N high scores per tier.
#[derive(Clone, Debug)]
pub struct ScoreStore<S> {
    backend: S,
    limit: usize,
}

impl<S: KeyValueStore> ScoreStore<S> {
    /// Keep the default 5 entries per tier.
    pub fn new(backend: S) -> Self {
        Self::with_limit(backend, DEFAULT_LIMIT)
    }

    pub fn with_limit(backend: S, limit: usize) -> Self {
        Self { backend, limit }
    }

    /// The persisted table, or an empty one if none exists or it is corrupt.
    pub fn load(&self) -> ScoreTable {
        let raw = match self.backend.get(SCORES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ScoreTable::new(),
            Err(e) => {
                warn!(error = %e, "failed to read high scores, starting empty");
                return ScoreTable::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "corrupt high-score data, starting empty");
                ScoreTable::new()
            }
        }
    }

    /// Add a winning game to its tier's list and persist the result.
    ///
    /// Returns the entry's rank if it made the list.
    pub fn record_win(&mut self, tier: DifficultyTier, entry: ScoreEntry) -> Result<Option<usize>, StoreError> {
        let mut table = self.load();
        let rank = table.insert(tier, entry, self.limit);
        let json = serde_json::to_string(&table)?;
        self.backend.set(SCORES_KEY, &json)?;
        debug!(tier = %tier, score = entry.score, ?rank, "high score recorded");
        Ok(rank)
    }

    /// A tier's list, best first.
    pub fn top(&self, tier: DifficultyTier) -> Vec<ScoreEntry> {
        self.load().entries(tier).to_vec()
    }

    /// Forget every recorded score.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.remove(SCORES_KEY)
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }
}
