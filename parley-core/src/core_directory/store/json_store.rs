//! JSON file store
//!
//! Persists the whole `State` aggregate to a single pretty-printed JSON
//! file, rewritten in full on every save. Saves go through a temp file
//! and an atomic rename so a failed write never leaves a truncated state
//! file behind.

use super::errors::StoreResult;
use crate::core_directory::model::State;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Whole-state load/save against one JSON file
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state. A missing file is an empty state, not an
    /// error, so a fresh deployment starts from nothing.
    pub fn load(&self) -> StoreResult<State> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "state file absent, starting empty");
            return Ok(State::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), "state loaded");
        Ok(state)
    }

    /// Rewrite the state file in full. Writes to a `.tmp` sibling first,
    /// then renames over the target.
    pub fn save(&self, state: &State) -> StoreResult<()> {
        let data = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, data)?;
        fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}
