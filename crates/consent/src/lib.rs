//! Persisted cookie-consent decision.
//!
//! The banner writes exactly one value: the visitor's decision plus the
//! moment it was made. Whether the banner is shown at all is decided by a
//! collaborator that reads this record before the engine is constructed.

use common::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The visitor's cookie decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Accepted,
    Declined,
}

/// One stored consent decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub decision: Decision,
    /// Unix timestamp in seconds, supplied by the caller.
    pub timestamp: u64,
}

/// Single-key store backed by a JSON file.
#[derive(Clone, Debug)]
pub struct ConsentStore {
    path: PathBuf,
}

impl ConsentStore {
    /// Creates a store writing to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Persists `decision`, overwriting any earlier record.
    pub fn record(&self, decision: Decision, timestamp: u64) -> GameResult<ConsentRecord> {
        let record = ConsentRecord {
            decision,
            timestamp,
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| GameError::Parse(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(record)
    }

    /// Reads the stored record, or `Ok(None)` when nothing was decided yet.
    pub fn load(&self) -> GameResult<Option<ConsentRecord>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record =
            serde_json::from_str(&data).map_err(|e| GameError::Parse(e.to_string()))?;
        Ok(Some(record))
    }
}
