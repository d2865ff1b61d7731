//! projection::store
//!
//! Durable storage for the content stream projection: a single JSON
//! file holding the checkpoint and the projected rows. Writes go
//! through a temp file and an atomic rename so a crash mid-write
//! leaves the previous state intact.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::SequenceNumber;
use crate::projection::state::ContentStreamRecord;
use crate::types::ContentStreamId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read projection state: {0}")]
    ReadFailed(String),

    #[error("failed to write projection state: {0}")]
    WriteFailed(String),

    #[error("failed to parse projection state: {0}")]
    ParseFailed(String),
}

/// The serialized shape of the projection: how far it has caught up,
/// and one record per known content stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedProjection {
    /// Sequence number of the last event folded in. Zero means none.
    pub checkpoint: SequenceNumber,
    pub rows: BTreeMap<ContentStreamId, ContentStreamRecord>,
}

/// File-backed store for [`PersistedProjection`].
#[derive(Debug, Clone)]
pub struct ProjectionStore {
    path: PathBuf,
}

impl ProjectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProjectionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state. A missing file reads as the empty
    /// projection so a fresh catch-up starts from sequence zero.
    pub fn load(&self) -> Result<PersistedProjection, StoreError> {
        if !self.path.exists() {
            return Ok(PersistedProjection::default());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::ReadFailed(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::ParseFailed(format!("{}: {}", self.path.display(), e)))
    }

    /// Persist the state atomically: write a sibling temp file, sync
    /// it, then rename over the target.
    pub fn save(&self, state: &PersistedProjection) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::WriteFailed(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let tmp_path = self.path.with_extension("tmp");
        let mut tmp: File = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(|e| StoreError::WriteFailed(format!("{}: {}", tmp_path.display(), e)))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| StoreError::WriteFailed(format!("{}: {}", tmp_path.display(), e)))?;
        tmp.sync_all()
            .map_err(|e| StoreError::WriteFailed(format!("{}: {}", tmp_path.display(), e)))?;

        fs::rename(&tmp_path, &self.path)
            .map_err(|e| StoreError::WriteFailed(format!("{}: {}", self.path.display(), e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Version;
    use crate::projection::state::ContentStreamState;
    use tempfile::TempDir;

    fn sample_state() -> PersistedProjection {
        let id = ContentStreamId::new("cs-one").unwrap();
        let mut rows = BTreeMap::new();
        rows.insert(
            id.clone(),
            ContentStreamRecord {
                content_stream_id: id,
                version: Version::new(3),
                source_content_stream_id: None,
                state: ContentStreamState::InUseByWorkspace,
                removed: false,
            },
        );
        PersistedProjection {
            checkpoint: SequenceNumber::new(7),
            rows,
        }
    }

    #[test]
    fn missing_file_loads_as_the_empty_projection() {
        let dir = TempDir::new().unwrap();
        let store = ProjectionStore::new(dir.path().join("projection.json"));
        let state = store.load().unwrap();
        assert_eq!(state, PersistedProjection::default());
        assert_eq!(state.checkpoint, SequenceNumber::none());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = ProjectionStore::new(dir.path().join("projection.json"));
        let state = sample_state();
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = ProjectionStore::new(dir.path().join("nested/deeper/projection.json"));
        store.save(&sample_state()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn save_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let store = ProjectionStore::new(dir.path().join("projection.json"));
        store.save(&sample_state()).unwrap();

        let mut updated = sample_state();
        updated.checkpoint = SequenceNumber::new(12);
        store.save(&updated).unwrap();

        assert_eq!(store.load().unwrap().checkpoint, SequenceNumber::new(12));
    }

    #[test]
    fn corrupt_state_surfaces_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projection.json");
        fs::write(&path, "{ not json").unwrap();
        let store = ProjectionStore::new(&path);
        match store.load() {
            Err(StoreError::ParseFailed(msg)) => assert!(msg.contains("projection.json")),
            other => panic!("expected parse failure, got {:?}", other),
        }
    }
}
