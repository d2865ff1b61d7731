//! projection::projection
//!
//! The content stream projection: folds lifecycle and node events into
//! the per-stream read model, tracking a catch-up checkpoint.
//!
//! # Architecture
//!
//! The projection is a catch-up subscriber over the event log. It
//! dispatches through [`ContentStreamProjection::can_handle`], applies
//! accepted events one at a time, and persists rows plus checkpoint as
//! a single unit after each batch. Events the projection does not
//! handle still advance the checkpoint, so replays stay idempotent.
//!
//! # Invariants
//!
//! - The checkpoint only moves forward, and never past an event that
//!   failed to apply.
//! - Rows and checkpoint are loaded and saved together; a crash can
//!   lose the tail of a batch but never tear rows from checkpoint.
//! - Reset and catch-up hold the projection lock, so a rebuild cannot
//!   race a concurrent catch-up.

use serde::Serialize;

use crate::event::{Event, EventEnvelope, EventLog, SequenceNumber, Version};
use crate::projection::finder::ContentStreamFinder;
use crate::projection::lock::{LockError, ProjectionLock};
use crate::projection::state::{ContentStreamRecord, ContentStreamState};
use crate::projection::store::{PersistedProjection, ProjectionStore, StoreError};
use crate::types::ContentStreamId;

use thiserror::Error;

/// Errors from projection maintenance.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A version-carrying event arrived on a stream that does not name
    /// a content stream.
    #[error("event stream \"{0}\" does not name a content stream")]
    UnexpectedStreamName(String),

    /// An event passed `can_handle` but no apply arm covers it. This
    /// is a programming error, not a data error.
    #[error("no apply handler for accepted event {0}")]
    UnhandledEvent(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Lock(#[from] LockError),
}

/// Checkpoint and row count, for operator tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectionStatus {
    pub checkpoint: SequenceNumber,
    pub rows: usize,
}

/// Read model of all content streams, derived from the event log.
#[derive(Debug)]
pub struct ContentStreamProjection {
    store: ProjectionStore,
    state: PersistedProjection,
}

impl ContentStreamProjection {
    /// Open the projection, loading previously persisted rows and
    /// checkpoint. A missing state file starts the projection empty.
    pub fn new(store: ProjectionStore) -> Result<Self, ProjectionError> {
        let state = store.load()?;
        Ok(ContentStreamProjection { store, state })
    }

    /// Whether this projection reacts to `event`.
    ///
    /// Lifecycle events are dispatched by an explicit list; any event
    /// embedding a content stream id is additionally accepted for the
    /// version bump. Workspace removal is deliberately absent: it
    /// does not touch any content stream row.
    pub fn can_handle(event: &Event) -> bool {
        matches!(
            event,
            Event::ContentStreamWasCreated { .. }
                | Event::RootWorkspaceWasCreated { .. }
                | Event::WorkspaceWasCreated { .. }
                | Event::ContentStreamWasForked { .. }
                | Event::WorkspaceWasDiscarded { .. }
                | Event::WorkspaceWasPartiallyDiscarded { .. }
                | Event::WorkspaceWasPartiallyPublished { .. }
                | Event::WorkspaceWasPublished { .. }
                | Event::WorkspaceWasRebased { .. }
                | Event::WorkspaceRebaseFailed { .. }
                | Event::ContentStreamWasRemoved { .. }
        ) || event.embedded_content_stream_id().is_some()
    }

    /// Apply all events recorded after the current checkpoint.
    ///
    /// Returns the number of events applied. Events `can_handle`
    /// rejects are skipped but still advance the checkpoint. On an
    /// apply failure the progress made so far is persisted before the
    /// error is returned, so the failing event is retried on the next
    /// catch-up rather than silently skipped.
    pub fn catch_up(&mut self, log: &EventLog) -> Result<u64, ProjectionError> {
        let _lock = ProjectionLock::acquire(self.lock_path())?;

        let mut applied = 0u64;
        for envelope in log.events_since(self.state.checkpoint) {
            if Self::can_handle(&envelope.event) {
                if let Err(e) = self.apply(envelope) {
                    self.store.save(&self.state)?;
                    return Err(e);
                }
                applied += 1;
            }
            self.state.checkpoint = envelope.sequence_number;
        }
        self.store.save(&self.state)?;

        tracing::debug!(
            applied,
            checkpoint = self.state.checkpoint.value(),
            "projection caught up"
        );
        Ok(applied)
    }

    /// Drop all rows and rewind the checkpoint to none.
    ///
    /// Holds the projection lock for the duration so a concurrent
    /// catch-up cannot interleave with the truncation.
    pub fn reset(&mut self) -> Result<(), ProjectionError> {
        let _lock = ProjectionLock::acquire(self.lock_path())?;

        self.state = PersistedProjection::default();
        self.store.save(&self.state)?;

        tracing::debug!(path = %self.store.path().display(), "projection reset");
        Ok(())
    }

    /// Sequence number of the last event folded in.
    pub fn checkpoint(&self) -> SequenceNumber {
        self.state.checkpoint
    }

    pub fn status(&self) -> ProjectionStatus {
        ProjectionStatus {
            checkpoint: self.state.checkpoint,
            rows: self.state.rows.len(),
        }
    }

    /// Query interface over the projected rows.
    pub fn finder(&self) -> ContentStreamFinder<'_> {
        ContentStreamFinder::new(&self.state.rows)
    }

    fn lock_path(&self) -> std::path::PathBuf {
        self.store.path().with_extension("lock")
    }

    fn apply(&mut self, envelope: &EventEnvelope) -> Result<(), ProjectionError> {
        match &envelope.event {
            Event::ContentStreamWasCreated { content_stream_id } => {
                let version = Self::extract_version(envelope)?;
                self.insert_row(
                    content_stream_id.clone(),
                    version,
                    None,
                    ContentStreamState::Created,
                );
            }
            Event::ContentStreamWasForked {
                new_content_stream_id,
                source_content_stream_id,
            } => {
                let version = Self::extract_version(envelope)?;
                self.insert_row(
                    new_content_stream_id.clone(),
                    version,
                    Some(source_content_stream_id.clone()),
                    ContentStreamState::Rebasing,
                );
            }
            Event::ContentStreamWasRemoved { content_stream_id } => {
                let version = Self::extract_version(envelope)?;
                if let Some(row) = self.state.rows.get_mut(content_stream_id) {
                    row.removed = true;
                    row.version = version;
                }
            }
            Event::RootWorkspaceWasCreated {
                new_content_stream_id,
                ..
            }
            | Event::WorkspaceWasCreated {
                new_content_stream_id,
                ..
            } => {
                self.update_state(new_content_stream_id, ContentStreamState::InUseByWorkspace);
            }
            Event::WorkspaceWasDiscarded {
                new_content_stream_id,
                previous_content_stream_id,
                ..
            }
            | Event::WorkspaceWasPartiallyDiscarded {
                new_content_stream_id,
                previous_content_stream_id,
                ..
            }
            | Event::WorkspaceWasRebased {
                new_content_stream_id,
                previous_content_stream_id,
                ..
            } => {
                self.update_state(new_content_stream_id, ContentStreamState::InUseByWorkspace);
                self.update_state(previous_content_stream_id, ContentStreamState::NoLongerInUse);
            }
            Event::WorkspaceWasPartiallyPublished {
                new_source_content_stream_id,
                previous_source_content_stream_id,
                ..
            }
            | Event::WorkspaceWasPublished {
                new_source_content_stream_id,
                previous_source_content_stream_id,
                ..
            } => {
                self.update_state(
                    new_source_content_stream_id,
                    ContentStreamState::InUseByWorkspace,
                );
                self.update_state(
                    previous_source_content_stream_id,
                    ContentStreamState::NoLongerInUse,
                );
            }
            Event::WorkspaceRebaseFailed {
                candidate_content_stream_id,
                ..
            } => {
                self.update_state(candidate_content_stream_id, ContentStreamState::RebaseError);
            }
            other => match other.embedded_content_stream_id() {
                Some(id) => {
                    let id = id.clone();
                    let version = Self::extract_version(envelope)?;
                    if let Some(row) = self.state.rows.get_mut(&id) {
                        row.version = version;
                    }
                }
                None => return Err(ProjectionError::UnhandledEvent(other.name())),
            },
        }
        Ok(())
    }

    /// Version-carrying events must live on a `ContentStream:` stream;
    /// anything else is a wiring error upstream.
    fn extract_version(envelope: &EventEnvelope) -> Result<Version, ProjectionError> {
        if envelope.stream_name.content_stream_id().is_none() {
            return Err(ProjectionError::UnexpectedStreamName(
                envelope.stream_name.as_str().to_owned(),
            ));
        }
        Ok(envelope.version)
    }

    fn insert_row(
        &mut self,
        id: ContentStreamId,
        version: Version,
        source: Option<ContentStreamId>,
        state: ContentStreamState,
    ) {
        self.state.rows.insert(
            id.clone(),
            ContentStreamRecord {
                content_stream_id: id,
                version,
                source_content_stream_id: source,
                state,
                removed: false,
            },
        );
    }

    fn update_state(&mut self, id: &ContentStreamId, state: ContentStreamState) {
        if let Some(row) = self.state.rows.get_mut(id) {
            row.state = state;
        }
    }
}
