//! projection::state
//!
//! The content stream read model row and its state machine.
//!
//! States move `CREATED -> IN_USE_BY_WORKSPACE` once a workspace picks
//! the stream up, and end in `NO_LONGER_IN_USE` after a publish,
//! discard, or rebase replaces it. Fork candidates start in `REBASING`
//! and either get adopted (`IN_USE_BY_WORKSPACE`) or fail
//! (`REBASE_ERROR`). `removed` is orthogonal: a stream keeps its state
//! when it is marked removed.

use serde::{Deserialize, Serialize};

use crate::event::Version;
use crate::types::ContentStreamId;

/// Lifecycle state of a content stream, as projected from events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStreamState {
    Created,
    InUseByWorkspace,
    Rebasing,
    RebaseError,
    NoLongerInUse,
}

impl ContentStreamState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStreamState::Created => "CREATED",
            ContentStreamState::InUseByWorkspace => "IN_USE_BY_WORKSPACE",
            ContentStreamState::Rebasing => "REBASING",
            ContentStreamState::RebaseError => "REBASE_ERROR",
            ContentStreamState::NoLongerInUse => "NO_LONGER_IN_USE",
        }
    }
}

impl std::fmt::Display for ContentStreamState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One projected content stream row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentStreamRecord {
    pub content_stream_id: ContentStreamId,
    /// Version of the latest applied event naming this stream. Inserts
    /// record the insertion version.
    pub version: Version,
    /// The stream this one was forked off, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_content_stream_id: Option<ContentStreamId>,
    pub state: ContentStreamState,
    #[serde(default)]
    pub removed: bool,
}
