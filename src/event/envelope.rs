//! event::envelope
//!
//! Storage metadata wrapped around every recorded event: the global
//! sequence number, the stream it was appended to, its position within
//! that stream, and the recording timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::events::Event;
use crate::types::{ContentStreamId, WorkspaceName};

/// Global position in the event log. Assigned from 1 upward; zero
/// stands for "nothing applied yet" in checkpoints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    /// The checkpoint value before any event was applied.
    pub fn none() -> Self {
        Self(0)
    }

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Whether this checkpoint precedes every event.
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

/// Position within one stream. The first event of a stream has
/// version 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    pub fn first() -> Self {
        Self(0)
    }

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

/// The name of an event stream.
///
/// Content stream events live on `ContentStream:<id>`, workspace
/// events on `Workspace:<name>`.
///
/// # Example
///
/// ```
/// use manifold::event::EventStreamName;
/// use manifold::types::ContentStreamId;
///
/// let stream = ContentStreamId::new("cs-main").unwrap();
/// let name = EventStreamName::for_content_stream(&stream);
/// assert_eq!(name.as_str(), "ContentStream:cs-main");
/// assert_eq!(name.content_stream_id(), Some(stream));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventStreamName(String);

impl EventStreamName {
    pub const CONTENT_STREAM_PREFIX: &'static str = "ContentStream:";
    pub const WORKSPACE_PREFIX: &'static str = "Workspace:";

    pub fn for_content_stream(content_stream_id: &ContentStreamId) -> Self {
        Self(format!(
            "{}{}",
            Self::CONTENT_STREAM_PREFIX,
            content_stream_id.as_str()
        ))
    }

    pub fn for_workspace(workspace_name: &WorkspaceName) -> Self {
        Self(format!(
            "{}{}",
            Self::WORKSPACE_PREFIX,
            workspace_name.as_str()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The content stream this stream name addresses, if it carries
    /// the `ContentStream:` prefix.
    pub fn content_stream_id(&self) -> Option<ContentStreamId> {
        self.0
            .strip_prefix(Self::CONTENT_STREAM_PREFIX)
            .and_then(|rest| ContentStreamId::new(rest).ok())
    }
}

impl std::fmt::Display for EventStreamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recorded event with its storage metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub sequence_number: SequenceNumber,
    pub stream_name: EventStreamName,
    pub version: Version,
    pub event: Event,
    pub recorded_at: DateTime<Utc>,
}
