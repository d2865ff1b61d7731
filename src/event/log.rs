//! event::log
//!
//! The append-only, ordered event log.
//!
//! The log is the sole serialization point for writes: `append`
//! assigns the next global sequence number and the next per-stream
//! version under one `&mut` borrow, so ordering is total and
//! per-stream versions are gapless. Readers catch up through
//! `events_since`, which streams envelopes strictly after a
//! checkpoint in global order.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::event::envelope::{EventEnvelope, EventStreamName, SequenceNumber, Version};
use crate::event::events::Event;

/// An ordered, append-only event log.
///
/// # Example
///
/// ```
/// use manifold::event::{Event, EventLog, EventStreamName, SequenceNumber};
/// use manifold::types::ContentStreamId;
///
/// let mut log = EventLog::new();
/// let stream = ContentStreamId::new("cs-main").unwrap();
/// let envelope = log.append(
///     EventStreamName::for_content_stream(&stream),
///     Event::ContentStreamWasCreated { content_stream_id: stream },
/// );
///
/// assert_eq!(envelope.sequence_number.value(), 1);
/// assert_eq!(envelope.version.value(), 0);
/// assert_eq!(log.events_since(SequenceNumber::none()).count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    envelopes: Vec<EventEnvelope>,
    stream_versions: BTreeMap<EventStreamName, Version>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event on a stream, assigning the next global sequence
    /// number and the stream's next version.
    pub fn append(&mut self, stream_name: EventStreamName, event: Event) -> EventEnvelope {
        let sequence_number = self.current_sequence_number().next();
        let version = match self.stream_versions.get(&stream_name) {
            Some(current) => current.next(),
            None => Version::first(),
        };
        self.stream_versions.insert(stream_name.clone(), version);

        let envelope = EventEnvelope {
            sequence_number,
            stream_name,
            version,
            event,
            recorded_at: Utc::now(),
        };
        tracing::debug!(
            sequence = envelope.sequence_number.value(),
            stream = %envelope.stream_name,
            event = envelope.event.name(),
            "event recorded"
        );
        self.envelopes.push(envelope.clone());
        envelope
    }

    /// The sequence number of the latest event, or
    /// [`SequenceNumber::none`] for an empty log.
    pub fn current_sequence_number(&self) -> SequenceNumber {
        SequenceNumber::new(self.envelopes.len() as u64)
    }

    /// The version of the latest event on a stream.
    pub fn stream_version(&self, stream_name: &EventStreamName) -> Option<Version> {
        self.stream_versions.get(stream_name).copied()
    }

    /// Envelopes strictly after the checkpoint, in global order.
    ///
    /// Sequence numbers are dense, so the checkpoint doubles as an
    /// index into the log.
    pub fn events_since(
        &self,
        checkpoint: SequenceNumber,
    ) -> impl Iterator<Item = &EventEnvelope> {
        let start = checkpoint.value().min(self.envelopes.len() as u64) as usize;
        self.envelopes[start..].iter()
    }

    /// All envelopes in append order.
    pub fn envelopes(&self) -> &[EventEnvelope] {
        &self.envelopes
    }

    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }
}
