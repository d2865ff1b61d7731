//! event
//!
//! Domain events, envelopes, and the append-only log.
//!
//! # Modules
//!
//! - [`events`] - The tagged domain event enum
//! - [`envelope`] - Sequence numbers, versions, stream names, envelopes
//! - [`log`] - The ordered, append-only event log
//!
//! # Design Principles
//!
//! - The log append is the single serialization point for writes
//! - Sequence numbers are global and dense; versions are per stream
//! - Everything round-trips through JSON via serde

pub mod envelope;
pub mod events;
pub mod log;

pub use envelope::{EventEnvelope, EventStreamName, SequenceNumber, Version};
pub use events::Event;
pub use log::EventLog;
