//! projection
//!
//! The content stream read model: a catch-up projection over the event
//! log, file-backed and lock-guarded, with a finder on top.
//!
//! # Modules
//!
//! - [`state`] - The per-stream row and its lifecycle states
//! - [`store`] - Atomic JSON persistence for rows plus checkpoint
//! - [`lock`] - Exclusive advisory lock for maintenance operations
//! - [`projection`] - Event dispatch, catch-up, and reset
//! - [`finder`] - Read queries, including the prune-safety closure
//!
//! # Design Principles
//!
//! - Checkpoint and rows persist as one unit; they can never disagree
//! - Catch-up is resumable: interruption loses nothing but the tail
//! - `removed` is orthogonal to state and only filters where queries
//!   say so

pub mod finder;
pub mod lock;
#[allow(clippy::module_inception)]
pub mod projection;
pub mod state;
pub mod store;

pub use finder::ContentStreamFinder;
pub use lock::{LockError, ProjectionLock};
pub use projection::{ContentStreamProjection, ProjectionError, ProjectionStatus};
pub use state::{ContentStreamRecord, ContentStreamState};
pub use store::{PersistedProjection, ProjectionStore, StoreError};
