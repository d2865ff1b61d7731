//! Manifold - A multi-dimensional content graph engine
//!
//! Manifold models content that varies across configurable dimensions (language,
//! market, channel) as a hypergraph: nodes covering many dimension space points
//! at once, queried per point with transparent fallback along configured
//! specialization chains.
//!
//! # Architecture
//!
//! The codebase is layered from configuration up to the query surface:
//!
//! - [`dimension`] - Dimension and value declarations parsed from configuration
//! - [`dimensionspace`] - Dimension space points, hashing, and the variation graph
//! - [`hypergraph`] - Node and hyperrelation schema plus the query builders
//! - [`event`] - Append-only content stream event log
//! - [`projection`] - Content stream projection and its finder
//! - [`cli`] - Command-line interface layer (parses args, delegates to the graph)
//! - [`types`] - Shared identifier newtypes
//!
//! # Correctness Invariants
//!
//! Manifold maintains the following invariants:
//!
//! 1. A dimension space point's hash is a pure function of its coordinates
//! 2. Every allowed point reaches the root of its fallback chain in finitely
//!    many primary generalization steps
//! 3. Sibling order is derived from hyperrelation ordinality, never from node
//!    payloads
//! 4. The projection checkpoint and its rows persist as a single unit

pub mod cli;
pub mod dimension;
pub mod dimensionspace;
pub mod event;
pub mod hypergraph;
pub mod projection;
pub mod types;
