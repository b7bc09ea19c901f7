//! The endpoint wiring graph and its reconciliation rules.
//!
//! A diagram's terminals, wires, and tunnels feed a per-unit
//! [`WiringGraph`]: an arena of [`Endpoint`] nodes whose connectivity is
//! induced by closing wire groups (opposite polarities only) and by tunnel
//! transitive closure across scope boundaries. The named-source and
//! dangling-sink collections accumulate value producers and unresolved
//! consumers while a structural statement list is walked; the late
//! [`reconcile`] pass matches them by identifier and reports the leftovers.

#![warn(missing_docs)]

pub mod arena;
pub mod endpoint;
pub mod ends;
pub mod errors;
pub mod graph;
pub mod reconcile;

pub use arena::{Arena, ArenaId};
pub use endpoint::{Endpoint, EndpointId};
pub use ends::{DanglingSinks, NamedSources, SinkTerm, SourceTerm};
pub use graph::{GraphError, WiringGraph};
pub use reconcile::reconcile;
