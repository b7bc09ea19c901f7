//! Endpoint nodes: the graph-model representation of a terminal's
//! connectivity state.

use serde::{Deserialize, Serialize};
use skein_common::Uid;
use std::collections::BTreeSet;

use crate::arena::ArenaId;

/// Opaque, copyable ID for an endpoint within one wiring graph.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct EndpointId(u32);

impl EndpointId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl ArenaId for EndpointId {
    fn from_raw(index: u32) -> Self {
        Self(index)
    }

    fn as_raw(self) -> u32 {
        self.0
    }
}

/// One terminal's connectivity state.
///
/// Connections are symmetric membership (stored on both sides), held as ID
/// sets so the relation stays acyclic in ownership terms. Only the owning
/// [`WiringGraph`](crate::graph::WiringGraph) mutates them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Endpoint {
    /// The diagram identity of the terminal this endpoint models.
    pub uid: Uid,
    /// `true` for value producers, `false` for consumers.
    pub is_source: bool,
    /// The terminal's name (structural terminals) — role names and port
    /// names are matched against this.
    pub name: String,
    value: Option<String>,
    connected: BTreeSet<EndpointId>,
}

impl Endpoint {
    /// Creates a fresh, unconnected endpoint.
    pub fn new(uid: Uid, is_source: bool, name: impl Into<String>) -> Self {
        Self {
            uid,
            is_source,
            name: name.into(),
            value: None,
            connected: BTreeSet::new(),
        }
    }

    /// The attached value label, if any (constant terminals and labeled
    /// wires attach one).
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Attaches a value label. The last label observed wins.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// The endpoints this one is connected to, in ID order.
    pub fn connected(&self) -> impl Iterator<Item = EndpointId> + '_ {
        self.connected.iter().copied()
    }

    /// Number of connections.
    pub fn connection_count(&self) -> usize {
        self.connected.len()
    }

    /// Returns `true` if `other` is in this endpoint's connection set.
    pub fn is_connected_to(&self, other: EndpointId) -> bool {
        self.connected.contains(&other)
    }

    pub(crate) fn insert_connected(&mut self, other: EndpointId) {
        self.connected.insert(other);
    }
}
