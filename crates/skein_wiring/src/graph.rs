//! Per-unit wiring graph: terminal observation, wire closure, tunnels.

use std::collections::HashMap;

use skein_common::Uid;

use crate::arena::Arena;
use crate::endpoint::{Endpoint, EndpointId};

/// Graph-integrity errors. All of these indicate a malformed diagram or a
/// caller protocol violation and are fatal to the current unit.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A terminal identity was observed twice. Diagram identities are
    /// unique by contract.
    #[error("duplicate terminal {uid}")]
    DuplicateTerminal {
        /// The repeated identity.
        uid: Uid,
    },
    /// A referenced identity was never observed as a terminal.
    #[error("missing endpoint for {uid}")]
    MissingEndpoint {
        /// The unresolved identity.
        uid: Uid,
    },
    /// A tunnel presented other than exactly one inside terminal.
    #[error("tunnel has multiple internal frames ({count} inside terminals)")]
    TunnelMultipleFrames {
        /// The outside terminal of the offending tunnel.
        outside: Uid,
        /// How many inside terminals it presented.
        count: usize,
    },
    /// An observation arrived after the graph was closed.
    #[error("wiring graph is closed")]
    GraphClosed,
    /// The graph was closed while wire groups were still pending.
    #[error("{count} wire groups were never closed")]
    UnconsumedWires {
        /// How many groups remained.
        count: usize,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum GraphState {
    Open,
    Closed,
}

/// The wiring graph of one architecture-translation unit.
///
/// Lifecycle: `Open` (terminals, wire endpoints, and tunnels may be
/// observed; a tunnel's endpoints must already exist) then `Closed` (no
/// further observations). Wires must each be closed exactly once, strictly
/// after every terminal referencing them was observed; tunnels run after
/// wire closure because their transitive closure consumes fully-resolved
/// connection sets on both sides.
#[derive(Debug)]
pub struct WiringGraph {
    endpoints: Arena<EndpointId, Endpoint>,
    by_uid: HashMap<Uid, EndpointId>,
    pending_wires: HashMap<Uid, Vec<EndpointId>>,
    state: GraphState,
}

impl WiringGraph {
    /// Creates an empty, open graph.
    pub fn new() -> Self {
        Self {
            endpoints: Arena::new(),
            by_uid: HashMap::new(),
            pending_wires: HashMap::new(),
            state: GraphState::Open,
        }
    }

    fn check_open(&self) -> Result<(), GraphError> {
        if self.state == GraphState::Closed {
            return Err(GraphError::GraphClosed);
        }
        Ok(())
    }

    /// Registers a terminal as a fresh endpoint.
    pub fn observe_terminal(
        &mut self,
        uid: Uid,
        is_source: bool,
        name: impl Into<String>,
    ) -> Result<EndpointId, GraphError> {
        self.check_open()?;
        if self.by_uid.contains_key(&uid) {
            return Err(GraphError::DuplicateTerminal { uid });
        }
        let id = self.endpoints.alloc(Endpoint::new(uid, is_source, name));
        self.by_uid.insert(uid, id);
        Ok(id)
    }

    /// Appends an endpoint to the pending group of `wire_uid`.
    pub fn observe_wire_endpoint(
        &mut self,
        wire_uid: Uid,
        endpoint: EndpointId,
    ) -> Result<(), GraphError> {
        self.check_open()?;
        self.pending_wires.entry(wire_uid).or_default().push(endpoint);
        Ok(())
    }

    /// Consumes the pending group of `wire_uid` and connects every
    /// opposite-polarity pair of its members.
    ///
    /// Same-polarity pairs are left unconnected: wires are undirected and
    /// the diagram is a multi-graph, so one source legitimately fans out to
    /// several sinks sharing the wire. A wire with fewer than two observed
    /// endpoints closes as a no-op. Returns the group's members.
    pub fn close_wire(&mut self, wire_uid: Uid) -> Result<Vec<EndpointId>, GraphError> {
        self.check_open()?;
        let members = self.pending_wires.remove(&wire_uid).unwrap_or_default();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                self.connect(a, b);
            }
        }
        Ok(members)
    }

    /// Propagates connectivity through a tunnel.
    ///
    /// The tunnel merges the connectivity neighborhoods of its single
    /// inside terminal and its outside terminal: every already-known
    /// connection of the inside endpoint is closed pairwise against every
    /// connection of the outside endpoint, opposite polarities only. The
    /// tunnel itself never becomes a graph node.
    pub fn observe_tunnel(
        &mut self,
        inside_uids: &[Uid],
        outside_uid: Uid,
    ) -> Result<(), GraphError> {
        self.check_open()?;
        let [inside_uid] = inside_uids else {
            return Err(GraphError::TunnelMultipleFrames {
                outside: outside_uid,
                count: inside_uids.len(),
            });
        };
        let inside = self.lookup(*inside_uid)?;
        let outside = self.lookup(outside_uid)?;
        let inside_connected: Vec<EndpointId> = self.endpoints[inside].connected().collect();
        let outside_connected: Vec<EndpointId> = self.endpoints[outside].connected().collect();
        for &a in &inside_connected {
            for &b in &outside_connected {
                self.connect(a, b);
            }
        }
        Ok(())
    }

    /// Resolves a diagram identity to its endpoint.
    ///
    /// Every reference in a well-formed diagram must resolve, so a miss is
    /// always a fatal error, never an expected outcome.
    pub fn lookup(&self, uid: Uid) -> Result<EndpointId, GraphError> {
        self.by_uid
            .get(&uid)
            .copied()
            .ok_or(GraphError::MissingEndpoint { uid })
    }

    /// Connects two endpoints if their polarities oppose, returning whether
    /// a connection was made. Same-polarity pairs are silently skipped.
    pub fn connect(&mut self, a: EndpointId, b: EndpointId) -> bool {
        if a == b || self.endpoints[a].is_source == self.endpoints[b].is_source {
            return false;
        }
        self.endpoints[a].insert_connected(b);
        self.endpoints[b].insert_connected(a);
        true
    }

    /// Shared access to an endpoint.
    pub fn endpoint(&self, id: EndpointId) -> &Endpoint {
        &self.endpoints[id]
    }

    /// Mutable access to an endpoint (value labels).
    pub fn endpoint_mut(&mut self, id: EndpointId) -> &mut Endpoint {
        &mut self.endpoints[id]
    }

    /// Returns `true` if `a` and `b` are connected.
    pub fn are_connected(&self, a: EndpointId, b: EndpointId) -> bool {
        self.endpoints[a].is_connected_to(b)
    }

    /// Iterates all endpoints in observation order.
    pub fn endpoints(&self) -> impl Iterator<Item = (EndpointId, &Endpoint)> {
        self.endpoints.iter()
    }

    /// Transitions to `Closed`, rejecting further observations.
    ///
    /// Wire groups still pending at this point mean the caller skipped
    /// [`close_wire`](Self::close_wire) for them, which is an ordering
    /// violation.
    pub fn close(&mut self) -> Result<(), GraphError> {
        if !self.pending_wires.is_empty() {
            return Err(GraphError::UnconsumedWires {
                count: self.pending_wires.len(),
            });
        }
        self.state = GraphState::Closed;
        Ok(())
    }
}

impl Default for WiringGraph {
    fn default() -> Self {
        Self::new()
    }
}
