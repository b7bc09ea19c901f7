//! The diagram-side per-unit driver.
//!
//! Ingests the host's event stream (terminals, then wires, then tunnels,
//! then formulas and panel elements), builds the unit's wiring graph and
//! interface, and classifies every formula node once the graph is
//! complete.

use std::collections::HashSet;

use skein_common::{Interner, Uid};
use skein_diagnostics::DiagnosticSink;
use skein_bind::{InterfaceDecl, InterfaceName};
use skein_wiring::{EndpointId, GraphError, WiringGraph};

use crate::classify::{classify, Classified, ClassifyError, FormulaUnit};
use crate::errors;
use crate::events::{classify_wire_label, DiagramEvent, LabelError};
use crate::iface_builder::{BuildError, InterfaceBuilder};

/// Fatal errors while driving one diagram unit.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Graph-integrity failure.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Unparseable wire label.
    #[error(transparent)]
    Label(#[from] LabelError),
    /// Interface-assembly failure.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Statement-classification failure.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

struct PendingFormula {
    owner: Uid,
    uid: Uid,
    expression: String,
    label: Option<String>,
    parameters: Vec<EndpointId>,
}

/// The finished product of one diagram unit.
pub struct SessionOutcome {
    /// The unit's closed wiring graph.
    pub graph: WiringGraph,
    /// The interface assembled from front-panel controls.
    pub interface: InterfaceDecl,
    /// Every formula node, classified.
    pub statements: Vec<Classified>,
}

/// Accumulates one unit's event stream.
///
/// Events must arrive grouped: all terminals of a wire before that wire,
/// all wires before any tunnel, all terminals before any formula naming
/// them. The host's dump order satisfies this.
pub struct DiagramSession {
    graph: WiringGraph,
    loops: HashSet<Uid>,
    formulas: Vec<PendingFormula>,
    builder: InterfaceBuilder,
}

impl DiagramSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self {
            graph: WiringGraph::new(),
            loops: HashSet::new(),
            formulas: Vec::new(),
            builder: InterfaceBuilder::new(),
        }
    }

    /// Feeds one event into the session.
    pub fn ingest(
        &mut self,
        event: DiagramEvent,
        interner: &Interner,
        diags: &DiagnosticSink,
    ) -> Result<(), SessionError> {
        match event {
            DiagramEvent::Panel { owner, uid } => {
                self.builder.observe_panel(owner, uid);
            }
            DiagramEvent::Loop { owner: _, uid } => {
                self.loops.insert(uid);
            }
            DiagramEvent::Terminal {
                uid,
                owner: _,
                wire,
                is_source,
                name,
            } => {
                let endpoint = self.graph.observe_terminal(uid, is_source, name)?;
                self.graph.observe_wire_endpoint(wire, endpoint)?;
            }
            DiagramEvent::Wire { uid, label } => {
                let label = classify_wire_label(uid, label.as_deref(), interner)?;
                let value = label.value_text(interner);
                let members = self.graph.close_wire(uid)?;
                if members.len() > 1 {
                    let sources = members
                        .iter()
                        .filter(|&&m| self.graph.endpoint(m).is_source)
                        .count();
                    if sources == 0 || sources == members.len() {
                        diags.emit(errors::note_same_polarity_wire(uid, members.len()));
                    }
                }
                if let Some(value) = value {
                    for member in members {
                        self.graph.endpoint_mut(member).set_value(value.clone());
                    }
                }
            }
            DiagramEvent::Tunnel { inside, outside } => {
                self.graph.observe_tunnel(&inside, outside)?;
            }
            DiagramEvent::Formula {
                owner,
                uid,
                expression,
                label,
                terminals,
            } => {
                let parameters = terminals
                    .iter()
                    .map(|&t| self.graph.lookup(t))
                    .collect::<Result<Vec<_>, _>>()?;
                self.formulas.push(PendingFormula {
                    owner,
                    uid,
                    expression,
                    label,
                    parameters,
                });
            }
            DiagramEvent::Cluster {
                owner: _,
                uid,
                terminal: _,
                connector_index,
                members,
            } => {
                self.builder.observe_cluster(uid, connector_index, &members);
            }
            DiagramEvent::Control {
                owner,
                uid,
                label,
                terminal: _,
                is_indicator: _,
                style,
                connector_index,
                description,
            } => {
                self.builder.observe_control(
                    owner,
                    uid,
                    label.as_deref(),
                    &style,
                    connector_index,
                    &description,
                    interner,
                )?;
            }
        }
        Ok(())
    }

    /// Closes the graph, classifies every formula, and assembles the
    /// interface.
    pub fn finish(
        mut self,
        name: InterfaceName,
        interner: &Interner,
    ) -> Result<SessionOutcome, SessionError> {
        self.graph.close()?;
        let mut statements = Vec::with_capacity(self.formulas.len());
        for pending in &self.formulas {
            let unit = FormulaUnit {
                uid: pending.uid,
                owner: pending.owner,
                expression: pending.expression.clone(),
                label: pending.label.clone(),
                parameters: pending.parameters.clone(),
            };
            let owner_is_loop = self.loops.contains(&pending.owner);
            statements.push(classify(&unit, &self.graph, owner_is_loop, interner)?);
        }
        let interface = self.builder.build(name)?;
        Ok(SessionOutcome {
            graph: self.graph,
            interface,
            statements,
        })
    }
}

impl Default for DiagramSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ControlStyle;
    use skein_bind::EntityName;

    fn uid(raw: u64) -> Uid {
        Uid::from_raw(raw)
    }

    fn entity_name(interner: &Interner) -> InterfaceName {
        InterfaceName::Entity(EntityName::new(
            interner,
            None,
            interner.intern_ident("e").unwrap(),
        ))
    }

    fn terminal(uid_raw: u64, wire: u64, is_source: bool, name: &str) -> DiagramEvent {
        DiagramEvent::Terminal {
            uid: uid(uid_raw),
            owner: uid(90),
            wire: uid(wire),
            is_source,
            name: name.to_owned(),
        }
    }

    #[test]
    fn labeled_wire_attaches_value_to_members() {
        let interner = Interner::new();
        let diags = DiagnosticSink::new();
        let mut session = DiagramSession::new();
        session.ingest(
            DiagramEvent::Panel { owner: None, uid: uid(1) },
            &interner,
            &diags,
        ).unwrap();
        session.ingest(terminal(2, 100, true, "a"), &interner, &diags).unwrap();
        session.ingest(terminal(3, 100, false, "b"), &interner, &diags).unwrap();
        session.ingest(
            DiagramEvent::Wire {
                uid: uid(100),
                label: Some("signal s : std_logic".to_owned()),
            },
            &interner,
            &diags,
        ).unwrap();
        let outcome = session.finish(entity_name(&interner), &interner).unwrap();
        let a = outcome.graph.lookup(uid(2)).unwrap();
        let b = outcome.graph.lookup(uid(3)).unwrap();
        assert!(outcome.graph.are_connected(a, b));
        assert_eq!(outcome.graph.endpoint(a).value(), Some("s"));
        assert_eq!(outcome.graph.endpoint(b).value(), Some("s"));
        assert!(diags.take_all().is_empty());
    }

    #[test]
    fn same_polarity_wire_is_noted() {
        let interner = Interner::new();
        let diags = DiagnosticSink::new();
        let mut session = DiagramSession::new();
        session.ingest(terminal(2, 100, false, "a"), &interner, &diags).unwrap();
        session.ingest(terminal(3, 100, false, "b"), &interner, &diags).unwrap();
        session.ingest(
            DiagramEvent::Wire { uid: uid(100), label: None },
            &interner,
            &diags,
        ).unwrap();
        let diags = diags.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, errors::N302);
    }

    #[test]
    fn loop_owned_formula_classifies_as_process() {
        let interner = Interner::new();
        let diags = DiagnosticSink::new();
        let mut session = DiagramSession::new();
        session.ingest(
            DiagramEvent::Loop { owner: uid(1), uid: uid(50) },
            &interner,
            &diags,
        ).unwrap();
        session.ingest(
            DiagramEvent::Formula {
                owner: uid(50),
                uid: uid(60),
                expression: "q <= d;".to_owned(),
                label: None,
                terminals: Vec::new(),
            },
            &interner,
            &diags,
        ).unwrap();
        let outcome = session.finish(entity_name(&interner), &interner).unwrap();
        assert!(matches!(outcome.statements[0], Classified::Process { .. }));
    }

    #[test]
    fn controls_feed_the_interface() {
        let interner = Interner::new();
        let diags = DiagnosticSink::new();
        let mut session = DiagramSession::new();
        session.ingest(
            DiagramEvent::Panel { owner: None, uid: uid(1) },
            &interner,
            &diags,
        ).unwrap();
        session.ingest(
            DiagramEvent::Control {
                owner: uid(1),
                uid: uid(2),
                label: Some("d : in std_logic".to_owned()),
                terminal: uid(3),
                is_indicator: false,
                style: ControlStyle::NumericDbl,
                connector_index: 0,
                description: String::new(),
            },
            &interner,
            &diags,
        ).unwrap();
        let outcome = session.finish(entity_name(&interner), &interner).unwrap();
        assert_eq!(outcome.interface.ports().len(), 1);
    }

    #[test]
    fn formula_naming_unknown_terminal_fails() {
        let interner = Interner::new();
        let diags = DiagnosticSink::new();
        let mut session = DiagramSession::new();
        let err = session.ingest(
            DiagramEvent::Formula {
                owner: uid(1),
                uid: uid(2),
                expression: "x".to_owned(),
                label: None,
                terminals: vec![uid(77)],
            },
            &interner,
            &diags,
        ).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Graph(GraphError::MissingEndpoint { .. })
        ));
    }
}
