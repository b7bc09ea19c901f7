//! The diagram-side event model.
//!
//! The diagram host delivers one flat callback stream per unit; here that
//! stream is a plain event sum type the session driver matches on. Events
//! arrive grouped by kind: panels and loop frames, then terminals, then
//! wires, then tunnels, then formula nodes and controls.

use serde::{Deserialize, Serialize};
use skein_ast::{fragment, Expr, SignalDecl};
use skein_common::{Interner, Uid};

/// The front-panel style of a control, which decides whether its label
/// declares a generic or a port.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlStyle {
    /// Integer control; its label is a generic declaration.
    NumericI32,
    /// Floating-point control; its label is a port declaration.
    NumericDbl,
    /// Any other style, carried for the error message.
    Other(String),
}

/// One callback from the diagram host.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DiagramEvent {
    /// A panel; the one without an owner is the root front panel.
    Panel {
        /// The owning element, absent for the root panel.
        owner: Option<Uid>,
        /// The panel's identity.
        uid: Uid,
    },
    /// A repeating (loop) frame; formula nodes it owns translate to
    /// process statements.
    Loop {
        /// The owning element.
        owner: Uid,
        /// The frame's identity.
        uid: Uid,
    },
    /// A terminal: one connection point with fixed polarity.
    Terminal {
        /// The terminal's identity.
        uid: Uid,
        /// The element the terminal sits on.
        owner: Uid,
        /// The wire the terminal is attached to.
        wire: Uid,
        /// `true` if the terminal produces a value.
        is_source: bool,
        /// The terminal's name, matched against role markers and port
        /// references.
        name: String,
    },
    /// A wire, optionally labeled. All terminals referencing the wire
    /// precede this event.
    Wire {
        /// The wire's identity.
        uid: Uid,
        /// The free-text label, if the wire carries one.
        label: Option<String>,
    },
    /// A scope-boundary tunnel.
    Tunnel {
        /// Terminals on the inside of the frame; exactly one is legal.
        inside: Vec<Uid>,
        /// The terminal on the outside.
        outside: Uid,
    },
    /// A free-text formula node with its parameter terminals.
    Formula {
        /// The owning element (checked against loop frames).
        owner: Uid,
        /// The node's identity.
        uid: Uid,
        /// The expression or body text.
        expression: String,
        /// The node's label, checked against context markers first.
        label: Option<String>,
        /// Parameter terminal identities, in pane order.
        terminals: Vec<Uid>,
    },
    /// A cluster grouping several controls behind one connector-pane slot.
    Cluster {
        /// The owning element.
        owner: Uid,
        /// The cluster's identity; member controls name it as their owner.
        uid: Uid,
        /// The cluster's connector-pane terminal.
        terminal: Uid,
        /// The cluster's own connector-pane index.
        connector_index: u32,
        /// Member control identities, in cluster order.
        members: Vec<Uid>,
    },
    /// A front-panel control carrying an interface-element declaration.
    Control {
        /// The owning element: the root panel, or a cluster.
        owner: Uid,
        /// The control's identity.
        uid: Uid,
        /// The label text; required, it holds the declaration.
        label: Option<String>,
        /// The control's block-diagram terminal.
        terminal: Uid,
        /// `true` for indicators (outputs), `false` for controls (inputs).
        is_indicator: bool,
        /// The front-panel style.
        style: ControlStyle,
        /// The connector-pane index; for clustered controls the virtual
        /// index in the description wins instead.
        connector_index: u32,
        /// Free-text description; holds the virtual connector index for
        /// clustered controls.
        description: String,
    },
}

/// A wire label that failed both recognized parses.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot recognize label of wire {uid}: `{text}`")]
pub struct LabelError {
    /// The labeled wire.
    pub uid: Uid,
    /// The unparseable label text.
    pub text: String,
}

/// The recognized shape of a wire label.
#[derive(Clone, Debug)]
pub enum WireLabel {
    /// No label.
    Plain,
    /// The label is a signal declaration; endpoints take the declared
    /// identifier as their value.
    Signal(SignalDecl),
    /// The label is an expression; endpoints take its text as their value.
    Expression(Expr),
}

impl WireLabel {
    /// The value text to attach to the wire's endpoints, if any.
    pub fn value_text(&self, interner: &Interner) -> Option<String> {
        match self {
            WireLabel::Plain => None,
            WireLabel::Signal(decl) => {
                Some(interner.resolve(decl.names[0]).to_owned())
            }
            WireLabel::Expression(expr) => Some(expr.text.clone()),
        }
    }
}

/// Probes a wire label, in fixed order: signal declaration (appending a
/// missing trailing `;` first), then expression. An unlabeled wire is
/// plain; a label matching neither parse is a semantic error.
pub fn classify_wire_label(
    uid: Uid,
    label: Option<&str>,
    interner: &Interner,
) -> Result<WireLabel, LabelError> {
    let Some(label) = label else {
        return Ok(WireLabel::Plain);
    };
    let mut decl_text = label.trim().to_owned();
    if !decl_text.ends_with(';') {
        decl_text.push(';');
    }
    if let Some(decl) = fragment::try_signal_declaration(&decl_text, interner) {
        return Ok(WireLabel::Signal(decl));
    }
    if let Some(expr) = fragment::try_expression(label, interner) {
        return Ok(WireLabel::Expression(expr));
    }
    Err(LabelError {
        uid,
        text: label.to_owned(),
    })
}
