//! The contextual statement classifier.
//!
//! The diagram carries no statement-kind tag on a free-text formula node;
//! the kind is inferred from a fixed set of structural and naming signals,
//! checked in strict priority: context markers, then loop ownership, then
//! a constant-declaration parse of the label, then role-marked parameters.

use skein_ast::{fragment, ConstantDecl};
use skein_common::{Interner, Uid};
use skein_wiring::{EndpointId, WiringGraph};

/// Reserved labels and parameter names carried by convention on diagram
/// elements.
pub mod markers {
    /// Formula label: the unit's raw entity context clause.
    pub const ENTITY_CONTEXT: &str = "ENTITY CONTEXT";
    /// Formula label: verbatim entity declarative items.
    pub const ENTITY_EXTRA_DECLARATIONS: &str = "ENTITY EXTRA DECLARATIONS";
    /// Formula label: the unit's raw architecture context clause.
    pub const ARCHITECTURE_CONTEXT: &str = "ARCHITECTURE CONTEXT";
    /// Formula label: verbatim architecture declarative items.
    pub const ARCHITECTURE_EXTRA_DECLARATIONS: &str = "ARCHITECTURE EXTRA DECLARATIONS";
    /// Formula label: verbatim concurrent statements.
    pub const ARCHITECTURE_EXTRA_STATEMENTS: &str = "ARCHITECTURE EXTRA BODY STATEMENTS";
    /// Parameter name marking the assignment target of a formula.
    pub const LVALUE: &str = "LVALUE";
    /// Parameter name marking the produced value of a formula.
    pub const RVALUE: &str = "RVALUE";
}

/// A formula node with its parameter terminals already resolved to graph
/// endpoints.
#[derive(Clone, Debug)]
pub struct FormulaUnit {
    /// The node's identity.
    pub uid: Uid,
    /// The owning element.
    pub owner: Uid,
    /// The expression or body text.
    pub expression: String,
    /// The node's label.
    pub label: Option<String>,
    /// Parameter endpoints, in pane order.
    pub parameters: Vec<EndpointId>,
}

/// Semantic-ambiguity errors raised during classification. Fatal for the
/// statement in question; sibling statements are unaffected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// A parameter named `LVALUE` produces a value.
    #[error("l-value of formula {uid} must be a data sink")]
    LvalueMustBeSink {
        /// The offending formula node.
        uid: Uid,
    },
    /// A parameter named `RVALUE` consumes a value.
    #[error("r-value of formula {uid} must be a data source")]
    RvalueMustBeSource {
        /// The offending formula node.
        uid: Uid,
    },
    /// Both role markers are present on one formula.
    #[error("formula {uid} cannot be both l- and r-value")]
    BothLvalueAndRvalue {
        /// The offending formula node.
        uid: Uid,
    },
}

/// The classified form of a formula unit.
#[derive(Clone, Debug)]
pub enum Classified {
    /// Raw entity context clause text.
    EntityContext {
        /// The source formula node.
        uid: Uid,
        /// The verbatim text.
        text: String,
    },
    /// Verbatim entity declarative items.
    EntityExtraDeclarations {
        /// The source formula node.
        uid: Uid,
        /// The verbatim text.
        text: String,
    },
    /// Raw architecture context clause text.
    ArchitectureContext {
        /// The source formula node.
        uid: Uid,
        /// The verbatim text.
        text: String,
    },
    /// Verbatim architecture declarative items.
    ArchitectureExtraDeclarations {
        /// The source formula node.
        uid: Uid,
        /// The verbatim text.
        text: String,
    },
    /// A process-style statement: the owner repeats.
    Process {
        /// The source formula node.
        uid: Uid,
        /// The process body text.
        expression: String,
        /// All parameters, unfiltered.
        parameters: Vec<EndpointId>,
    },
    /// A local constant/value declaration parsed from `label := expr`.
    DeclaredConstant {
        /// The source formula node.
        uid: Uid,
        /// The parsed declaration.
        constant: ConstantDecl,
        /// All parameters, unfiltered.
        parameters: Vec<EndpointId>,
    },
    /// An assignment whose target is the `LVALUE`-marked sink.
    AssignmentTo {
        /// The source formula node.
        uid: Uid,
        /// The right-hand-side text.
        expression: String,
        /// The marked target endpoint.
        lvalue: EndpointId,
        /// Read operands: every parameter except the target.
        others: Vec<EndpointId>,
    },
    /// A value-producing expression whose result is the `RVALUE`-marked
    /// source.
    AssignmentFrom {
        /// The source formula node.
        uid: Uid,
        /// The expression text.
        expression: String,
        /// The marked result endpoint.
        rvalue: EndpointId,
        /// Read operands: every parameter except the result.
        others: Vec<EndpointId>,
    },
    /// A generic concurrent statement.
    Concurrent {
        /// The source formula node.
        uid: Uid,
        /// The statement text.
        expression: String,
        /// All parameters, unfiltered.
        parameters: Vec<EndpointId>,
    },
}

/// Classifies one formula unit.
///
/// `owner_is_loop` is the structural repetition flag for the unit's owner;
/// the caller derives it from the loop-frame events it has seen.
pub fn classify(
    unit: &FormulaUnit,
    graph: &WiringGraph,
    owner_is_loop: bool,
    interner: &Interner,
) -> Result<Classified, ClassifyError> {
    // Context markers bypass parameter analysis entirely.
    if let Some(label) = unit.label.as_deref() {
        let text = unit.expression.clone();
        match label {
            markers::ENTITY_CONTEXT => {
                return Ok(Classified::EntityContext { uid: unit.uid, text })
            }
            markers::ENTITY_EXTRA_DECLARATIONS => {
                return Ok(Classified::EntityExtraDeclarations { uid: unit.uid, text })
            }
            markers::ARCHITECTURE_CONTEXT => {
                return Ok(Classified::ArchitectureContext { uid: unit.uid, text })
            }
            markers::ARCHITECTURE_EXTRA_DECLARATIONS => {
                return Ok(Classified::ArchitectureExtraDeclarations { uid: unit.uid, text })
            }
            _ => {}
        }
    }

    if owner_is_loop {
        return Ok(Classified::Process {
            uid: unit.uid,
            expression: unit.expression.clone(),
            parameters: unit.parameters.clone(),
        });
    }

    if let Some(label) = unit.label.as_deref() {
        let candidate = format!("{} := {};", label, unit.expression);
        if let Some(constant) = fragment::try_constant_declaration(&candidate, interner) {
            return Ok(Classified::DeclaredConstant {
                uid: unit.uid,
                constant,
                parameters: unit.parameters.clone(),
            });
        }
    }

    let mut lvalue = None;
    let mut rvalue = None;
    for &param in &unit.parameters {
        let endpoint = graph.endpoint(param);
        if endpoint.name == markers::LVALUE {
            if endpoint.is_source {
                return Err(ClassifyError::LvalueMustBeSink { uid: unit.uid });
            }
            lvalue = Some(param);
        } else if endpoint.name == markers::RVALUE {
            if !endpoint.is_source {
                return Err(ClassifyError::RvalueMustBeSource { uid: unit.uid });
            }
            rvalue = Some(param);
        }
    }
    if lvalue.is_some() && rvalue.is_some() {
        return Err(ClassifyError::BothLvalueAndRvalue { uid: unit.uid });
    }

    let without = |excluded: EndpointId| {
        unit.parameters
            .iter()
            .copied()
            .filter(|&p| p != excluded)
            .collect()
    };
    if let Some(lvalue) = lvalue {
        Ok(Classified::AssignmentTo {
            uid: unit.uid,
            expression: unit.expression.clone(),
            lvalue,
            others: without(lvalue),
        })
    } else if let Some(rvalue) = rvalue {
        Ok(Classified::AssignmentFrom {
            uid: unit.uid,
            expression: unit.expression.clone(),
            rvalue,
            others: without(rvalue),
        })
    } else {
        Ok(Classified::Concurrent {
            uid: unit.uid,
            expression: unit.expression.clone(),
            parameters: unit.parameters.clone(),
        })
    }
}
