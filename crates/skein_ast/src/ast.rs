//! AST node types for structural description fragments.
//!
//! These are the boundary types handed over by the parser collaborator.
//! Only the structural subset the bridge needs is modeled; anything else
//! arrives as a [`Declaration::Other`] or [`ConcurrentStatement::Other`]
//! node carrying its normalized source text verbatim.

use serde::{Deserialize, Serialize};
use skein_common::{Ident, Span};

// ============================================================================
// Top-level
// ============================================================================

/// A complete design file, containing one or more design units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignFile {
    /// The design units in this file, in document order.
    pub units: Vec<DesignUnit>,
    /// The span covering the entire file.
    pub span: Span,
}

/// A single design unit: an optional context clause followed by a unit kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignUnit {
    /// Normalized text of the library/use clauses preceding this unit, empty
    /// if there were none. Kept verbatim for round-tripping.
    pub context: String,
    /// The primary design unit.
    pub kind: DesignUnitKind,
    /// The span covering the entire unit including context.
    pub span: Span,
}

/// The kind of a primary design unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DesignUnitKind {
    /// An entity declaration.
    Entity(EntityDecl),
    /// An architecture body.
    Architecture(ArchitectureDecl),
}

/// An entity declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDecl {
    /// The entity name.
    pub name: Ident,
    /// Generic interface elements, in declaration order.
    pub generics: Vec<InterfaceElement>,
    /// Port interface elements, in declaration order.
    pub ports: Vec<InterfaceElement>,
    /// Declarative items within the entity.
    pub decls: Vec<Declaration>,
    /// Source span.
    pub span: Span,
}

/// An architecture body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchitectureDecl {
    /// The architecture name.
    pub name: Ident,
    /// The entity this architecture implements.
    pub entity_name: Ident,
    /// Declarative items in the architecture header.
    pub decls: Vec<Declaration>,
    /// Concurrent statements in the architecture body.
    pub stmts: Vec<ConcurrentStatement>,
    /// Source span.
    pub span: Span,
}

// ============================================================================
// Interface
// ============================================================================

/// One element of a generic or port interface list.
///
/// `a, b : in std_logic` is one element with two names; whether multiple
/// names are acceptable depends on the consumer (the interface model
/// requires exactly one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceElement {
    /// The declared names.
    pub names: Vec<Ident>,
    /// The port mode, or `None` when the element did not spell one
    /// (defaults to input).
    pub mode: Option<PortMode>,
    /// Normalized text of the type indication.
    pub ty: String,
    /// Optional default expression.
    pub default: Option<Expr>,
    /// Normalized text of the whole element, for verbatim re-emission.
    pub raw: String,
    /// Source span.
    pub span: Span,
}

/// A port direction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortMode {
    /// `in` — input port.
    In,
    /// `out` — output port.
    Out,
    /// `inout` — bidirectional port.
    Inout,
    /// `buffer` — output port readable internally.
    Buffer,
    /// `linkage` — linkage-mode port.
    Linkage,
}

// ============================================================================
// Declarations
// ============================================================================

/// A declarative item appearing in entity, architecture, block, or package
/// declarative regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Declaration {
    /// A signal declaration.
    Signal(SignalDecl),
    /// A constant declaration.
    Constant(ConstantDecl),
    /// A component declaration.
    Component(ComponentDecl),
    /// A block declarative wrapper; component declarations may nest here.
    Block {
        /// The nested declarative items.
        decls: Vec<Declaration>,
        /// Source span.
        span: Span,
    },
    /// A package declarative wrapper; component declarations may nest here.
    Package {
        /// The nested declarative items.
        decls: Vec<Declaration>,
        /// Source span.
        span: Span,
    },
    /// Any other declarative item, carried verbatim.
    Other {
        /// Normalized source text of the item.
        text: String,
        /// Source span.
        span: Span,
    },
}

/// A signal declaration (e.g., `signal clk : std_logic;`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalDecl {
    /// Signal names.
    pub names: Vec<Ident>,
    /// Normalized text of the type indication.
    pub ty: String,
    /// Optional default value expression.
    pub default: Option<Expr>,
    /// Normalized text of the whole declaration.
    pub raw: String,
    /// Source span.
    pub span: Span,
}

/// A constant declaration (e.g., `constant width : natural := 8;`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantDecl {
    /// Constant names.
    pub names: Vec<Ident>,
    /// Normalized text of the type indication.
    pub ty: String,
    /// Value expression; deferred constants omit it.
    pub value: Option<Expr>,
    /// Normalized text of the whole declaration.
    pub raw: String,
    /// Source span.
    pub span: Span,
}

/// A component declaration: a locally visible forward declaration of an
/// interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDecl {
    /// The component name.
    pub name: Ident,
    /// Generic interface elements, in declaration order.
    pub generics: Vec<InterfaceElement>,
    /// Port interface elements, in declaration order.
    pub ports: Vec<InterfaceElement>,
    /// Source span.
    pub span: Span,
}

// ============================================================================
// Statements
// ============================================================================

/// A concurrent statement in an architecture body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConcurrentStatement {
    /// A concurrent signal assignment (`target <= value;`).
    Assignment {
        /// The assignment target.
        target: Ident,
        /// The assigned value.
        value: Expr,
        /// Normalized source text of the statement.
        raw: String,
        /// Source span.
        span: Span,
    },
    /// A component or entity instantiation.
    Instantiation(Instantiation),
    /// A process statement, carried with its body text verbatim.
    Process {
        /// Optional statement label.
        label: Option<Ident>,
        /// Signals read anywhere in the process body.
        reads: Vec<Ident>,
        /// Signals driven by the process body.
        drives: Vec<Ident>,
        /// Normalized source text of the whole process.
        raw: String,
        /// Source span.
        span: Span,
    },
    /// Any other concurrent statement, carried verbatim.
    Other {
        /// Normalized source text of the statement.
        text: String,
        /// Source span.
        span: Span,
    },
}

/// A component or direct entity instantiation statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instantiation {
    /// The instance label.
    pub label: Ident,
    /// What is being instantiated.
    pub unit: InstantiatedUnit,
    /// Generic map associations, in textual order.
    pub generic_map: Vec<Association>,
    /// Port map associations, in textual order.
    pub port_map: Vec<Association>,
    /// Source span.
    pub span: Span,
}

/// The referenced side of an instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstantiatedUnit {
    /// A locally declared component (resolved through the active local
    /// scope).
    Component(Ident),
    /// A direct entity reference, optionally library-qualified.
    Entity {
        /// The library qualifier, if spelled.
        library: Option<Ident>,
        /// The entity name.
        name: Ident,
    },
}

/// One association element of a generic or port map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    /// The formal name, or `None` for positional association.
    pub formal: Option<Ident>,
    /// The actual expression.
    pub actual: Expr,
    /// Source span.
    pub span: Span,
}

// ============================================================================
// Expressions
// ============================================================================

/// An expression fragment.
///
/// The bridge never evaluates expressions; it needs their normalized text
/// (for round-tripping) and the free identifier references at the top-level
/// scope (for wiring).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    /// Normalized source text of the expression.
    pub text: String,
    /// Free identifier references at top-level scope, in first-occurrence
    /// order. Attribute designators and selected-name suffixes are not
    /// references.
    pub refs: Vec<Ident>,
    /// Source span.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_common::Interner;

    #[test]
    fn serde_roundtrip_entity() {
        let interner = Interner::new();
        let entity = EntityDecl {
            name: interner.intern_ident("adder").unwrap(),
            generics: vec![],
            ports: vec![],
            decls: vec![],
            span: Span::DUMMY,
        };
        let json = serde_json::to_string(&entity).unwrap();
        let back: EntityDecl = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, entity.name);
    }

    #[test]
    fn instantiated_unit_equality() {
        let interner = Interner::new();
        let c = interner.intern_ident("c").unwrap();
        assert_eq!(
            InstantiatedUnit::Component(c),
            InstantiatedUnit::Component(c)
        );
        assert_ne!(
            InstantiatedUnit::Component(c),
            InstantiatedUnit::Entity {
                library: None,
                name: c
            }
        );
    }
}
