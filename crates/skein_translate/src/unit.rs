//! The text-side per-unit driver.
//!
//! Walks a design file: entities register their interfaces globally,
//! architectures each produce one unit artifact — a wiring graph whose
//! endpoints stand for the diagram elements to materialize, the
//! reconciled connections between them, and the verbatim text leftovers
//! (contexts, unrecognized declarations and statements).
//!
//! Every declared name owns exactly one producing hub endpoint: generics,
//! ports, and signals from their declarations, constants from their value.
//! Reads and drives of a name both register consuming endpoints;
//! reconciliation wires the hub to all of them. Diagram wires are
//! undirected, so a drive connects to its target's hub the same way a read
//! does; assignment direction is recovered from role markers on the
//! formula side, not from wire polarity.

use std::collections::HashMap;

use skein_ast::{
    ArchitectureDecl, ConcurrentStatement, Declaration, DesignFile, DesignUnitKind, EntityDecl,
    Expr, Instantiation,
};
use skein_bind::{
    ArchitectureName, BindingResolver, EntityName, IfaceError, InterfaceDecl, PortDirection,
    ResolveError,
};
use skein_common::{Ident, InternalError, Interner, Uid};
use skein_diagnostics::DiagnosticSink;
use skein_wiring::{
    reconcile, DanglingSinks, EndpointId, GraphError, NamedSources, SinkTerm, SourceTerm,
    WiringGraph,
};

use crate::classify::markers;

/// Fatal errors while translating one design file.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// An architecture names an entity that was never registered.
    #[error("unknown entity `{name}`")]
    UnknownEntity {
        /// The unresolved entity name.
        name: String,
    },
    /// A deferred constant without a value cannot become a source.
    #[error("missing value for constant `{name}`")]
    MissingConstantValue {
        /// The constant's name.
        name: String,
    },
    /// An output-directed formal mapped to something other than a simple
    /// name.
    #[error("actual of output port `{port}` on instance `{instance}` must be a simple name")]
    OutputPortActual {
        /// The instance label.
        instance: String,
        /// The formal port name.
        port: String,
    },
    /// A named association referencing no declared generic or port.
    #[error("unknown formal `{formal}` on instance `{instance}`")]
    UnknownFormal {
        /// The instance label.
        instance: String,
        /// The formal name.
        formal: String,
    },
    /// An instantiation of an unknown component or entity.
    #[error("unknown component or entity in instance `{instance}`")]
    UnknownUnit {
        /// The instance label.
        instance: String,
    },
    /// Interface-shape failure.
    #[error(transparent)]
    Iface(#[from] IfaceError),
    /// Resolver protocol violation.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Graph-integrity failure.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Internal invariant violation.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// The product of translating one architecture.
#[derive(Debug)]
pub struct UnitArtifact {
    /// The architecture this artifact came from.
    pub architecture: ArchitectureName,
    /// The unit's closed wiring graph; endpoints are the diagram elements
    /// to materialize.
    pub graph: WiringGraph,
    /// The `(source, sink)` endpoint pairs reconciliation connected.
    pub connections: Vec<(EndpointId, EndpointId)>,
    /// The context clause preceding the entity, if any.
    pub entity_context: Option<String>,
    /// Verbatim entity declarative items, if any.
    pub entity_extra_declarations: Option<String>,
    /// The context clause preceding the architecture, if any.
    pub architecture_context: Option<String>,
    /// Verbatim architecture declarative items with no structural meaning
    /// here, concatenated in order.
    pub extra_declarations: Option<String>,
    /// Verbatim concurrent statements with no structural meaning here,
    /// concatenated in order.
    pub extra_statements: Option<String>,
}

impl UnitArtifact {
    /// The labeled free-text formulas to materialize alongside the graph,
    /// as `(label, text)` pairs.
    pub fn context_formulas(&self) -> Vec<(&'static str, &str)> {
        let mut formulas = Vec::new();
        if let Some(text) = self.entity_context.as_deref() {
            formulas.push((markers::ENTITY_CONTEXT, text));
        }
        if let Some(text) = self.entity_extra_declarations.as_deref() {
            formulas.push((markers::ENTITY_EXTRA_DECLARATIONS, text));
        }
        if let Some(text) = self.architecture_context.as_deref() {
            formulas.push((markers::ARCHITECTURE_CONTEXT, text));
        }
        if let Some(text) = self.extra_declarations.as_deref() {
            formulas.push((markers::ARCHITECTURE_EXTRA_DECLARATIONS, text));
        }
        if let Some(text) = self.extra_statements.as_deref() {
            formulas.push((markers::ARCHITECTURE_EXTRA_STATEMENTS, text));
        }
        formulas
    }
}

/// Translates design files one architecture at a time, accumulating
/// entity interfaces across files.
pub struct FileTranslator<'a> {
    interner: &'a Interner,
    diags: &'a DiagnosticSink,
    resolver: BindingResolver,
    last_context: Option<String>,
    entity_contexts: HashMap<Ident, String>,
    entity_extra_decls: HashMap<Ident, String>,
    next_uid: u64,
}

impl<'a> FileTranslator<'a> {
    /// Creates a translator with an empty global tier.
    pub fn new(interner: &'a Interner, diags: &'a DiagnosticSink) -> Self {
        Self {
            interner,
            diags,
            resolver: BindingResolver::new(interner),
            last_context: None,
            entity_contexts: HashMap::new(),
            entity_extra_decls: HashMap::new(),
            next_uid: 1,
        }
    }

    /// The accumulated binding resolver.
    pub fn resolver(&self) -> &BindingResolver {
        &self.resolver
    }

    /// Translates every unit of `file` in document order.
    pub fn translate_file(
        &mut self,
        file: &DesignFile,
    ) -> Result<Vec<UnitArtifact>, TranslateError> {
        let mut artifacts = Vec::new();
        for unit in &file.units {
            self.last_context = if unit.context.trim().is_empty() {
                None
            } else {
                Some(unit.context.clone())
            };
            match &unit.kind {
                DesignUnitKind::Entity(entity) => self.register_entity(entity)?,
                DesignUnitKind::Architecture(arch) => {
                    artifacts.push(self.translate_architecture(arch)?);
                }
            }
        }
        Ok(artifacts)
    }

    fn register_entity(&mut self, entity: &EntityDecl) -> Result<(), TranslateError> {
        let iface = InterfaceDecl::from_entity(self.interner, None, entity)?;
        self.resolver.add_global(iface);
        if let Some(context) = &self.last_context {
            self.entity_contexts.insert(entity.name, context.clone());
        }
        let extra = collect_other_text(&entity.decls);
        if !extra.is_empty() {
            self.entity_extra_decls.insert(entity.name, extra);
        }
        Ok(())
    }

    fn translate_architecture(
        &mut self,
        arch: &ArchitectureDecl,
    ) -> Result<UnitArtifact, TranslateError> {
        let entity_name = EntityName::new(self.interner, None, arch.entity_name);
        let entity_iface = self
            .resolver
            .global(&entity_name)
            .cloned()
            .ok_or_else(|| TranslateError::UnknownEntity {
                name: entity_name.display(self.interner),
            })?;
        let arch_name = ArchitectureName::new(entity_name, arch.name);

        let mut graph = WiringGraph::new();
        let mut sources = NamedSources::new();
        let mut sinks = DanglingSinks::new();
        let mut uids = self.next_uid;
        let architecture_context = self.last_context.take();

        // One hub endpoint per connector-pane element. Generics carry their
        // declaration text as the label; port hubs stay anonymous so an
        // untouched port reconciles as a note, not a warning.
        for generic in entity_iface.generics() {
            let uid = alloc(&mut uids);
            let name = self.interner.resolve(generic.reference).to_owned();
            let endpoint = graph.observe_terminal(uid, true, name)?;
            sources.insert(
                self.interner,
                generic.reference,
                SourceTerm {
                    endpoint,
                    uid,
                    label: Some(generic.raw.clone()),
                },
            )?;
        }
        for port in entity_iface.ports() {
            let uid = alloc(&mut uids);
            let name = self.interner.resolve(port.reference).to_owned();
            let endpoint = graph.observe_terminal(uid, true, name)?;
            sources.insert(
                self.interner,
                port.reference,
                SourceTerm {
                    endpoint,
                    uid,
                    label: None,
                },
            )?;
        }

        let scope = self.resolver.enter_local(arch_name, &arch.decls)?;

        let mut extra_declarations = String::new();
        declare_hubs(
            self.interner,
            &arch.decls,
            &mut graph,
            &mut sources,
            &mut sinks,
            &mut uids,
            &mut extra_declarations,
        )?;

        let mut extra_statements = String::new();
        for stmt in &arch.stmts {
            match stmt {
                ConcurrentStatement::Assignment { target, value, .. } => {
                    add_sink(self.interner, *target, &mut graph, &mut sinks, &mut uids)?;
                    add_expr_sinks(self.interner, value, &mut graph, &mut sinks, &mut uids)?;
                }
                ConcurrentStatement::Instantiation(inst) => {
                    instance_sinks(
                        self.interner,
                        &scope,
                        inst,
                        &mut graph,
                        &mut sinks,
                        &mut uids,
                    )?;
                }
                ConcurrentStatement::Process { reads, drives, .. } => {
                    for &name in reads.iter().chain(drives) {
                        add_sink(self.interner, name, &mut graph, &mut sinks, &mut uids)?;
                    }
                }
                ConcurrentStatement::Other { text, .. } => {
                    extra_statements.push_str(text);
                    extra_statements.push('\n');
                }
            }
        }

        let connections = reconcile(self.interner, &mut graph, &mut sources, &mut sinks, self.diags);
        graph.close()?;
        drop(scope);

        self.next_uid = uids;
        Ok(UnitArtifact {
            architecture: arch_name,
            graph,
            connections,
            entity_context: self.entity_contexts.get(&arch.entity_name).cloned(),
            entity_extra_declarations: self.entity_extra_decls.get(&arch.entity_name).cloned(),
            architecture_context,
            extra_declarations: non_empty(extra_declarations),
            extra_statements: non_empty(extra_statements),
        })
    }
}

fn alloc(uids: &mut u64) -> Uid {
    let uid = Uid::from_raw(*uids);
    *uids += 1;
    uid
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Concatenates the verbatim text of `Other` declarative items.
fn collect_other_text(decls: &[Declaration]) -> String {
    let mut out = String::new();
    for decl in decls {
        match decl {
            Declaration::Other { text, .. } => {
                out.push_str(text);
                out.push('\n');
            }
            Declaration::Block { decls, .. } | Declaration::Package { decls, .. } => {
                out.push_str(&collect_other_text(decls));
            }
            _ => {}
        }
    }
    out
}

/// Registers hub endpoints for declared signals and constants, descending
/// through block and package wrappers. Unrecognized items fall back to the
/// verbatim extra-declarations text.
fn declare_hubs(
    interner: &Interner,
    decls: &[Declaration],
    graph: &mut WiringGraph,
    sources: &mut NamedSources,
    sinks: &mut DanglingSinks,
    uids: &mut u64,
    fallback: &mut String,
) -> Result<(), TranslateError> {
    for decl in decls {
        match decl {
            Declaration::Signal(signal) => {
                for &name in &signal.names {
                    let uid = alloc(uids);
                    let text = interner.resolve(name).to_owned();
                    let endpoint = graph.observe_terminal(uid, true, text.clone())?;
                    graph.endpoint_mut(endpoint).set_value(text);
                    sources.insert(
                        interner,
                        name,
                        SourceTerm {
                            endpoint,
                            uid,
                            label: Some(signal.raw.clone()),
                        },
                    )?;
                }
            }
            Declaration::Constant(constant) => {
                let value = constant.value.as_ref().ok_or_else(|| {
                    TranslateError::MissingConstantValue {
                        name: constant
                            .names
                            .first()
                            .map(|&n| interner.resolve(n).to_owned())
                            .unwrap_or_default(),
                    }
                })?;
                for &name in &constant.names {
                    let uid = alloc(uids);
                    let endpoint =
                        graph.observe_terminal(uid, true, interner.resolve(name).to_owned())?;
                    graph.endpoint_mut(endpoint).set_value(value.text.clone());
                    sources.insert(
                        interner,
                        name,
                        SourceTerm {
                            endpoint,
                            uid,
                            label: Some(constant.raw.clone()),
                        },
                    )?;
                }
                add_expr_sinks(interner, value, graph, sinks, uids)?;
            }
            // The local scope already registered these.
            Declaration::Component(_) => {}
            Declaration::Block { decls, .. } | Declaration::Package { decls, .. } => {
                declare_hubs(interner, decls, graph, sources, sinks, uids, fallback)?;
            }
            Declaration::Other { text, .. } => {
                fallback.push_str(text);
                fallback.push('\n');
            }
        }
    }
    Ok(())
}

fn add_sink(
    interner: &Interner,
    name: Ident,
    graph: &mut WiringGraph,
    sinks: &mut DanglingSinks,
    uids: &mut u64,
) -> Result<(), TranslateError> {
    let uid = alloc(uids);
    let text = interner.resolve(name).to_owned();
    let endpoint = graph.observe_terminal(uid, false, text.clone())?;
    sinks.insert(name, SinkTerm { endpoint, uid, text });
    Ok(())
}

fn add_expr_sinks(
    interner: &Interner,
    expr: &Expr,
    graph: &mut WiringGraph,
    sinks: &mut DanglingSinks,
    uids: &mut u64,
) -> Result<(), TranslateError> {
    for &name in &expr.refs {
        add_sink(interner, name, graph, sinks, uids)?;
    }
    Ok(())
}

/// Registers consuming endpoints for every association of an instance.
///
/// Formals are checked against the resolved interface shape; an
/// output-directed formal must map to a simple name, since the instance
/// drives that name's hub directly.
fn instance_sinks(
    interner: &Interner,
    resolver: &BindingResolver,
    inst: &Instantiation,
    graph: &mut WiringGraph,
    sinks: &mut DanglingSinks,
    uids: &mut u64,
) -> Result<(), TranslateError> {
    let instance = interner.resolve(inst.label).to_owned();
    let iface = resolver
        .resolve_unit(&inst.unit)?
        .ok_or_else(|| TranslateError::UnknownUnit {
            instance: instance.clone(),
        })?;

    for (position, assoc) in inst.generic_map.iter().enumerate() {
        match assoc.formal {
            Some(formal) => {
                iface
                    .resolve_generic(formal)
                    .ok_or_else(|| TranslateError::UnknownFormal {
                        instance: instance.clone(),
                        formal: interner.resolve(formal).to_owned(),
                    })?;
            }
            None => {
                iface.resolve_generic_at(position)?;
            }
        }
        add_expr_sinks(interner, &assoc.actual, graph, sinks, uids)?;
    }

    for (position, assoc) in inst.port_map.iter().enumerate() {
        let port = match assoc.formal {
            Some(formal) => {
                iface
                    .resolve_port(formal)
                    .ok_or_else(|| TranslateError::UnknownFormal {
                        instance: instance.clone(),
                        formal: interner.resolve(formal).to_owned(),
                    })?
            }
            None => iface.resolve_port_at(position)?,
        };
        if port.direction == PortDirection::Out && !is_simple_name(interner, &assoc.actual) {
            return Err(TranslateError::OutputPortActual {
                instance,
                port: interner.resolve(port.reference).to_owned(),
            });
        }
        add_expr_sinks(interner, &assoc.actual, graph, sinks, uids)?;
    }
    Ok(())
}

fn is_simple_name(interner: &Interner, expr: &Expr) -> bool {
    match expr.refs.as_slice() {
        [only] => expr.text.trim().eq_ignore_ascii_case(interner.resolve(*only)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_ast::{fragment, Association, DesignUnit, InstantiatedUnit, InterfaceElement};
    use skein_common::Span;
    use skein_diagnostics::Severity;
    use skein_wiring::errors::{E301, N301, W301};

    fn element(interner: &Interner, text: &str, port: bool) -> InterfaceElement {
        if port {
            fragment::try_interface_signal(text, interner).unwrap()
        } else {
            fragment::try_interface_constant(text, interner).unwrap()
        }
    }

    fn expr(interner: &Interner, text: &str) -> Expr {
        fragment::try_expression(text, interner).unwrap()
    }

    fn ident(interner: &Interner, text: &str) -> Ident {
        interner.intern_ident(text).unwrap()
    }

    /// The end-to-end scenario: entity `e` with generic `w` and ports
    /// `a`/`b`, a local component `c` with port `x`, one instance mapping
    /// `a` to `x`, and `b` left untouched.
    fn scenario(interner: &Interner) -> DesignFile {
        let entity = EntityDecl {
            name: ident(interner, "e"),
            generics: vec![element(interner, "w : natural", false)],
            ports: vec![
                element(interner, "a : in std_logic", true),
                element(interner, "b : out std_logic", true),
            ],
            decls: Vec::new(),
            span: Span::DUMMY,
        };
        let component = skein_ast::ComponentDecl {
            name: ident(interner, "c"),
            generics: Vec::new(),
            ports: vec![element(interner, "x : in std_logic", true)],
            span: Span::DUMMY,
        };
        let arch = ArchitectureDecl {
            name: ident(interner, "rtl"),
            entity_name: ident(interner, "e"),
            decls: vec![Declaration::Component(component)],
            stmts: vec![ConcurrentStatement::Instantiation(Instantiation {
                label: ident(interner, "u0"),
                unit: InstantiatedUnit::Component(ident(interner, "c")),
                generic_map: Vec::new(),
                port_map: vec![Association {
                    formal: Some(ident(interner, "x")),
                    actual: expr(interner, "a"),
                    span: Span::DUMMY,
                }],
                span: Span::DUMMY,
            })],
            span: Span::DUMMY,
        };
        DesignFile {
            units: vec![
                DesignUnit {
                    context: "library ieee;".to_owned(),
                    kind: DesignUnitKind::Entity(entity),
                    span: Span::DUMMY,
                },
                DesignUnit {
                    context: String::new(),
                    kind: DesignUnitKind::Architecture(arch),
                    span: Span::DUMMY,
                },
            ],
            span: Span::DUMMY,
        }
    }

    #[test]
    fn end_to_end_scenario() {
        let interner = Interner::new();
        let diags = DiagnosticSink::new();
        let mut translator = FileTranslator::new(&interner, &diags);
        let artifacts = translator.translate_file(&scenario(&interner)).unwrap();
        assert_eq!(artifacts.len(), 1);
        let artifact = &artifacts[0];

        // Connector indices follow generics, inputs, outputs.
        let entity_name = EntityName::new(&interner, None, ident(&interner, "e"));
        let iface = translator.resolver().global(&entity_name).unwrap();
        assert_eq!(
            iface.resolve_generic(ident(&interner, "w")).unwrap().connector_index,
            0
        );
        assert_eq!(
            iface.resolve_port(ident(&interner, "a")).unwrap().connector_index,
            1
        );
        assert_eq!(
            iface.resolve_port(ident(&interner, "b")).unwrap().connector_index,
            2
        );

        // The `a` hub is wired to the instance's `x` sink.
        assert_eq!(artifact.connections.len(), 1);
        let (source, sink) = artifact.connections[0];
        assert_eq!(artifact.graph.endpoint(source).name, "a");
        assert_eq!(artifact.graph.endpoint(sink).name, "a");
        assert!(artifact.graph.are_connected(source, sink));

        // `b` is untouched (note), `w` is unused but labeled (warning);
        // no errors.
        let diags = diags.take_all();
        assert!(!diags.iter().any(|d| d.severity == Severity::Error));
        let note = diags
            .iter()
            .find(|d| d.code == N301)
            .expect("note for untouched port");
        assert!(note.message.contains("`b`"));
        let warning = diags
            .iter()
            .find(|d| d.code == W301)
            .expect("warning for unused generic");
        assert!(warning.message.contains('w'));
    }

    #[test]
    fn entity_context_is_attached() {
        let interner = Interner::new();
        let diags = DiagnosticSink::new();
        let mut translator = FileTranslator::new(&interner, &diags);
        let artifacts = translator.translate_file(&scenario(&interner)).unwrap();
        let artifact = &artifacts[0];
        assert_eq!(artifact.entity_context.as_deref(), Some("library ieee;"));
        let formulas = artifact.context_formulas();
        assert_eq!(formulas, vec![(markers::ENTITY_CONTEXT, "library ieee;")]);
    }

    #[test]
    fn constants_feed_sinks_and_ghost_references_error() {
        let interner = Interner::new();
        let diags = DiagnosticSink::new();
        let mut translator = FileTranslator::new(&interner, &diags);

        let entity = EntityDecl {
            name: ident(&interner, "e"),
            generics: vec![element(&interner, "w : natural", false)],
            ports: Vec::new(),
            decls: Vec::new(),
            span: Span::DUMMY,
        };
        // `constant k := w - 1` consumes the generic; `ghost` is read
        // by the assignment but never produced.
        let arch = ArchitectureDecl {
            name: ident(&interner, "rtl"),
            entity_name: ident(&interner, "e"),
            decls: vec![Declaration::Constant(
                fragment::try_constant_declaration("constant k : natural := w - 1;", &interner)
                    .unwrap(),
            )],
            stmts: vec![ConcurrentStatement::Assignment {
                target: ident(&interner, "k"),
                value: expr(&interner, "ghost"),
                raw: "k <= ghost;".to_owned(),
                span: Span::DUMMY,
            }],
            span: Span::DUMMY,
        };
        let file = DesignFile {
            units: vec![
                DesignUnit {
                    context: String::new(),
                    kind: DesignUnitKind::Entity(entity),
                    span: Span::DUMMY,
                },
                DesignUnit {
                    context: String::new(),
                    kind: DesignUnitKind::Architecture(arch),
                    span: Span::DUMMY,
                },
            ],
            span: Span::DUMMY,
        };
        translator.translate_file(&file).unwrap();
        let diags = diags.take_all();
        let error = diags.iter().find(|d| d.code == E301).expect("ghost error");
        assert!(error.message.contains("ghost"));
        // `w` was consumed by the constant's value, so no warning for it.
        assert!(!diags.iter().any(|d| d.code == W301));
    }

    #[test]
    fn unknown_entity_is_fatal() {
        let interner = Interner::new();
        let diags = DiagnosticSink::new();
        let mut translator = FileTranslator::new(&interner, &diags);
        let arch = ArchitectureDecl {
            name: ident(&interner, "rtl"),
            entity_name: ident(&interner, "nowhere"),
            decls: Vec::new(),
            stmts: Vec::new(),
            span: Span::DUMMY,
        };
        let file = DesignFile {
            units: vec![DesignUnit {
                context: String::new(),
                kind: DesignUnitKind::Architecture(arch),
                span: Span::DUMMY,
            }],
            span: Span::DUMMY,
        };
        let err = translator.translate_file(&file).unwrap_err();
        assert!(matches!(err, TranslateError::UnknownEntity { .. }));
    }

    #[test]
    fn output_formal_requires_simple_name() {
        let interner = Interner::new();
        let diags = DiagnosticSink::new();
        let mut translator = FileTranslator::new(&interner, &diags);
        let entity = EntityDecl {
            name: ident(&interner, "e"),
            generics: Vec::new(),
            ports: vec![element(&interner, "q : out std_logic", true)],
            decls: Vec::new(),
            span: Span::DUMMY,
        };
        let component = skein_ast::ComponentDecl {
            name: ident(&interner, "c"),
            generics: Vec::new(),
            ports: vec![element(&interner, "y : out std_logic", true)],
            span: Span::DUMMY,
        };
        let arch = ArchitectureDecl {
            name: ident(&interner, "rtl"),
            entity_name: ident(&interner, "e"),
            decls: vec![Declaration::Component(component)],
            stmts: vec![ConcurrentStatement::Instantiation(Instantiation {
                label: ident(&interner, "u0"),
                unit: InstantiatedUnit::Component(ident(&interner, "c")),
                generic_map: Vec::new(),
                port_map: vec![Association {
                    formal: Some(ident(&interner, "y")),
                    actual: expr(&interner, "q and q"),
                    span: Span::DUMMY,
                }],
                span: Span::DUMMY,
            })],
            span: Span::DUMMY,
        };
        let file = DesignFile {
            units: vec![
                DesignUnit {
                    context: String::new(),
                    kind: DesignUnitKind::Entity(entity),
                    span: Span::DUMMY,
                },
                DesignUnit {
                    context: String::new(),
                    kind: DesignUnitKind::Architecture(arch),
                    span: Span::DUMMY,
                },
            ],
            span: Span::DUMMY,
        };
        let err = translator.translate_file(&file).unwrap_err();
        assert!(matches!(err, TranslateError::OutputPortActual { .. }));
    }
}
