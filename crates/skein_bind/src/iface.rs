//! The interface declaration model: ordered generics and ports with
//! connector-pane index assignment.
//!
//! An [`InterfaceDecl`] is built once — from a parsed entity/component
//! declaration or from diagram-derived fragments — and is immutable
//! afterwards. Connector indices are assigned during construction in the
//! fixed order generics, then input ports, then output ports, each in
//! declaration order, forming a dense `0..N` sequence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use skein_ast::{ComponentDecl, EntityDecl, InterfaceElement, PortMode};
use skein_common::{Ident, Interner};

use crate::naming::{ArchitectureName, EntityName, InterfaceName};

/// Errors raised while building or querying an interface declaration.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum IfaceError {
    /// An interface element declared several identifiers where exactly one
    /// is required.
    #[error("multiple identifiers in interface declaration `{text}`")]
    MultipleIdentifiers {
        /// The offending element text.
        text: String,
    },
    /// A port spelled a direction the bridge does not support.
    #[error("port direction `{mode}` is not supported")]
    UnsupportedMode {
        /// The unsupported mode, as written.
        mode: String,
    },
    /// An index-based lookup exceeded the declared count.
    #[error("{kind} index {index} out of range ({len} declared)")]
    IndexOutOfRange {
        /// What was being resolved ("generic" or "port").
        kind: &'static str,
        /// The requested index.
        index: usize,
        /// The declared count.
        len: usize,
    },
    /// Two diagram-derived elements claimed the same connector index.
    #[error("duplicate connector index {index}")]
    DuplicateConnectorIndex {
        /// The contested index.
        index: u32,
    },
}

/// Direction of a port as seen from the interface.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port.
    In,
    /// Output port.
    Out,
}

/// A single generic of an interface. Generics are compile-time constant
/// inputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenericDecl {
    /// The generic's identifier.
    pub reference: Ident,
    /// Position within the textual generic list.
    pub list_index: usize,
    /// Flattened position within the connector pane.
    pub connector_index: u32,
    /// Normalized declaration text, re-emitted verbatim.
    pub raw: String,
}

impl GenericDecl {
    /// Generics are always constant.
    pub fn is_constant(&self) -> bool {
        true
    }

    /// Generics are always inputs.
    pub fn is_input(&self) -> bool {
        true
    }
}

/// A single port of an interface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortDecl {
    /// The port's identifier.
    pub reference: Ident,
    /// The port direction.
    pub direction: PortDirection,
    /// Position within the textual port list.
    pub list_index: usize,
    /// Flattened position within the connector pane.
    pub connector_index: u32,
    /// Normalized declaration text, re-emitted verbatim.
    pub raw: String,
}

impl PortDecl {
    /// Ports carry runtime values, never constants.
    pub fn is_constant(&self) -> bool {
        false
    }

    /// Returns `true` for input-directed ports.
    pub fn is_input(&self) -> bool {
        self.direction == PortDirection::In
    }
}

/// A connector-pane slot: either a generic or a port.
#[derive(Clone, Copy, Debug)]
pub enum ConnectorSlot<'a> {
    /// The slot holds a generic.
    Generic(&'a GenericDecl),
    /// The slot holds a port.
    Port(&'a PortDecl),
}

/// The ordered interface of an entity or component.
///
/// Owns its generic and port declarations, plus per-identifier lookup maps
/// built at construction time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterfaceDecl {
    name: InterfaceName,
    generics: Vec<GenericDecl>,
    ports: Vec<PortDecl>,
    generic_by_ref: HashMap<Ident, usize>,
    port_by_ref: HashMap<Ident, usize>,
    inputs: usize,
    outputs: usize,
}

fn single_name(element: &InterfaceElement) -> Result<Ident, IfaceError> {
    match element.names.as_slice() {
        [name] => Ok(*name),
        _ => Err(IfaceError::MultipleIdentifiers {
            text: element.raw.clone(),
        }),
    }
}

fn port_direction(element: &InterfaceElement) -> Result<PortDirection, IfaceError> {
    match element.mode {
        None | Some(PortMode::In) => Ok(PortDirection::In),
        Some(PortMode::Out) => Ok(PortDirection::Out),
        Some(other) => Err(IfaceError::UnsupportedMode {
            mode: format!("{other:?}").to_lowercase(),
        }),
    }
}

impl InterfaceDecl {
    /// Builds an interface from textual generic and port element lists, in
    /// document order.
    ///
    /// Each element must declare exactly one identifier and an `in`/`out`
    /// direction (missing mode defaults to input). Connector indices are
    /// assigned after the walk: generics, then input ports, then output
    /// ports, each in declaration order.
    pub fn from_elements(
        name: InterfaceName,
        generic_elements: &[InterfaceElement],
        port_elements: &[InterfaceElement],
    ) -> Result<Self, IfaceError> {
        let mut generics = Vec::with_capacity(generic_elements.len());
        for (list_index, element) in generic_elements.iter().enumerate() {
            generics.push(GenericDecl {
                reference: single_name(element)?,
                list_index,
                connector_index: 0,
                raw: element.raw.clone(),
            });
        }
        let mut ports = Vec::with_capacity(port_elements.len());
        for (list_index, element) in port_elements.iter().enumerate() {
            ports.push(PortDecl {
                reference: single_name(element)?,
                direction: port_direction(element)?,
                list_index,
                connector_index: 0,
                raw: element.raw.clone(),
            });
        }

        // Now that all inputs and outputs are known, flatten the pane.
        let mut index = 0u32;
        for generic in &mut generics {
            generic.connector_index = index;
            index += 1;
        }
        for port in ports.iter_mut().filter(|p| p.is_input()) {
            port.connector_index = index;
            index += 1;
        }
        for port in ports.iter_mut().filter(|p| !p.is_input()) {
            port.connector_index = index;
            index += 1;
        }

        Ok(Self::assemble(name, generics, ports))
    }

    /// Builds an interface from diagram-derived elements keyed by their
    /// connector-pane index.
    ///
    /// List order is the ascending connector order the diagram presented;
    /// the indices themselves are kept as given (they may disagree with the
    /// generics-inputs-outputs convention when the source diagram assigned
    /// them out of textual order — tolerated, not normalized). The combined
    /// index set must be dense `0..N`.
    pub fn from_indexed(
        name: InterfaceName,
        generic_elements: Vec<(u32, InterfaceElement)>,
        port_elements: Vec<(u32, InterfaceElement)>,
    ) -> Result<Self, IfaceError> {
        let total = (generic_elements.len() + port_elements.len()) as u32;
        let mut seen = vec![false; total as usize];
        let mut claim = |index: u32| -> Result<(), IfaceError> {
            if index >= total {
                return Err(IfaceError::IndexOutOfRange {
                    kind: "connector",
                    index: index as usize,
                    len: total as usize,
                });
            }
            if seen[index as usize] {
                return Err(IfaceError::DuplicateConnectorIndex { index });
            }
            seen[index as usize] = true;
            Ok(())
        };

        let mut generic_elements = generic_elements;
        generic_elements.sort_by_key(|(index, _)| *index);
        let mut generics = Vec::with_capacity(generic_elements.len());
        for (list_index, (connector_index, element)) in generic_elements.iter().enumerate() {
            claim(*connector_index)?;
            generics.push(GenericDecl {
                reference: single_name(element)?,
                list_index,
                connector_index: *connector_index,
                raw: element.raw.clone(),
            });
        }

        let mut port_elements = port_elements;
        port_elements.sort_by_key(|(index, _)| *index);
        let mut ports = Vec::with_capacity(port_elements.len());
        for (list_index, (connector_index, element)) in port_elements.iter().enumerate() {
            claim(*connector_index)?;
            ports.push(PortDecl {
                reference: single_name(element)?,
                direction: port_direction(element)?,
                list_index,
                connector_index: *connector_index,
                raw: element.raw.clone(),
            });
        }

        // In-range and duplicate-free claims fill all `total` slots, so the
        // combined index set is dense by counting.
        Ok(Self::assemble(name, generics, ports))
    }

    /// Builds an interface for a parsed entity declaration.
    pub fn from_entity(
        interner: &Interner,
        library: Option<Ident>,
        decl: &EntityDecl,
    ) -> Result<Self, IfaceError> {
        let name = InterfaceName::Entity(EntityName::new(interner, library, decl.name));
        Self::from_elements(name, &decl.generics, &decl.ports)
    }

    /// Builds an interface for a component declared inside `architecture`.
    pub fn from_component(
        architecture: ArchitectureName,
        decl: &ComponentDecl,
    ) -> Result<Self, IfaceError> {
        let name = InterfaceName::Component {
            architecture,
            name: decl.name,
        };
        Self::from_elements(name, &decl.generics, &decl.ports)
    }

    fn assemble(name: InterfaceName, generics: Vec<GenericDecl>, ports: Vec<PortDecl>) -> Self {
        let generic_by_ref = generics
            .iter()
            .enumerate()
            .map(|(i, g)| (g.reference, i))
            .collect();
        let port_by_ref = ports
            .iter()
            .enumerate()
            .map(|(i, p)| (p.reference, i))
            .collect();
        let inputs = ports.iter().filter(|p| p.is_input()).count();
        let outputs = ports.len() - inputs;
        Self {
            name,
            generics,
            ports,
            generic_by_ref,
            port_by_ref,
            inputs,
            outputs,
        }
    }

    /// The qualified name of this interface.
    pub fn name(&self) -> &InterfaceName {
        &self.name
    }

    /// The generics, in declaration order.
    pub fn generics(&self) -> &[GenericDecl] {
        &self.generics
    }

    /// The ports, in declaration order.
    pub fn ports(&self) -> &[PortDecl] {
        &self.ports
    }

    /// The input ports, in declaration order.
    pub fn ports_in(&self) -> impl Iterator<Item = &PortDecl> {
        self.ports.iter().filter(|p| p.is_input())
    }

    /// The output ports, in declaration order.
    pub fn ports_out(&self) -> impl Iterator<Item = &PortDecl> {
        self.ports.iter().filter(|p| !p.is_input())
    }

    /// Number of input ports.
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// Number of output ports.
    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// Total number of connector-pane slots.
    pub fn connector_count(&self) -> usize {
        self.generics.len() + self.ports.len()
    }

    /// Resolves a generic by list position. Out-of-range indices are an
    /// error distinct from a by-name miss.
    pub fn resolve_generic_at(&self, index: usize) -> Result<&GenericDecl, IfaceError> {
        self.generics
            .get(index)
            .ok_or(IfaceError::IndexOutOfRange {
                kind: "generic",
                index,
                len: self.generics.len(),
            })
    }

    /// Resolves a generic by identifier; `None` means no generic has that
    /// name.
    pub fn resolve_generic(&self, reference: Ident) -> Option<&GenericDecl> {
        self.generic_by_ref
            .get(&reference)
            .map(|&i| &self.generics[i])
    }

    /// Resolves a port by list position. Out-of-range indices are an error
    /// distinct from a by-name miss.
    pub fn resolve_port_at(&self, index: usize) -> Result<&PortDecl, IfaceError> {
        self.ports.get(index).ok_or(IfaceError::IndexOutOfRange {
            kind: "port",
            index,
            len: self.ports.len(),
        })
    }

    /// Resolves a port by identifier; `None` means no port has that name.
    pub fn resolve_port(&self, reference: Ident) -> Option<&PortDecl> {
        self.port_by_ref.get(&reference).map(|&i| &self.ports[i])
    }

    /// Finds the slot holding the given connector index, if any.
    pub fn by_connector(&self, index: u32) -> Option<ConnectorSlot<'_>> {
        if let Some(g) = self.generics.iter().find(|g| g.connector_index == index) {
            return Some(ConnectorSlot::Generic(g));
        }
        self.ports
            .iter()
            .find(|p| p.connector_index == index)
            .map(ConnectorSlot::Port)
    }

    /// Re-joins the generic list in stored list order. Never re-sorted by
    /// connector index.
    fn generic_list(&self) -> String {
        self.generics
            .iter()
            .map(|g| g.raw.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Re-joins the port list in stored list order. Never re-sorted by
    /// connector index.
    fn port_list(&self) -> String {
        self.ports
            .iter()
            .map(|p| p.raw.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Serializes this interface as an entity declaration.
    pub fn emit_as_entity(&self, interner: &Interner) -> String {
        let name = interner.resolve(self.name.local_name());
        let mut out = format!("entity {name} is\n");
        if !self.generics.is_empty() {
            out.push_str(&format!("  generic ({});\n", self.generic_list()));
        }
        if !self.ports.is_empty() {
            out.push_str(&format!("  port ({});\n", self.port_list()));
        }
        out.push_str(&format!("end {name};\n"));
        out
    }

    /// Serializes this interface as a component declaration.
    pub fn emit_as_component(&self, interner: &Interner) -> String {
        let name = interner.resolve(self.name.local_name());
        let mut out = format!("component {name} is\n");
        if !self.generics.is_empty() {
            out.push_str(&format!("  generic ({});\n", self.generic_list()));
        }
        if !self.ports.is_empty() {
            out.push_str(&format!("  port ({});\n", self.port_list()));
        }
        out.push_str("end component;\n");
        out
    }
}
