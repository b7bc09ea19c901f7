//! Qualified names for entities, architectures, and components.
//!
//! An entity lives in a library (`work` by default); an architecture is
//! named relative to its entity; a component is a forward declaration local
//! to one architecture. Equality and hashing are structural.

use serde::{Deserialize, Serialize};
use skein_common::{Ident, Interner};

/// The library an unqualified entity name belongs to.
pub const DEFAULT_LIBRARY: &str = "work";

/// Separator between qualifier and local name in display form.
const LIBRARY_SEPARATOR: char = '.';

/// A library-qualified entity name, e.g. `work.counter`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct EntityName {
    /// The containing library.
    pub library: Ident,
    /// The entity identifier.
    pub name: Ident,
}

impl EntityName {
    /// Creates an entity name, defaulting the library to
    /// [`DEFAULT_LIBRARY`] when none is given.
    pub fn new(interner: &Interner, library: Option<Ident>, name: Ident) -> Self {
        let library = library.unwrap_or_else(|| interner.get_or_intern(DEFAULT_LIBRARY));
        Self { library, name }
    }

    /// Renders `library.name` for messages and emission.
    pub fn display(&self, interner: &Interner) -> String {
        format!(
            "{}{}{}",
            interner.resolve(self.library),
            LIBRARY_SEPARATOR,
            interner.resolve(self.name)
        )
    }
}

/// An architecture name: the entity it implements plus the architecture
/// identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ArchitectureName {
    /// The entity this architecture implements.
    pub entity: EntityName,
    /// The architecture identifier.
    pub name: Ident,
}

impl ArchitectureName {
    /// Creates an architecture name.
    pub fn new(entity: EntityName, name: Ident) -> Self {
        Self { entity, name }
    }

    /// Renders `library.entity(name)` for messages.
    pub fn display(&self, interner: &Interner) -> String {
        format!(
            "{}({})",
            self.entity.display(interner),
            interner.resolve(self.name)
        )
    }
}

/// Identifies a declared interface: either a global entity or a component
/// local to one architecture.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum InterfaceName {
    /// A global entity declaration.
    Entity(EntityName),
    /// A component declared inside an architecture's declarative region.
    Component {
        /// The architecture whose declarative region holds the component.
        architecture: ArchitectureName,
        /// The component identifier.
        name: Ident,
    },
}

impl InterfaceName {
    /// Returns the local (unqualified) identifier of this interface.
    pub fn local_name(&self) -> Ident {
        match self {
            InterfaceName::Entity(e) => e.name,
            InterfaceName::Component { name, .. } => *name,
        }
    }

    /// Renders the qualified name for messages.
    pub fn display(&self, interner: &Interner) -> String {
        match self {
            InterfaceName::Entity(e) => e.display(interner),
            InterfaceName::Component { architecture, name } => format!(
                "{}{}{}",
                architecture.display(interner),
                LIBRARY_SEPARATOR,
                interner.resolve(*name)
            ),
        }
    }
}
