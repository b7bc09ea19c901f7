//! The two-tier structural binding resolver.
//!
//! The description language allows exactly one level of interface nesting:
//! entities are global, components are local to the architecture whose
//! declarative region declares them (and shadow same-named entities there).
//! The resolver therefore holds a global tier populated incrementally and at
//! most one local tier, rebuilt on entering an architecture and cleared on
//! exit. The local lifecycle is expressed as a drop guard so every exit
//! path, including error paths, leaves the resolver without a stale scope.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use skein_ast::{Declaration, InstantiatedUnit};
use skein_common::{Ident, Interner};

use crate::iface::{IfaceError, InterfaceDecl};
use crate::naming::{ArchitectureName, EntityName, InterfaceName, DEFAULT_LIBRARY};

/// Error raised on a caller-level scope protocol violation.
///
/// Distinct from a plain lookup miss: an empty scope answers `None`, a
/// missing scope answers this.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A component-qualified lookup ran while no local scope was active.
    #[error("no active local scope for component lookup")]
    NoActiveScope,
}

struct LocalTier {
    architecture: ArchitectureName,
    /// Components keyed by their simple identifier; the architecture
    /// qualifier is fixed per tier.
    map: HashMap<Ident, InterfaceDecl>,
}

/// Two-tier symbol table mapping interface names to their declarations.
pub struct BindingResolver {
    global: HashMap<InterfaceName, InterfaceDecl>,
    local: Option<LocalTier>,
    default_library: Ident,
}

impl BindingResolver {
    /// Creates an empty resolver.
    pub fn new(interner: &Interner) -> Self {
        Self {
            global: HashMap::new(),
            local: None,
            default_library: interner.get_or_intern(DEFAULT_LIBRARY),
        }
    }

    /// Registers an entity declaration in the global tier. Last write wins;
    /// duplicate entity names are a caller-level concern.
    pub fn add_global(&mut self, decl: InterfaceDecl) {
        self.global.insert(*decl.name(), decl);
    }

    /// Looks up an entity by qualified name in the global tier.
    pub fn global(&self, name: &EntityName) -> Option<&InterfaceDecl> {
        self.global.get(&InterfaceName::Entity(*name))
    }

    /// Looks up a component in the active local tier.
    ///
    /// An empty tier answers `Ok(None)`; a missing tier is the protocol
    /// violation [`ResolveError::NoActiveScope`].
    pub fn local(&self, name: Ident) -> Result<Option<&InterfaceDecl>, ResolveError> {
        let tier = self.local.as_ref().ok_or(ResolveError::NoActiveScope)?;
        Ok(tier.map.get(&name))
    }

    /// Returns `true` while a local scope is active.
    pub fn has_local_scope(&self) -> bool {
        self.local.is_some()
    }

    /// The components of the active local tier, in no particular order.
    pub fn local_components(
        &self,
    ) -> Result<impl Iterator<Item = &InterfaceDecl>, ResolveError> {
        let tier = self.local.as_ref().ok_or(ResolveError::NoActiveScope)?;
        Ok(tier.map.values())
    }

    /// Replaces the local tier with one built by recursively visiting
    /// `decls`, registering every component declaration found at any
    /// nesting depth (descending through block and package wrappers).
    ///
    /// Returns a guard that clears the tier when dropped. Entering while a
    /// scope is already active discards the previous tier.
    pub fn enter_local(
        &mut self,
        architecture: ArchitectureName,
        decls: &[Declaration],
    ) -> Result<LocalScope<'_>, IfaceError> {
        let mut map = HashMap::new();
        collect_components(architecture, decls, &mut map)?;
        self.local = Some(LocalTier { architecture, map });
        Ok(LocalScope { resolver: self })
    }

    /// Clears the local tier. Subsequent local lookups fail with
    /// [`ResolveError::NoActiveScope`] until the next
    /// [`enter_local`](Self::enter_local).
    pub fn exit_local(&mut self) {
        self.local = None;
    }

    /// Resolves a simple name: the active local tier first (components
    /// shadow entities), then the global tier under the default library.
    ///
    /// With no active scope the lookup falls straight to the global tier —
    /// a missing scope only matters for explicitly component-qualified
    /// references.
    pub fn resolve(&self, name: Ident) -> Option<&InterfaceDecl> {
        if let Some(tier) = &self.local {
            if let Some(decl) = tier.map.get(&name) {
                return Some(decl);
            }
        }
        self.global(&EntityName {
            library: self.default_library,
            name,
        })
    }

    /// Resolves the referenced side of an instantiation.
    ///
    /// A component reference requires an active local scope (missing one is
    /// a protocol violation) and falls back to a same-named default-library
    /// entity when the component is not declared. A direct entity reference
    /// consults the global tier only.
    pub fn resolve_unit(
        &self,
        unit: &InstantiatedUnit,
    ) -> Result<Option<&InterfaceDecl>, ResolveError> {
        match unit {
            InstantiatedUnit::Component(name) => {
                if let Some(decl) = self.local(*name)? {
                    return Ok(Some(decl));
                }
                Ok(self.global(&EntityName {
                    library: self.default_library,
                    name: *name,
                }))
            }
            InstantiatedUnit::Entity { library, name } => Ok(self.global(&EntityName {
                library: library.unwrap_or(self.default_library),
                name: *name,
            })),
        }
    }

    /// The architecture the active local tier belongs to.
    pub fn current_architecture(&self) -> Option<ArchitectureName> {
        self.local.as_ref().map(|tier| tier.architecture)
    }
}

fn collect_components(
    architecture: ArchitectureName,
    decls: &[Declaration],
    map: &mut HashMap<Ident, InterfaceDecl>,
) -> Result<(), IfaceError> {
    for decl in decls {
        match decl {
            Declaration::Component(component) => {
                let iface = InterfaceDecl::from_component(architecture, component)?;
                map.insert(component.name, iface);
            }
            Declaration::Block { decls, .. } | Declaration::Package { decls, .. } => {
                collect_components(architecture, decls, map)?;
            }
            Declaration::Signal(_) | Declaration::Constant(_) | Declaration::Other { .. } => {}
        }
    }
    Ok(())
}

/// Drop guard for an active local scope.
///
/// Derefs to the resolver so lookups run through the guard; dropping it
/// clears the local tier on every exit path.
pub struct LocalScope<'a> {
    resolver: &'a mut BindingResolver,
}

impl Deref for LocalScope<'_> {
    type Target = BindingResolver;

    fn deref(&self) -> &BindingResolver {
        self.resolver
    }
}

impl DerefMut for LocalScope<'_> {
    fn deref_mut(&mut self) -> &mut BindingResolver {
        self.resolver
    }
}

impl Drop for LocalScope<'_> {
    fn drop(&mut self) {
        self.resolver.exit_local();
    }
}
