//! Interface declarations and the structural binding resolver.
//!
//! This crate models the ordered generic/port interface of an entity or
//! component ([`InterfaceDecl`]), the library/architecture-qualified names
//! that identify interfaces ([`InterfaceName`]), and the two-tier symbol
//! table that resolves instantiations against them ([`BindingResolver`]).

#![warn(missing_docs)]

pub mod iface;
pub mod naming;
pub mod resolver;

pub use iface::{GenericDecl, IfaceError, InterfaceDecl, PortDecl, PortDirection};
pub use naming::{ArchitectureName, EntityName, InterfaceName, DEFAULT_LIBRARY};
pub use resolver::{BindingResolver, LocalScope, ResolveError};
