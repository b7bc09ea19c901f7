//! Shared foundational types for the skein translation core.
//!
//! This crate provides interned, case-normalized identifiers, opaque diagram
//! element identities, source spans, and common result types used by every
//! other crate in the workspace.

#![warn(missing_docs)]

pub mod ident;
pub mod result;
pub mod span;
pub mod uid;

pub use ident::{Ident, IdentError, Interner};
pub use result::{InternalError, SkeinResult};
pub use span::{FileId, Span};
pub use uid::Uid;
