//! Diagnostic creation, severity management, and accumulation.
//!
//! This crate provides structured [`Diagnostic`] messages with severity
//! levels, error codes, source labels, and optional diagram element
//! references. The thread-safe [`DiagnosticSink`] accumulates diagnostics
//! during a translation session; rendering for any particular frontend is
//! left to the embedding application.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use severity::Severity;
pub use sink::DiagnosticSink;
