//! Structural AST fragments and label-fragment parsing.
//!
//! The text-grammar parser proper is an external collaborator; this crate
//! defines the closed set of structural node types the core consumes (sum
//! types with exhaustive matching at every consumption site) plus a small
//! fragment parser for the label grammar the diagram side probes: interface
//! element declarations, signal/constant declarations, and expressions.
//!
//! Every node carries a [`Span`](skein_common::Span) and, where verbatim
//! round-tripping matters, its normalized source text.

#![warn(missing_docs)]

pub mod ast;
pub mod fragment;

pub use ast::*;
