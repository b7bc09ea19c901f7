//! Opaque identities for diagram elements delivered by the automation host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a single diagram element (terminal, wire, tunnel,
/// panel, node...).
///
/// The diagram host assigns these; by contract they are unique within one
/// diagram unit. The core never interprets the value, only compares and
/// hashes it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Uid(u64);

impl Uid {
    /// A dummy uid used when no diagram element is involved (e.g. synthetic
    /// endpoints created during emission).
    pub const DUMMY: Uid = Uid(u64::MAX);

    /// Creates a `Uid` from a raw `u64` value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw `u64` value of this `Uid`.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
