//! Loose-end accumulators: named value sources and dangling sinks, the two
//! inputs of the late reconciliation pass.

use std::collections::HashMap;

use skein_common::{Ident, InternalError, Interner, SkeinResult, Uid};

use crate::endpoint::EndpointId;

/// A value-producing loose end, optionally carrying an emission label.
///
/// Labeled sources stand for declared constants and signals and are
/// expected to be consumed; an unlabeled one is an anonymous intermediate
/// and may legitimately go unused.
#[derive(Clone, Debug)]
pub struct SourceTerm {
    /// The endpoint backing this source.
    pub endpoint: EndpointId,
    /// The diagram identity of the producing element.
    pub uid: Uid,
    /// The declared name as originally written, for reporting.
    pub label: Option<String>,
}

/// A value-consuming loose end awaiting a source.
#[derive(Clone, Debug)]
pub struct SinkTerm {
    /// The endpoint backing this sink.
    pub endpoint: EndpointId,
    /// The diagram identity of the consuming element.
    pub uid: Uid,
    /// The referenced name as originally written, for reporting.
    pub text: String,
}

/// Sources keyed by normalized name. Single-producer: a second source for
/// the same name is an internal invariant violation, since each name is
/// declared by at most one element upstream.
#[derive(Debug, Default)]
pub struct NamedSources {
    map: HashMap<Ident, SourceTerm>,
}

impl NamedSources {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a source under `name`.
    pub fn insert(
        &mut self,
        interner: &Interner,
        name: Ident,
        source: SourceTerm,
    ) -> SkeinResult<()> {
        if self.map.contains_key(&name) {
            return Err(InternalError::new(format!(
                "{} has other sources",
                interner.resolve(name)
            )));
        }
        self.map.insert(name, source);
        Ok(())
    }

    /// Removes and returns the source for `name`, if present.
    pub fn take(&mut self, name: Ident) -> Option<SourceTerm> {
        self.map.remove(&name)
    }

    /// Returns `true` if a source for `name` is registered.
    pub fn contains(&self, name: Ident) -> bool {
        self.map.contains_key(&name)
    }

    /// Iterates the remaining sources without removing them.
    pub fn iter(&self) -> impl Iterator<Item = (Ident, &SourceTerm)> + '_ {
        self.map.iter().map(|(name, source)| (*name, source))
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no sources are registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Sinks keyed by normalized name. Multimap: one name legitimately fans
/// out to any number of consumers.
#[derive(Debug, Default)]
pub struct DanglingSinks {
    map: HashMap<Ident, Vec<SinkTerm>>,
}

impl DanglingSinks {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sink under `name`.
    pub fn insert(&mut self, name: Ident, sink: SinkTerm) {
        self.map.entry(name).or_default().push(sink);
    }

    /// Removes and returns all sinks for `name`.
    pub fn take(&mut self, name: Ident) -> Vec<SinkTerm> {
        self.map.remove(&name).unwrap_or_default()
    }

    /// Returns `true` if at least one sink for `name` is registered.
    pub fn contains(&self, name: Ident) -> bool {
        self.map.contains_key(&name)
    }

    /// Iterates the remaining sink groups without removing them.
    pub fn iter(&self) -> impl Iterator<Item = (Ident, &[SinkTerm])> + '_ {
        self.map.iter().map(|(name, group)| (*name, group.as_slice()))
    }

    /// Returns `true` if no sinks are registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
