//! Late matching of named sources against dangling sinks.
//!
//! Runs once per translation unit, after every element has been walked and
//! all wires are closed. Matching consumes both sides; leftovers stay in
//! their accumulators, so running the pass again connects nothing and
//! reproduces the same leftover report.

use skein_common::{Ident, Interner};
use skein_diagnostics::DiagnosticSink;

use crate::endpoint::EndpointId;
use crate::ends::{DanglingSinks, NamedSources};
use crate::errors;
use crate::graph::WiringGraph;

/// Matches dangling sinks against named sources by normalized name.
///
/// Every matched pair is connected in `graph` and removed from its
/// accumulator; the returned list holds the new `(source, sink)` endpoint
/// pairs for the caller to materialize. Leftovers are reported to `diags`
/// with graded severity but stay registered: a sink with no producer is an
/// error, a labeled source nothing consumed is a warning, an anonymous one
/// only a note.
pub fn reconcile(
    interner: &Interner,
    graph: &mut WiringGraph,
    sources: &mut NamedSources,
    sinks: &mut DanglingSinks,
    diags: &DiagnosticSink,
) -> Vec<(EndpointId, EndpointId)> {
    let mut connected = Vec::new();

    let mut matched: Vec<Ident> = sinks
        .iter()
        .map(|(name, _)| name)
        .filter(|name| sources.contains(*name))
        .collect();
    matched.sort_by(|a, b| interner.resolve(*a).cmp(interner.resolve(*b)));

    for name in matched {
        if let Some(source) = sources.take(name) {
            for term in sinks.take(name) {
                graph.connect(source.endpoint, term.endpoint);
                connected.push((source.endpoint, term.endpoint));
            }
        }
    }

    for (_, group) in sorted_by_name(interner, sinks.iter()) {
        for term in group {
            diags.emit(errors::error_dangling_sink(&term.text, term.uid));
        }
    }

    for (_, source) in sorted_by_name(interner, sources.iter()) {
        match &source.label {
            Some(label) => diags.emit(errors::warning_unused_source(label, source.uid)),
            None => {
                let name = &graph.endpoint(source.endpoint).name;
                diags.emit(errors::note_unconnected_source(name, source.uid));
            }
        }
    }

    connected
}

/// Orders drained entries by resolved name so reports are deterministic.
fn sorted_by_name<T>(
    interner: &Interner,
    entries: impl Iterator<Item = (Ident, T)>,
) -> Vec<(Ident, T)> {
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by(|(a, _), (b, _)| interner.resolve(*a).cmp(interner.resolve(*b)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ends::{SinkTerm, SourceTerm};
    use skein_common::Uid;
    use skein_diagnostics::Severity;

    struct Fixture {
        interner: Interner,
        graph: WiringGraph,
        sources: NamedSources,
        sinks: DanglingSinks,
        diags: DiagnosticSink,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                interner: Interner::new(),
                graph: WiringGraph::new(),
                sources: NamedSources::new(),
                sinks: DanglingSinks::new(),
                diags: DiagnosticSink::new(),
            }
        }

        fn add_source(&mut self, raw: u64, name: &str, label: Option<&str>) -> EndpointId {
            let endpoint = self.graph.observe_terminal(Uid::from_raw(raw), true, name).unwrap();
            let ident = self.interner.intern_ident(name).unwrap();
            self.sources
                .insert(
                    &self.interner,
                    ident,
                    SourceTerm {
                        endpoint,
                        uid: Uid::from_raw(raw),
                        label: label.map(str::to_owned),
                    },
                )
                .unwrap();
            endpoint
        }

        fn add_sink(&mut self, raw: u64, name: &str) -> EndpointId {
            let endpoint = self
                .graph
                .observe_terminal(Uid::from_raw(raw), false, name)
                .unwrap();
            let ident = self.interner.intern_ident(name).unwrap();
            self.sinks.insert(
                ident,
                SinkTerm {
                    endpoint,
                    uid: Uid::from_raw(raw),
                    text: name.to_owned(),
                },
            );
            endpoint
        }

        fn run(&mut self) -> Vec<(EndpointId, EndpointId)> {
            reconcile(
                &self.interner,
                &mut self.graph,
                &mut self.sources,
                &mut self.sinks,
                &self.diags,
            )
        }
    }

    #[test]
    fn matched_names_are_connected_and_consumed() {
        let mut fx = Fixture::new();
        let src = fx.add_source(1, "clk", Some("clk"));
        let a = fx.add_sink(2, "clk");
        let b = fx.add_sink(3, "CLK");
        let pairs = fx.run();
        assert_eq!(pairs.len(), 2);
        assert!(fx.graph.are_connected(src, a));
        assert!(fx.graph.are_connected(src, b));
        assert!(fx.diags.take_all().is_empty());
    }

    #[test]
    fn dangling_sink_is_an_error() {
        let mut fx = Fixture::new();
        fx.add_sink(1, "ghost");
        let pairs = fx.run();
        assert!(pairs.is_empty());
        let diags = fx.diags.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].code, errors::E301);
    }

    #[test]
    fn leftover_severity_is_graded_by_label() {
        let mut fx = Fixture::new();
        fx.add_source(1, "declared", Some("declared"));
        fx.add_source(2, "anon", None);
        fx.run();
        let diags = fx.diags.take_all();
        assert_eq!(diags.len(), 2);
        // Sorted by name: "anon" before "declared".
        assert_eq!(diags[0].severity, Severity::Note);
        assert_eq!(diags[1].severity, Severity::Warning);
        assert!(!fx.diags.has_errors());
    }

    #[test]
    fn second_run_connects_nothing_and_repeats_the_leftover_report() {
        let mut fx = Fixture::new();
        fx.add_source(1, "clk", Some("clk"));
        fx.add_source(2, "unused", Some("unused"));
        fx.add_sink(3, "clk");
        fx.add_sink(4, "ghost");
        let pairs = fx.run();
        assert_eq!(pairs.len(), 1);
        let first = fx.diags.take_all();

        // Matched entries were consumed; leftovers stay put and the second
        // run reproduces exactly the first report.
        let pairs = fx.run();
        assert!(pairs.is_empty());
        let second = fx.diags.take_all();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), first.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.severity, b.severity);
            assert_eq!(a.code, b.code);
            assert_eq!(a.message, b.message);
        }
    }
}
