//! Diagnostic codes and helper functions for wiring and reconciliation.
//!
//! Error code `E301` covers sinks left without any producer. Warning code
//! `W301` and note code `N301` cover declared and anonymous sources that no
//! sink ever consumed.

use skein_common::Uid;
use skein_diagnostics::{Category, Diagnostic, DiagnosticCode};

/// Sink references a name with no matching source.
pub const E301: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 301,
};

/// Declared source was never consumed by any sink.
pub const W301: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 301,
};

/// Anonymous source was never consumed by any sink.
pub const N301: DiagnosticCode = DiagnosticCode {
    category: Category::Note,
    number: 301,
};

/// Creates a diagnostic for a sink with no producer.
pub fn error_dangling_sink(text: &str, element: Uid) -> Diagnostic {
    Diagnostic::error(
        E301,
        format!("`{text}` is read but nothing produces it"),
        skein_common::Span::DUMMY,
    )
    .with_element(element)
    .with_help("declare a constant or signal with this name, or wire a source to it")
}

/// Creates a diagnostic for a declared source no sink consumed.
pub fn warning_unused_source(label: &str, element: Uid) -> Diagnostic {
    Diagnostic::warning(
        W301,
        format!("`{label}` is produced but never read"),
        skein_common::Span::DUMMY,
    )
    .with_element(element)
}

/// Creates a diagnostic for an anonymous source no sink consumed.
pub fn note_unconnected_source(name: &str, element: Uid) -> Diagnostic {
    Diagnostic::note(
        N301,
        format!("source `{name}` is not connected"),
        skein_common::Span::DUMMY,
    )
    .with_element(element)
}
