//! Diagnostic codes and helper functions for translation.

use skein_common::Uid;
use skein_diagnostics::{Category, Diagnostic, DiagnosticCode};

/// Wire whose members all share one polarity; nothing was connected.
pub const N302: DiagnosticCode = DiagnosticCode {
    category: Category::Note,
    number: 302,
};

/// Creates a diagnostic for a wire that connected nothing because all its
/// members share one polarity.
pub fn note_same_polarity_wire(wire: Uid, members: usize) -> Diagnostic {
    Diagnostic::note(
        N302,
        format!("wire {wire} joins {members} terminals of the same polarity"),
        skein_common::Span::DUMMY,
    )
    .with_element(wire)
    .with_note("same-polarity members share the wire without connecting")
}
