//! Structured diagnostic messages with severity, codes, labels, and element
//! references.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use skein_common::{Span, Uid};

/// A structured diagnostic message.
///
/// Diagnostics are the primary mechanism for reporting errors, warnings, and
/// notes to the user. Each diagnostic includes:
/// - A severity level and unique code
/// - A primary message and source span
/// - Optionally, the diagram element it refers to (half of this system's
///   findings point at diagram elements rather than source text)
/// - Optional secondary labels and explanatory notes
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The primary source span where the issue was detected, or
    /// [`Span::DUMMY`] for purely diagram-side findings.
    pub primary_span: Span,
    /// The diagram element the issue refers to, if any.
    pub element: Option<Uid>,
    /// Additional annotated source spans providing context.
    pub labels: Vec<Label>,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, code: DiagnosticCode, message: String, span: Span) -> Self {
        Self {
            severity,
            code,
            message,
            primary_span: span,
            element: None,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic with the given code, message, and span.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, code, message.into(), span)
    }

    /// Creates a new warning diagnostic with the given code, message, and span.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, code, message.into(), span)
    }

    /// Creates a new note-severity diagnostic with the given code, message,
    /// and span.
    pub fn note(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Note, code, message.into(), span)
    }

    /// Attaches the diagram element this diagnostic refers to.
    pub fn with_element(mut self, element: Uid) -> Self {
        self.element = Some(element);
        self
    }

    /// Adds a label to this diagnostic.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_error() {
        let code = DiagnosticCode::new(Category::Error, 301);
        let diag = Diagnostic::error(code, "undeclared component", Span::DUMMY);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "undeclared component");
        assert_eq!(format!("{}", diag.code), "E301");
        assert!(diag.element.is_none());
    }

    #[test]
    fn create_note() {
        let code = DiagnosticCode::new(Category::Note, 305);
        let diag = Diagnostic::note(code, "unconnected source", Span::DUMMY);
        assert_eq!(diag.severity, Severity::Note);
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Error, 301);
        let diag = Diagnostic::error(code, "duplicate terminal", Span::DUMMY)
            .with_element(Uid::from_raw(12))
            .with_label(Label::secondary(Span::DUMMY, "first observed here"))
            .with_note("diagram identities must be unique")
            .with_help("re-export the diagram from the host");
        assert_eq!(diag.element, Some(Uid::from_raw(12)));
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Warning, 302);
        let diag = Diagnostic::warning(code, "dangling source", Span::DUMMY)
            .with_element(Uid::from_raw(3));
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.severity, Severity::Warning);
        assert_eq!(back.element, Some(Uid::from_raw(3)));
    }
}
