//! Interned, case-normalized identifiers for cheap cloning and O(1) equality.

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// A unique identifier for any named element of a design or diagram.
///
/// Identifiers are interned strings represented as a `u32` index into a
/// shared string interner. This provides O(1) equality comparison and O(1)
/// cloning. The description language is case-insensitive, so identifiers are
/// normalized (trimmed, lowercased) before interning; two spellings of the
/// same name always intern to the same `Ident`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// Creates an `Ident` from a raw `u32` index.
    ///
    /// This is primarily intended for deserialization and testing.
    /// In normal use, identifiers should be created through
    /// [`Interner::intern_ident`].
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index of this identifier.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `Ident` wraps a `u32` which is always a valid `usize` on 32-bit and
// 64-bit platforms. `try_from_usize` rejects values that don't fit in `u32`.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// Error produced when constructing an [`Ident`] from malformed text.
#[derive(Debug, thiserror::Error)]
pub enum IdentError {
    /// The text still contains whitespace after trimming, so it cannot be a
    /// single symbolic name.
    #[error("identifier `{text}` contains internal whitespace")]
    InternalWhitespace {
        /// The offending text, after trimming.
        text: String,
    },
    /// The text is empty after trimming.
    #[error("identifier is empty")]
    Empty,
}

/// Thread-safe string interner backed by [`lasso::ThreadedRodeo`].
///
/// All identifiers, interface names, and terminal names are interned to
/// provide O(1) equality, O(1) cloning, and string deduplication across a
/// translation session.
pub struct Interner {
    rodeo: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates a new empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Interns a symbolic name after normalizing it.
    ///
    /// Normalization trims surrounding whitespace and lowercases the text
    /// (the description language is case-insensitive). Text that still
    /// contains whitespace after trimming is not a single name and is
    /// rejected with [`IdentError::InternalWhitespace`].
    pub fn intern_ident(&self, s: &str) -> Result<Ident, IdentError> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(IdentError::Empty);
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(IdentError::InternalWhitespace { text: normalized });
        }
        Ok(self.rodeo.get_or_intern(normalized))
    }

    /// Interns a string verbatim, returning its [`Ident`]. If the string was
    /// already interned, returns the existing identifier without allocating.
    ///
    /// Prefer [`intern_ident`](Self::intern_ident) for names coming from
    /// source text or diagram labels; this method is for text that is
    /// already normalized.
    pub fn get_or_intern(&self, s: &str) -> Ident {
        self.rodeo.get_or_intern(s)
    }

    /// Resolves an [`Ident`] back to its string value.
    ///
    /// # Panics
    ///
    /// Panics if the `Ident` was not created by this interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.rodeo.resolve(&ident)
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_resolve_roundtrip() {
        let interner = Interner::new();
        let id = interner.intern_ident("clk").unwrap();
        assert_eq!(interner.resolve(id), "clk");
    }

    #[test]
    fn case_insensitive() {
        let interner = Interner::new();
        let a = interner.intern_ident("Data_Out").unwrap();
        let b = interner.intern_ident("DATA_OUT").unwrap();
        assert_eq!(a, b);
        assert_eq!(interner.resolve(a), "data_out");
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        let interner = Interner::new();
        let a = interner.intern_ident("  rst  ").unwrap();
        let b = interner.intern_ident("rst").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn internal_whitespace_rejected() {
        let interner = Interner::new();
        let err = interner.intern_ident("two words").unwrap_err();
        assert!(matches!(err, IdentError::InternalWhitespace { .. }));
    }

    #[test]
    fn empty_rejected() {
        let interner = Interner::new();
        assert!(matches!(
            interner.intern_ident("   "),
            Err(IdentError::Empty)
        ));
    }

    #[test]
    fn different_strings_different_idents() {
        let interner = Interner::new();
        let a = interner.intern_ident("foo").unwrap();
        let b = interner.intern_ident("bar").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn serde_roundtrip() {
        let id = Ident(42);
        let json = serde_json::to_string(&id).unwrap();
        let back: Ident = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
