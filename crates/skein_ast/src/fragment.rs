//! Try-parse probes for the small label grammar the diagram side needs.
//!
//! Diagram labels and element descriptions carry fragments of the
//! description language: interface element declarations on controls,
//! signal/constant declarations and expressions on wires and formula nodes.
//! Each probe scans the text once and returns `Option` — an unparseable
//! fragment is an expected outcome the caller dispatches on, never an error
//! used as control flow.
//!
//! The probes deliberately accept only the structural subset of the
//! grammar; the full language belongs to the parser collaborator.

use crate::ast::{ConstantDecl, Expr, InterfaceElement, PortMode, SignalDecl};
use skein_common::{Ident, Interner, Span};

/// Reserved words of the description language. These never count as free
/// identifier references and are rejected as declared names.
const RESERVED: &[&str] = &[
    "abs", "access", "after", "alias", "all", "and", "architecture", "array", "assert",
    "attribute", "begin", "block", "body", "buffer", "bus", "case", "component",
    "configuration", "constant", "disconnect", "downto", "else", "elsif", "end", "entity",
    "exit", "file", "for", "function", "generate", "generic", "group", "guarded", "if",
    "impure", "in", "inertial", "inout", "is", "label", "library", "linkage", "literal",
    "loop", "map", "mod", "nand", "new", "next", "nor", "not", "null", "of", "on", "open",
    "or", "others", "out", "package", "port", "postponed", "procedure", "process", "pure",
    "range", "record", "register", "reject", "rem", "report", "return", "rol", "ror",
    "select", "severity", "shared", "signal", "sla", "sll", "sra", "srl", "subtype", "then",
    "to", "transport", "type", "unaffected", "units", "until", "use", "variable", "wait",
    "when", "while", "with", "xnor", "xor",
];

fn is_reserved(word: &str) -> bool {
    RESERVED.binary_search(&word).is_ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokKind {
    Ident,
    Number,
    StringLit,
    CharLit,
    /// `:=`
    Assign,
    /// Any single punctuation or operator character.
    Symbol(char),
}

#[derive(Debug, Clone, Copy)]
struct Tok {
    kind: TokKind,
    start: usize,
    end: usize,
}

/// Scans `text` into tokens with byte offsets. Returns `None` on an
/// unterminated string literal; everything else tokenizes.
fn scan(text: &str) -> Option<Vec<Tok>> {
    let bytes = text.as_bytes();
    let mut toks = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < bytes.len()
                && ((bytes[i] as char).is_ascii_alphanumeric() || bytes[i] == b'_')
            {
                i += 1;
            }
            toks.push(Tok {
                kind: TokKind::Ident,
                start,
                end: i,
            });
        } else if c.is_ascii_digit() {
            let start = i;
            while i < bytes.len()
                && ((bytes[i] as char).is_ascii_alphanumeric()
                    || bytes[i] == b'_'
                    || bytes[i] == b'.')
            {
                i += 1;
            }
            toks.push(Tok {
                kind: TokKind::Number,
                start,
                end: i,
            });
        } else if c == '"' {
            let start = i;
            i += 1;
            while i < bytes.len() && bytes[i] != b'"' {
                i += 1;
            }
            if i >= bytes.len() {
                return None;
            }
            i += 1;
            toks.push(Tok {
                kind: TokKind::StringLit,
                start,
                end: i,
            });
        } else if c == '\''
            && i + 2 < bytes.len()
            && bytes[i + 2] == b'\''
            // A tick followed by an identifier is an attribute, not a
            // character literal ('a' vs clk'event).
            && !toks
                .last()
                .is_some_and(|t| matches!(t.kind, TokKind::Ident | TokKind::Symbol(')')))
        {
            toks.push(Tok {
                kind: TokKind::CharLit,
                start: i,
                end: i + 3,
            });
            i += 3;
        } else if c == ':' && i + 1 < bytes.len() && bytes[i + 1] == b'=' {
            toks.push(Tok {
                kind: TokKind::Assign,
                start: i,
                end: i + 2,
            });
            i += 2;
        } else {
            toks.push(Tok {
                kind: TokKind::Symbol(c),
                start: i,
                end: i + 1,
            });
            i += 1;
        }
    }
    Some(toks)
}

fn slice<'a>(text: &'a str, toks: &[Tok]) -> &'a str {
    if toks.is_empty() {
        return "";
    }
    text[toks[0].start..toks[toks.len() - 1].end].trim()
}

fn word<'a>(text: &'a str, tok: &Tok) -> Option<&'a str> {
    match tok.kind {
        TokKind::Ident => Some(&text[tok.start..tok.end]),
        _ => None,
    }
}

/// Collapses whitespace runs to single spaces, the normalized text form
/// used for verbatim round-tripping.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the free identifier references of an expression, in
/// first-occurrence order, deduplicated.
///
/// Identifiers following a tick (attribute designators) or a dot
/// (selected-name suffixes) belong to an inner scope and are skipped.
/// Reserved words are never references.
pub fn expr_refs(text: &str, interner: &Interner) -> Vec<Ident> {
    let Some(toks) = scan(text) else {
        return Vec::new();
    };
    collect_refs(text, &toks, interner)
}

fn collect_refs(text: &str, toks: &[Tok], interner: &Interner) -> Vec<Ident> {
    let mut refs = Vec::new();
    for (i, tok) in toks.iter().enumerate() {
        let Some(name) = word(text, tok) else {
            continue;
        };
        let lower = name.to_lowercase();
        if is_reserved(&lower) {
            continue;
        }
        if i > 0 {
            match toks[i - 1].kind {
                TokKind::Symbol('\'') | TokKind::Symbol('.') => continue,
                _ => {}
            }
        }
        // Interning a scanned identifier token cannot fail: no whitespace.
        let ident = interner.get_or_intern(&lower);
        if !refs.contains(&ident) {
            refs.push(ident);
        }
    }
    refs
}

/// Cursor over a token slice for the declaration probes.
struct Cursor<'a> {
    text: &'a str,
    toks: &'a [Tok],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, toks: &'a [Tok]) -> Self {
        Self { text, toks, pos: 0 }
    }

    fn peek_word(&self) -> Option<&'a str> {
        self.toks.get(self.pos).and_then(|t| word(self.text, t))
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self
            .peek_word()
            .is_some_and(|w| w.eq_ignore_ascii_case(kw))
        {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_symbol(&mut self, sym: char) -> bool {
        if self
            .toks
            .get(self.pos)
            .is_some_and(|t| t.kind == TokKind::Symbol(sym))
        {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_assign(&mut self) -> bool {
        if self
            .toks
            .get(self.pos)
            .is_some_and(|t| t.kind == TokKind::Assign)
        {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Parses `name {, name}` where each name is a non-reserved identifier.
    fn name_list(&mut self, interner: &Interner) -> Option<Vec<Ident>> {
        let mut names = Vec::new();
        loop {
            let name = self.peek_word()?;
            let lower = name.to_lowercase();
            if is_reserved(&lower) {
                return None;
            }
            names.push(interner.get_or_intern(lower.as_str()));
            self.pos += 1;
            if !self.eat_symbol(',') {
                break;
            }
        }
        Some(names)
    }

    /// Consumes tokens up to (not including) a top-level `:=`, `:` or `;`,
    /// returning the consumed range. Parentheses nest.
    fn until_assign_or_semicolon(&mut self) -> &'a [Tok] {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(t) = self.toks.get(self.pos) {
            match t.kind {
                TokKind::Symbol('(') => depth += 1,
                TokKind::Symbol(')') => depth = depth.saturating_sub(1),
                TokKind::Assign if depth == 0 => break,
                TokKind::Symbol(';') | TokKind::Symbol(':') if depth == 0 => break,
                _ => {}
            }
            self.pos += 1;
        }
        &self.toks[start..self.pos]
    }

    fn rest(&mut self) -> &'a [Tok] {
        let start = self.pos;
        let mut end = self.toks.len();
        // Tolerate one trailing semicolon.
        if end > start && self.toks[end - 1].kind == TokKind::Symbol(';') {
            end -= 1;
        }
        self.pos = end;
        &self.toks[start..end]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.toks.len()
            || (self.pos + 1 == self.toks.len()
                && self.toks[self.pos].kind == TokKind::Symbol(';'))
    }
}

/// Common body of the interface element probes:
/// `names : [mode] type [:= default]`.
fn interface_body(
    cursor: &mut Cursor<'_>,
    allow_mode: bool,
    interner: &Interner,
    raw: &str,
) -> Option<InterfaceElement> {
    let names = cursor.name_list(interner)?;
    if !cursor.eat_symbol(':') {
        return None;
    }
    let mode = if allow_mode {
        let m = match cursor.peek_word().map(str::to_lowercase).as_deref() {
            Some("in") => Some(PortMode::In),
            Some("out") => Some(PortMode::Out),
            Some("inout") => Some(PortMode::Inout),
            Some("buffer") => Some(PortMode::Buffer),
            Some("linkage") => Some(PortMode::Linkage),
            _ => None,
        };
        if m.is_some() {
            cursor.pos += 1;
        }
        m
    } else {
        None
    };
    let ty_toks = cursor.until_assign_or_semicolon();
    if ty_toks.is_empty() {
        return None;
    }
    let ty = slice(cursor.text, ty_toks).to_string();
    let default = if cursor.eat_assign() {
        let expr_toks = cursor.rest();
        if expr_toks.is_empty() {
            return None;
        }
        Some(Expr {
            text: slice(cursor.text, expr_toks).to_string(),
            refs: collect_refs(cursor.text, expr_toks, interner),
            span: Span::DUMMY,
        })
    } else {
        None
    };
    if !cursor.at_end() {
        return None;
    }
    Some(InterfaceElement {
        names,
        mode,
        ty,
        default,
        raw: normalize_text(raw),
        span: Span::DUMMY,
    })
}

/// Probes `[constant] names : type [:= default]` as a generic interface
/// element. The element never carries a mode; generics are constant inputs.
pub fn try_interface_constant(text: &str, interner: &Interner) -> Option<InterfaceElement> {
    let toks = scan(text)?;
    let mut cursor = Cursor::new(text, &toks);
    cursor.eat_keyword("constant");
    interface_body(&mut cursor, false, interner, text)
}

/// Probes `[signal] names : [mode] type [:= default]` as a port interface
/// element.
pub fn try_interface_signal(text: &str, interner: &Interner) -> Option<InterfaceElement> {
    let toks = scan(text)?;
    let mut cursor = Cursor::new(text, &toks);
    cursor.eat_keyword("signal");
    interface_body(&mut cursor, true, interner, text)
}

/// Probes `signal names : type [:= default] [;]` as a signal declaration.
/// The leading keyword is required, matching the declaration grammar.
pub fn try_signal_declaration(text: &str, interner: &Interner) -> Option<SignalDecl> {
    let toks = scan(text)?;
    let mut cursor = Cursor::new(text, &toks);
    if !cursor.eat_keyword("signal") {
        return None;
    }
    let element = interface_body(&mut cursor, false, interner, text)?;
    Some(SignalDecl {
        names: element.names,
        ty: element.ty,
        default: element.default,
        raw: normalize_text(text),
        span: Span::DUMMY,
    })
}

/// Probes `constant names : type := value [;]` as a constant declaration.
/// The leading keyword and the value are both required.
pub fn try_constant_declaration(text: &str, interner: &Interner) -> Option<ConstantDecl> {
    let toks = scan(text)?;
    let mut cursor = Cursor::new(text, &toks);
    if !cursor.eat_keyword("constant") {
        return None;
    }
    let element = interface_body(&mut cursor, false, interner, text)?;
    let value = element.default?;
    Some(ConstantDecl {
        names: element.names,
        ty: element.ty,
        value: Some(value),
        raw: normalize_text(text),
        span: Span::DUMMY,
    })
}

/// Probes `text` as a plain expression.
///
/// Rejects empty text, unbalanced parentheses, and anything containing
/// declaration punctuation (`:`, `:=`, or an interior `;`), which signals
/// the label was a declaration after all.
pub fn try_expression(text: &str, interner: &Interner) -> Option<Expr> {
    let toks = scan(text)?;
    let mut end = toks.len();
    if end > 0 && toks[end - 1].kind == TokKind::Symbol(';') {
        end -= 1;
    }
    let toks = &toks[..end];
    if toks.is_empty() {
        return None;
    }
    let mut depth = 0i64;
    for t in toks {
        match t.kind {
            TokKind::Assign | TokKind::Symbol(':') | TokKind::Symbol(';') => return None,
            TokKind::Symbol('(') => depth += 1,
            TokKind::Symbol(')') => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    Some(Expr {
        text: slice(text, toks).to_string(),
        refs: collect_refs(text, toks, interner),
        span: Span::DUMMY,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interner() -> Interner {
        Interner::new()
    }

    #[test]
    fn reserved_table_is_sorted() {
        let mut sorted = RESERVED.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, RESERVED);
    }

    #[test]
    fn interface_signal_with_mode() {
        let it = interner();
        let el = try_interface_signal("data_out : out std_logic_vector(7 downto 0)", &it)
            .expect("should parse");
        assert_eq!(el.names, vec![it.get_or_intern("data_out")]);
        assert_eq!(el.mode, Some(PortMode::Out));
        assert_eq!(el.ty, "std_logic_vector(7 downto 0)");
        assert!(el.default.is_none());
    }

    #[test]
    fn interface_signal_defaults_to_no_mode() {
        let it = interner();
        let el = try_interface_signal("clk : std_logic", &it).unwrap();
        assert_eq!(el.mode, None);
    }

    #[test]
    fn interface_constant_with_default() {
        let it = interner();
        let el = try_interface_constant("constant width : natural := 8", &it).unwrap();
        assert_eq!(el.names, vec![it.get_or_intern("width")]);
        assert_eq!(el.ty, "natural");
        assert_eq!(el.default.as_ref().unwrap().text, "8");
    }

    #[test]
    fn multiple_names_accepted_by_probe() {
        let it = interner();
        let el = try_interface_signal("a, b : in std_logic", &it).unwrap();
        assert_eq!(el.names.len(), 2);
    }

    #[test]
    fn signal_declaration_requires_keyword() {
        let it = interner();
        assert!(try_signal_declaration("x : std_logic", &it).is_none());
        let decl = try_signal_declaration("signal x : std_logic;", &it).unwrap();
        assert_eq!(decl.names, vec![it.get_or_intern("x")]);
    }

    #[test]
    fn constant_declaration_requires_value() {
        let it = interner();
        assert!(try_constant_declaration("constant w : natural", &it).is_none());
        let decl = try_constant_declaration("constant w : natural := 2 * depth;", &it).unwrap();
        let value = decl.value.unwrap();
        assert_eq!(value.text, "2 * depth");
        assert_eq!(value.refs, vec![it.get_or_intern("depth")]);
    }

    #[test]
    fn expression_refs_skip_attributes_and_suffixes() {
        let it = interner();
        let expr = try_expression("clk'event and work.pkg.f(x)", &it).unwrap();
        let names: Vec<&str> = expr.refs.iter().map(|r| it.resolve(*r)).collect();
        // `event` follows a tick, `pkg`/`f` follow dots; `clk`, `work` and
        // `x` remain.
        assert_eq!(names, vec!["clk", "work", "x"]);
    }

    #[test]
    fn expression_refs_deduplicate() {
        let it = interner();
        let expr = try_expression("a and a and b", &it).unwrap();
        assert_eq!(expr.refs.len(), 2);
    }

    #[test]
    fn expression_rejects_declarations() {
        let it = interner();
        assert!(try_expression("signal x : std_logic", &it).is_none());
        assert!(try_expression("x := 1", &it).is_none());
        assert!(try_expression("", &it).is_none());
        assert!(try_expression("(a or b", &it).is_none());
    }

    #[test]
    fn expression_ignores_literal_contents() {
        let it = interner();
        let expr = try_expression("x & \"0101\" & '1'", &it).unwrap();
        assert_eq!(expr.refs, vec![it.get_or_intern("x")]);
    }

    #[test]
    fn case_folding_in_refs() {
        let it = interner();
        let expr = try_expression("Clk AND reset_N", &it).unwrap();
        let names: Vec<&str> = expr.refs.iter().map(|r| it.resolve(*r)).collect();
        assert_eq!(names, vec!["clk", "reset_n"]);
    }

    #[test]
    fn probe_rejects_trailing_garbage() {
        let it = interner();
        assert!(try_interface_signal("a : std_logic extra : nonsense :", &it).is_none());
    }
}
