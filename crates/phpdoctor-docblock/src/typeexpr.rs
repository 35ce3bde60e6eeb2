//! PHPDoc type expression parsing and normalization
//!
//! Two layers:
//! - `split_leading_type` finds where the type token of a tag line ends,
//!   respecting nested `<>`, `{}`, `()` and spaces inside them
//! - `parse_type` builds a structural `TypeExpr`, used by rules that must
//!   compare PHPDoc types against native declarations
//!
//! Parsing is best-effort: text that does not parse is treated as opaque
//! by callers, never rejected.

use std::collections::BTreeSet;

use crate::context::TypeContext;

/// A parsed type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Plain (possibly qualified) name
    Name(String),
    /// `?T`
    Nullable(Box<TypeExpr>),
    /// `A|B|...`
    Union(Vec<TypeExpr>),
    /// `A&B&...`
    Intersection(Vec<TypeExpr>),
    /// `Base<Arg, ...>`
    Generic { base: String, args: Vec<TypeExpr> },
    /// `array{...}` / `object{...}` — the shape body is kept opaque
    Shape { base: String, body: String },
    /// `callable(...)` / `Closure(...)` with optional `: return`
    Callable { signature: String },
}

/// Length in bytes of the type token at the start of `s`, or `None` when
/// `s` does not start with a type. Spaces terminate the token unless they
/// sit inside brackets or around a `|` / `&` connector.
pub fn split_leading_type(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let first = bytes[0];
    if !(first.is_ascii_alphabetic()
        || first == b'_'
        || first == b'\\'
        || first == b'?'
        || first == b'('
        || first >= 0x80)
    {
        return None;
    }

    let mut depth = 0usize;
    let mut i = 0usize;
    let mut prev: u8 = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if depth == 0 && (b == b' ' || b == b'\t') {
            // A connector on either side of the gap keeps the token going
            let mut j = i;
            while j < bytes.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
                j += 1;
            }
            let glue_before = matches!(prev, b'|' | b'&') || (prev == b':' && i >= 2);
            let next_is_ref_marker =
                j + 1 < bytes.len() && bytes[j] == b'&' && bytes[j + 1] == b'$';
            let glue_after =
                j < bytes.len() && matches!(bytes[j], b'|' | b'&') && !next_is_ref_marker;

            if glue_before || glue_after {
                i = j;
                continue;
            }
            break;
        }

        match b {
            b'<' | b'{' | b'(' => depth += 1,
            b'>' | b'}' | b')' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && prev != b')' => break,
            _ => {}
        }

        prev = b;
        i += 1;
    }

    if i == 0 {
        None
    } else {
        Some(i)
    }
}

/// Parse a complete type expression. `None` when trailing text remains or
/// the structure is not recognized.
pub fn parse_type(s: &str) -> Option<TypeExpr> {
    let mut parser = Parser {
        bytes: s.as_bytes(),
        src: s,
        pos: 0,
    };
    let expr = parser.union()?;
    parser.skip_ws();
    if parser.pos < parser.bytes.len() {
        return None;
    }
    Some(expr)
}

struct Parser<'a> {
    bytes: &'a [u8],
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn skip_ws(&mut self) {
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos] == b' ' || self.bytes[self.pos] == b'\t')
        {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn union(&mut self) -> Option<TypeExpr> {
        let mut parts = vec![self.intersection()?];
        loop {
            self.skip_ws();
            if self.peek() == Some(b'|') {
                self.pos += 1;
                parts.push(self.intersection()?);
            } else {
                break;
            }
        }
        if parts.len() == 1 {
            Some(parts.pop().unwrap())
        } else {
            Some(TypeExpr::Union(parts))
        }
    }

    fn intersection(&mut self) -> Option<TypeExpr> {
        let mut parts = vec![self.atom()?];
        loop {
            self.skip_ws();
            if self.peek() == Some(b'&') {
                self.pos += 1;
                parts.push(self.atom()?);
            } else {
                break;
            }
        }
        if parts.len() == 1 {
            Some(parts.pop().unwrap())
        } else {
            Some(TypeExpr::Intersection(parts))
        }
    }

    fn atom(&mut self) -> Option<TypeExpr> {
        self.skip_ws();
        match self.peek()? {
            b'?' => {
                self.pos += 1;
                Some(TypeExpr::Nullable(Box::new(self.atom()?)))
            }
            b'(' => {
                self.pos += 1;
                let inner = self.union()?;
                self.skip_ws();
                if self.peek() == Some(b')') {
                    self.pos += 1;
                    Some(inner)
                } else {
                    None
                }
            }
            _ => self.named(),
        }
    }

    fn named(&mut self) -> Option<TypeExpr> {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'\\' || b == b'-' || b >= 0x80 {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return None;
        }
        let name = self.src[start..self.pos].to_string();

        match self.peek() {
            Some(b'<') => {
                let body = self.balanced(b'<', b'>')?;
                let args = split_top_level(&body, b',')
                    .into_iter()
                    .map(|a| parse_type(a.trim()))
                    .collect::<Option<Vec<_>>>()?;
                Some(TypeExpr::Generic { base: name, args })
            }
            Some(b'{') => {
                let body = self.balanced(b'{', b'}')?;
                Some(TypeExpr::Shape { base: name, body })
            }
            Some(b'(') => {
                let body = self.balanced(b'(', b')')?;
                let mut signature = format!("{}({})", name, body);
                self.skip_ws();
                if self.peek() == Some(b':') {
                    self.pos += 1;
                    self.skip_ws();
                    let ret = self.union()?;
                    signature.push_str(": ");
                    signature.push_str(&render(&ret));
                }
                Some(TypeExpr::Callable { signature })
            }
            _ => Some(TypeExpr::Name(name)),
        }
    }

    /// Consume a balanced `open ... close` group, returning the inner text
    fn balanced(&mut self, open: u8, close: u8) -> Option<String> {
        debug_assert_eq!(self.peek(), Some(open));
        self.pos += 1;
        let start = self.pos;
        let mut depth = 1usize;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    let inner = self.src[start..self.pos].to_string();
                    self.pos += 1;
                    return Some(inner);
                }
            }
            self.pos += 1;
        }
        None
    }
}

fn split_top_level(s: &str, sep: u8) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' | b'{' | b'(' => depth += 1,
            b'>' | b'}' | b')' => depth = depth.saturating_sub(1),
            _ if b == sep && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn render(expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Name(n) => n.clone(),
        TypeExpr::Nullable(inner) => format!("?{}", render(inner)),
        TypeExpr::Union(parts) => parts.iter().map(render).collect::<Vec<_>>().join("|"),
        TypeExpr::Intersection(parts) => parts.iter().map(render).collect::<Vec<_>>().join("&"),
        TypeExpr::Generic { base, args } => format!(
            "{}<{}>",
            base,
            args.iter().map(render).collect::<Vec<_>>().join(", ")
        ),
        TypeExpr::Shape { base, body } => format!("{}{{{}}}", base, body),
        TypeExpr::Callable { signature } => signature.clone(),
    }
}

/// Type names PHP resolves without a namespace lookup
const BUILTIN_TYPES: &[&str] = &[
    "int", "float", "string", "bool", "mixed", "object", "array", "callable", "iterable", "void",
    "null", "never", "false", "true", "resource", "parent",
];

/// Resolve one name to its comparison key: builtins stay as-is (lowercase),
/// `self`/`static`/`$this` map to the enclosing class, everything else is
/// expanded through the import map and current namespace. Comparison keys
/// are lowercase because PHP class names are case-insensitive.
pub fn resolve_name(name: &str, ctx: &TypeContext) -> String {
    let lower = name.to_ascii_lowercase();

    if BUILTIN_TYPES.contains(&lower.as_str()) {
        return lower;
    }
    if matches!(lower.as_str(), "self" | "static" | "$this") {
        return match &ctx.class_fqcn {
            Some(class) => class.to_ascii_lowercase(),
            None => lower,
        };
    }
    if let Some(stripped) = lower.strip_prefix('\\') {
        return stripped.to_string();
    }

    let (head, tail) = match lower.split_once('\\') {
        Some((head, tail)) => (head.to_string(), Some(tail.to_string())),
        None => (lower.clone(), None),
    };
    if let Some(import) = ctx.imports.get(&head) {
        let import = import.to_ascii_lowercase();
        return match tail {
            Some(tail) => format!("{}\\{}", import, tail),
            None => import,
        };
    }
    match &ctx.namespace {
        Some(ns) => format!("{}\\{}", ns.to_ascii_lowercase(), lower),
        None => lower,
    }
}

/// Flatten an expression into a set of resolved atom keys. `None` when the
/// expression carries structure (generics, shapes, callables) that cannot
/// be proven redundant against a native declaration.
pub fn normalized_atoms(expr: &TypeExpr, ctx: &TypeContext) -> Option<BTreeSet<String>> {
    let mut atoms = BTreeSet::new();
    collect_atoms(expr, ctx, &mut atoms)?;
    Some(atoms)
}

fn collect_atoms(expr: &TypeExpr, ctx: &TypeContext, out: &mut BTreeSet<String>) -> Option<()> {
    match expr {
        TypeExpr::Name(n) => {
            out.insert(resolve_name(n, ctx));
            Some(())
        }
        TypeExpr::Nullable(inner) => {
            out.insert("null".to_string());
            collect_atoms(inner, ctx, out)
        }
        TypeExpr::Union(parts) => {
            for p in parts {
                collect_atoms(p, ctx, out)?;
            }
            Some(())
        }
        TypeExpr::Intersection(parts) => {
            // An intersection is one atom: its members sorted and joined
            let mut names = Vec::new();
            for p in parts {
                match p {
                    TypeExpr::Name(n) => names.push(resolve_name(n, ctx)),
                    _ => return None,
                }
            }
            names.sort();
            out.insert(names.join("&"));
            Some(())
        }
        TypeExpr::Generic { .. } | TypeExpr::Shape { .. } | TypeExpr::Callable { .. } => None,
    }
}

/// Whether a PHPDoc type is fully redundant with a native declaration.
/// `implicit_null` marks a parameter with a `= null` default. Any parse
/// failure or unprovable structure yields `false` (leave the tag alone).
pub fn is_redundant(doc_type: &str, native_type: &str, implicit_null: bool, ctx: &TypeContext) -> bool {
    let doc = match parse_type(doc_type.trim()).and_then(|e| normalized_atoms(&e, ctx)) {
        Some(atoms) => atoms,
        None => return false,
    };
    let mut native = match parse_type(native_type.trim()).and_then(|e| normalized_atoms(&e, ctx)) {
        Some(atoms) => atoms,
        None => return false,
    };
    if implicit_null {
        native.insert("null".to_string());
    }
    doc == native
}
