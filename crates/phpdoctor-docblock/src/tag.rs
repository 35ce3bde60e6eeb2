//! Per-tag grammar
//!
//! A dispatch table maps tag names to the grammar used to split the tag's
//! first line. Unknown tags fall back to "everything is description" so
//! custom annotations survive untouched.

use regex::Regex;

use crate::typeexpr::split_leading_type;

/// How a tag's first line is split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagGrammar {
    /// `[type] [$variable] [description]` (`@param`, `@var`, `@property*`, ...)
    TypeVariable,
    /// `[type] [description]` (`@return`, `@throws`, ...)
    TypeOnly,
    /// `[description]` (unknown and custom tags)
    Plain,
}

/// Grammar lookup for a tag name (without `@`). Vendor-prefixed aliases
/// (`psalm-param`, `phpstan-return`, ...) use their base tag's grammar.
pub fn grammar_for(name: &str) -> TagGrammar {
    let lower = name.to_ascii_lowercase();
    let base = lower
        .strip_prefix("psalm-")
        .or_else(|| lower.strip_prefix("phpstan-"))
        .unwrap_or(&lower);

    match base {
        "param" | "var" | "type" | "property" | "property-read" | "property-write" => {
            TagGrammar::TypeVariable
        }
        "return" | "throws" => TagGrammar::TypeOnly,
        _ => TagGrammar::Plain,
    }
}

/// A tag's first line, split per its grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name without `@`
    pub name: String,
    /// Type expression text, verbatim
    pub ty: Option<String>,
    /// Variable token as written, including `$` (and `...`/`&` prefixes)
    pub variable: Option<String>,
    /// Remaining description text
    pub description: String,
}

impl Tag {
    /// Bare variable name: no `$`, no `...`/`&` prefix
    pub fn variable_name(&self) -> Option<&str> {
        self.variable
            .as_deref()
            .map(|v| v.trim_start_matches(['.', '&', '$']))
    }
}

/// Extract the tag name when `content` starts a tag (either `@name` or the
/// inline form `{@name ...}`)
pub fn tag_start_name(content: &str) -> Option<String> {
    let re = Regex::new(r"^\{?@([A-Za-z][A-Za-z0-9_\\-]*)").unwrap();
    re.captures(content).map(|c| c[1].to_string())
}

/// Split a tag's first line into its grammar parts. Returns `None` when
/// the line does not start a tag.
pub fn parse_tag(line: &str) -> Option<Tag> {
    let trimmed = line.trim();
    let body = match trimmed.strip_prefix('{') {
        Some(rest) if trimmed.ends_with('}') => &rest[..rest.len() - 1],
        _ => trimmed,
    };

    let re = Regex::new(r"^@([A-Za-z][A-Za-z0-9_\\-]*)[ \t]*(.*)$").unwrap();
    let caps = re.captures(body)?;
    let name = caps[1].to_string();
    let rest = caps.get(2).map_or("", |m| m.as_str());

    let tag = match grammar_for(&name) {
        TagGrammar::Plain => Tag {
            name,
            ty: None,
            variable: None,
            description: rest.to_string(),
        },
        TagGrammar::TypeOnly => {
            let (ty, rest) = take_type(rest);
            Tag {
                name,
                ty,
                variable: None,
                description: rest.to_string(),
            }
        }
        TagGrammar::TypeVariable => {
            let (ty, rest) = if starts_with_variable(rest) {
                (None, rest)
            } else {
                take_type(rest)
            };
            let (variable, rest) = take_variable(rest);
            Tag {
                name,
                ty,
                variable,
                description: rest.to_string(),
            }
        }
    };
    Some(tag)
}

fn starts_with_variable(s: &str) -> bool {
    let s = s.trim_start_matches(['.', '&']);
    s.starts_with('$')
}

fn take_type(s: &str) -> (Option<String>, &str) {
    match split_leading_type(s) {
        Some(len) if len > 0 => (Some(s[..len].to_string()), s[len..].trim_start()),
        _ => (None, s),
    }
}

fn take_variable(s: &str) -> (Option<String>, &str) {
    let re = Regex::new(r"^(?:\.\.\.)?&?\$[A-Za-z_\x80-\x{10FFFF}][A-Za-z0-9_\x80-\x{10FFFF}]*").unwrap();
    match re.find(s) {
        Some(m) => (Some(m.as_str().to_string()), s[m.end()..].trim_start()),
        None => (None, s),
    }
}
