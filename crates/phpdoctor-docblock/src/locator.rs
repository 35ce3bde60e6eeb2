//! Doc-comment discovery and classification
//!
//! Walks the token stream, picks out `/** ... */` tokens (ordinary block
//! and line comments are never candidates) and classifies the code element
//! each one documents by looking past attributes and modifier keywords.

use phpdoctor_core::{Token, TokenKind};

use crate::docblock::Newline;

/// Kind of code element a doc comment documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Class,
    Interface,
    Trait,
    Enum,
    Function,
    Property,
    Constant,
    /// A statement that is not a declaration
    FreeStatement,
    /// Nothing follows the comment
    None,
}

/// One located doc comment, with the metadata rules need
#[derive(Debug, Clone)]
pub struct DocComment {
    /// Index of the token in the stream
    pub token_index: usize,
    /// Byte offset of `/**` in the source
    pub offset: usize,
    /// Raw comment text, `/**` through `*/`
    pub text: String,
    /// Whitespace between the preceding line break and `/**`; empty when
    /// the comment does not start its own line
    pub indent: String,
    /// Whether the comment starts its own line
    pub owns_line: bool,
    /// Line break style of the comment (falling back to the file's)
    pub newline: Newline,
    /// The element the comment documents
    pub element: ElementKind,
}

const MODIFIERS: &[&str] = &[
    "abstract", "final", "public", "protected", "private", "static", "readonly", "var",
];

/// Locate every doc comment in the token stream
pub fn find_doc_comments(source: &str, tokens: &[Token]) -> Vec<DocComment> {
    let file_newline = Newline::detect(source).unwrap_or(Newline::Lf);

    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind == TokenKind::DocComment)
        .map(|(index, token)| {
            let (indent, owns_line) = indent_before(source, token.offset);
            let newline = Newline::detect(&token.text).unwrap_or(file_newline);

            DocComment {
                token_index: index,
                offset: token.offset,
                text: token.text.clone(),
                indent,
                owns_line,
                newline,
                element: classify(tokens, index),
            }
        })
        .collect()
}

/// Whitespace between the previous line break and `offset`
fn indent_before(source: &str, offset: usize) -> (String, bool) {
    let before = &source[..offset];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &before[line_start..];

    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        (prefix.to_string(), true)
    } else {
        (String::new(), false)
    }
}

/// Classify the element following the doc comment at `index`
fn classify(tokens: &[Token], index: usize) -> ElementKind {
    let mut saw_modifier = false;

    for token in &tokens[index + 1..] {
        match token.kind {
            TokenKind::Whitespace
            | TokenKind::LineComment
            | TokenKind::BlockComment
            | TokenKind::Attribute => continue,
            TokenKind::Word => {
                if MODIFIERS.iter().any(|m| token.is_keyword(m)) {
                    saw_modifier = true;
                    continue;
                }
                if token.is_keyword("class") {
                    return ElementKind::Class;
                }
                if token.is_keyword("interface") {
                    return ElementKind::Interface;
                }
                if token.is_keyword("trait") {
                    return ElementKind::Trait;
                }
                if token.is_keyword("enum") {
                    return ElementKind::Enum;
                }
                if token.is_keyword("function") {
                    return ElementKind::Function;
                }
                if token.is_keyword("const") {
                    return ElementKind::Constant;
                }
                // A plain word after a modifier is part of a property's
                // native type (`private int $x`)
                if saw_modifier {
                    continue;
                }
                return ElementKind::FreeStatement;
            }
            TokenKind::Punct
                if saw_modifier
                    && matches!(token.text.as_str(), "\\" | "?" | "|" | "&" | "(" | ")") =>
            {
                // Nullable, union, intersection and DNF type punctuation
                continue;
            }
            TokenKind::Variable => {
                return if saw_modifier {
                    ElementKind::Property
                } else {
                    ElementKind::FreeStatement
                };
            }
            TokenKind::DocComment => {
                // A second doc comment supersedes this one
                return ElementKind::None;
            }
            TokenKind::CloseTag | TokenKind::InlineHtml => return ElementKind::FreeStatement,
            _ => return ElementKind::FreeStatement,
        }
    }

    ElementKind::None
}
