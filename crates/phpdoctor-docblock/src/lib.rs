//! phpdoctor-docblock: The docblock rewriting engine
//!
//! This crate turns a raw `/** ... */` doc comment into a structured,
//! line-preserving model, lets a fixer rule mutate that model, and
//! serializes it back to text. Serializing an unmodified model reproduces
//! the original text byte-for-byte.
//!
//! Pieces:
//! - `locator`: find doc comments in a token stream and classify the code
//!   element each one documents
//! - `DocBlock` / `Line` / `Annotation`: the parsed model
//! - `tag`: per-tag grammar (type / variable / description splitting)
//! - `typeexpr`: PHPDoc type expression parsing and normalization
//! - `context`: native type declarations and imports around one docblock

pub mod context;
pub mod docblock;
pub mod line;
pub mod locator;
pub mod tag;
pub mod typeexpr;

pub use context::{NativeParam, TypeContext};
pub use docblock::{Annotation, DocBlock, Newline};
pub use line::Line;
pub use locator::{find_doc_comments, DocComment, ElementKind};
pub use tag::{grammar_for, parse_tag, Tag, TagGrammar};
pub use typeexpr::TypeExpr;
