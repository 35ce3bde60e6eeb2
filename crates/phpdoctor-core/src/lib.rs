//! phpdoctor-core: Core abstractions for PHPDoc rewriting
//!
//! This crate provides:
//! - `Edit`: A span-based source modification
//! - `apply_edits()`: Function to apply edits preserving all other bytes
//! - `Token` / `tokenize()`: A lightweight lexical scan of PHP source,
//!   sufficient to locate comments and classify neighboring code

mod edit;
pub mod token;

pub use edit::{apply_edits, Edit, EditError};
pub use token::{tokenize, Token, TokenKind};
