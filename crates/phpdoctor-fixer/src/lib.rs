//! phpdoctor-fixer: PHPDoc formatting rules
//!
//! This crate provides the configurable fixers that rewrite PHPDoc blocks:
//! tag alignment, tag ordering, alias renaming, superfluous-tag pruning,
//! line span conversion and friends. Every fixer parses a located docblock
//! into the structured model from `phpdoctor-docblock`, mutates it, and
//! reports the rewrite as a span-based edit.
//!
//! # Example
//!
//! ```ignore
//! use phpdoctor_fixer::fixers::{FixerRegistry, FixerConfig};
//!
//! let registry = FixerRegistry::new();
//! let fixed = registry.run(source, &[("phpdoc_align", FixerConfig::default())])?;
//! ```

pub mod config;
pub mod fixers;

pub use config::{ConfigError, ConfigValue, IndentStyle, LineEnding, WhitespaceConfig};
pub use fixers::{Fixer, FixerConfig, FixerRegistry, FixError};
