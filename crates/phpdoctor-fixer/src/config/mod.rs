//! Fixer configuration
//!
//! Whitespace settings (indent unit, line ending) are shared by all
//! fixers; rule-specific options are free-form values validated against
//! each fixer's declared option schema before anything runs.

mod options;
mod whitespace;

pub use options::{
    check_replacement_cycles, is_valid_tag_name, validate_options, ConfigError, ConfigValue,
    FixerOption, OptionType,
};
pub use whitespace::{IndentStyle, LineEnding, WhitespaceConfig};
