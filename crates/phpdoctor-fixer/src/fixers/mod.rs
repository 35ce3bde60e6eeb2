//! Fixer implementations for PHPDoc rewriting
//!
//! Each fixer inspects the source, parses the docblocks it cares about
//! into the structured model, and reports rewrites as span-based edits.
//! Fixers never touch code outside `/** ... */` comments.

mod registry;
pub mod phpdoc;
pub mod types;

pub use registry::{FixError, FixerInfo, FixerRegistry};

use std::collections::HashMap;

use phpdoctor_core::Edit;

use crate::config::{
    validate_options, ConfigError, ConfigValue, FixerOption, IndentStyle, LineEnding,
    WhitespaceConfig,
};

/// Configuration passed to fixers
#[derive(Debug, Clone, Default)]
pub struct FixerConfig {
    /// Indent unit for synthesized docblock lines; the comment's own
    /// indentation is used when unset
    pub indent: Option<IndentStyle>,
    /// Line ending for rewritten docblocks; detected from the document
    /// when unset
    pub line_ending: Option<LineEnding>,
    /// Rule-specific options
    pub options: HashMap<String, ConfigValue>,
}

impl From<&WhitespaceConfig> for FixerConfig {
    fn from(ws: &WhitespaceConfig) -> Self {
        Self {
            indent: Some(ws.indent),
            line_ending: Some(ws.line_ending),
            options: HashMap::new(),
        }
    }
}

impl FixerConfig {
    pub fn with_option(mut self, key: &str, value: ConfigValue) -> Self {
        self.options.insert(key.to_string(), value);
        self
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.options.get(key) {
            Some(ConfigValue::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.options.get(key) {
            Some(ConfigValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn get_array(&self, key: &str) -> Option<&[String]> {
        match self.options.get(key) {
            Some(ConfigValue::Array(items)) => Some(items),
            _ => None,
        }
    }

    pub fn get_map(&self, key: &str) -> Option<&HashMap<String, String>> {
        match self.options.get(key) {
            Some(ConfigValue::StringMap(map)) => Some(map),
            _ => None,
        }
    }

    pub fn get_groups(&self, key: &str) -> Option<&[Vec<String>]> {
        match self.options.get(key) {
            Some(ConfigValue::GroupList(groups)) => Some(groups),
            _ => None,
        }
    }
}

/// A PHPDoc rewriting rule
pub trait Fixer: Send + Sync {
    /// Rule name, matching the PHP-CS-Fixer rule it mirrors
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Execution priority (higher = runs first)
    fn priority(&self) -> i32;

    /// Get configurable options for this fixer
    fn options(&self) -> Vec<FixerOption> {
        vec![]
    }

    /// Validate a configuration against this fixer's option schema.
    ///
    /// Runs before `check`; a failure here aborts the whole run without
    /// touching any source text. Fixers with extra constraints (tag name
    /// syntax, replacement cycles) override this and call the base check
    /// first.
    fn validate_config(&self, config: &FixerConfig) -> Result<(), ConfigError> {
        validate_options(self.name(), &self.options(), &config.options)
    }

    /// Check the source and return edits to apply
    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit>;
}

/// Create an Edit with a rule name
pub fn edit_with_rule(
    start: usize,
    end: usize,
    replacement: String,
    message: String,
    rule: &str,
) -> Edit {
    use mago_database::file::FileId;
    use mago_span::{Position, Span};

    let span = Span::new(
        FileId::zero(),
        Position::new(start as u32),
        Position::new(end as u32),
    );

    Edit {
        span,
        replacement,
        message,
        rule: Some(rule.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_option_getters() {
        let config = FixerConfig::default()
            .with_option("flag", ConfigValue::Bool(true))
            .with_option("mode", ConfigValue::String("left".to_string()))
            .with_option(
                "tags",
                ConfigValue::Array(vec!["param".to_string(), "return".to_string()]),
            );

        assert_eq!(config.get_bool("flag"), Some(true));
        assert_eq!(config.get_str("mode"), Some("left"));
        assert_eq!(config.get_array("tags").map(|t| t.len()), Some(2));
        assert_eq!(config.get_bool("mode"), None);
        assert_eq!(config.get_str("missing"), None);
    }

    #[test]
    fn test_edit_with_rule_offsets() {
        let edit = edit_with_rule(5, 10, "x".to_string(), "msg".to_string(), "phpdoc_trim");
        assert_eq!(edit.start_offset(), 5);
        assert_eq!(edit.end_offset(), 10);
        assert_eq!(edit.rule.as_deref(), Some("phpdoc_trim"));
    }
}
