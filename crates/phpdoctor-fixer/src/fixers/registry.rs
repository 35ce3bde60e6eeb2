//! Fixer registry
//!
//! The registry collects the rule catalog, provides lookup by name, and
//! runs a configured set of rules over one source text. Every requested
//! configuration is validated before any rule touches the source.

use std::collections::HashMap;
use std::sync::Arc;

use phpdoctor_core::{apply_edits, EditError};
use thiserror::Error;

use super::phpdoc::{
    GeneralPhpdocAnnotationRemoveFixer, PhpdocAlignFixer, PhpdocIndentFixer, PhpdocLineSpanFixer,
    PhpdocNoAliasTagFixer, PhpdocOrderFixer, PhpdocParamOrderFixer, PhpdocSeparationFixer,
    PhpdocTrimFixer,
};
use super::types::NoSuperfluousPhpdocTagsFixer;
use super::{Fixer, FixerConfig};
use crate::config::ConfigError;

/// Errors from a fixer run
#[derive(Error, Debug)]
pub enum FixError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("unknown fixer `{0}`")]
    UnknownFixer(String),
}

/// Information about a registered fixer
#[derive(Clone)]
pub struct FixerInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub priority: i32,
}

/// Registry of all available fixers
pub struct FixerRegistry {
    fixers: Vec<Arc<dyn Fixer>>,
    by_name: HashMap<&'static str, usize>,
}

impl FixerRegistry {
    /// Create a new registry with all built-in fixers
    pub fn new() -> Self {
        let mut registry = Self {
            fixers: Vec::new(),
            by_name: HashMap::new(),
        };

        registry.register(Arc::new(GeneralPhpdocAnnotationRemoveFixer));
        registry.register(Arc::new(PhpdocNoAliasTagFixer));
        registry.register(Arc::new(NoSuperfluousPhpdocTagsFixer));
        registry.register(Arc::new(PhpdocOrderFixer));
        registry.register(Arc::new(PhpdocParamOrderFixer));
        registry.register(Arc::new(PhpdocSeparationFixer));
        registry.register(Arc::new(PhpdocIndentFixer));
        registry.register(Arc::new(PhpdocTrimFixer));
        registry.register(Arc::new(PhpdocLineSpanFixer));
        registry.register(Arc::new(PhpdocAlignFixer));

        // Higher priority runs first
        registry.fixers.sort_by(|a, b| b.priority().cmp(&a.priority()));
        registry.by_name.clear();
        for (idx, fixer) in registry.fixers.iter().enumerate() {
            registry.by_name.insert(fixer.name(), idx);
        }

        registry
    }

    fn register(&mut self, fixer: Arc<dyn Fixer>) {
        let idx = self.fixers.len();
        self.by_name.insert(fixer.name(), idx);
        self.fixers.push(fixer);
    }

    /// Get a fixer by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Fixer>> {
        self.by_name.get(name).map(|&idx| &self.fixers[idx])
    }

    /// All fixers in priority order
    pub fn all(&self) -> &[Arc<dyn Fixer>] {
        &self.fixers
    }

    /// Information about all fixers
    pub fn list(&self) -> Vec<FixerInfo> {
        self.fixers
            .iter()
            .map(|f| FixerInfo {
                name: f.name(),
                description: f.description(),
                priority: f.priority(),
            })
            .collect()
    }

    /// Run the named rules over `source` and return the fixed text.
    ///
    /// All configurations are validated up front; a configuration error
    /// aborts the run before any text is transformed. Rules then run
    /// sequentially in priority order, each seeing the previous rule's
    /// output.
    pub fn run(&self, source: &str, rules: &[(&str, FixerConfig)]) -> Result<String, FixError> {
        let mut selected: Vec<(&Arc<dyn Fixer>, &FixerConfig)> = Vec::with_capacity(rules.len());
        for (name, config) in rules {
            let fixer = self
                .get(name)
                .ok_or_else(|| FixError::UnknownFixer(name.to_string()))?;
            fixer.validate_config(config)?;
            selected.push((fixer, config));
        }
        selected.sort_by(|a, b| b.0.priority().cmp(&a.0.priority()));

        let mut current = source.to_string();
        for (fixer, config) in selected {
            let edits = fixer.check(&current, config);
            if !edits.is_empty() {
                current = apply_edits(&current, &edits)?;
            }
        }
        Ok(current)
    }

    pub fn len(&self) -> usize {
        self.fixers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixers.is_empty()
    }
}

impl Default for FixerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValue;

    #[test]
    fn test_registry_has_catalog() {
        let registry = FixerRegistry::new();
        assert_eq!(registry.len(), 10);
        assert!(registry.get("phpdoc_align").is_some());
        assert!(registry.get("no_superfluous_phpdoc_tags").is_some());
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_priority_order() {
        let registry = FixerRegistry::new();
        for window in registry.all().windows(2) {
            assert!(
                window[0].priority() >= window[1].priority(),
                "{} should come before {}",
                window[0].name(),
                window[1].name()
            );
        }
    }

    #[test]
    fn test_run_applies_rules() {
        let registry = FixerRegistry::new();
        let source = "<?php\n/** @type string Hello! */\n$x = 'hi';\n";
        let fixed = registry
            .run(source, &[("phpdoc_no_alias_tag", FixerConfig::default())])
            .unwrap();
        assert!(fixed.contains("/** @var string Hello! */"));
    }

    #[test]
    fn test_unknown_fixer_rejected() {
        let registry = FixerRegistry::new();
        let err = registry
            .run("<?php\n", &[("does_not_exist", FixerConfig::default())])
            .unwrap_err();
        assert!(matches!(err, FixError::UnknownFixer(_)));
    }

    #[test]
    fn test_config_validated_before_any_rewrite() {
        let registry = FixerRegistry::new();
        let source = "<?php\n/**\n *\n * Trim me.\n */\nclass A {}\n";

        // The trim rule alone would rewrite, but the bad align config
        // must abort the whole run first.
        let bad = FixerConfig::default().with_option("align", ConfigValue::String("diagonal".to_string()));
        let err = registry
            .run(source, &[("phpdoc_trim", FixerConfig::default()), ("phpdoc_align", bad)])
            .unwrap_err();
        assert!(matches!(err, FixError::Config(_)));
    }

    #[test]
    fn test_list() {
        let registry = FixerRegistry::new();
        for info in registry.list() {
            assert!(!info.name.is_empty());
            assert!(!info.description.is_empty());
        }
    }
}
