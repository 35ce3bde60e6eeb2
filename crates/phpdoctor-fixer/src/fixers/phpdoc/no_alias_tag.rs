//! Replace PHPDoc alias tags with their canonical forms

use std::collections::HashMap;

use phpdoctor_core::Edit;
use phpdoctor_docblock::Line;

use super::rewrite_docblocks;
use crate::config::{
    check_replacement_cycles, is_valid_tag_name, ConfigError, ConfigValue, FixerOption, OptionType,
};
use crate::fixers::{Fixer, FixerConfig};

pub struct PhpdocNoAliasTagFixer;

fn default_replacements() -> HashMap<String, String> {
    [
        ("type", "var"),
        ("link", "see"),
        ("property-read", "property"),
        ("property-write", "property"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect()
}

impl Fixer for PhpdocNoAliasTagFixer {
    fn name(&self) -> &'static str { "phpdoc_no_alias_tag" }
    fn description(&self) -> &'static str { "Rename alias tags to their canonical names" }
    fn priority(&self) -> i32 { 28 }

    fn options(&self) -> Vec<FixerOption> {
        vec![FixerOption {
            name: "replacements",
            description: "Tag to replace mapped to its replacement",
            option_type: OptionType::StringMap,
            default: Some(ConfigValue::StringMap(default_replacements())),
        }]
    }

    fn validate_config(&self, config: &FixerConfig) -> Result<(), ConfigError> {
        crate::config::validate_options(self.name(), &self.options(), &config.options)?;

        if let Some(replacements) = config.get_map("replacements") {
            for (from, to) in replacements {
                for tag in [from, to] {
                    if !is_valid_tag_name(tag) {
                        return Err(ConfigError::InvalidTagName {
                            fixer: self.name().to_string(),
                            key: "replacements".to_string(),
                            tag: tag.clone(),
                        });
                    }
                }
            }
            check_replacement_cycles(self.name(), "replacements", replacements)?;
        }
        Ok(())
    }

    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit> {
        let replacements = config
            .get_map("replacements")
            .cloned()
            .unwrap_or_else(default_replacements);

        rewrite_docblocks(source, config, self.name(), "Rename alias tags", move |_, block| {
            let renames: Vec<(usize, String)> = block
                .annotations()
                .iter()
                .filter_map(|ann| {
                    let to = replacements.get(ann.name())?;
                    Some((ann.start, rename_first_line(ann.first_line(), ann.name(), to)))
                })
                .collect();
            if renames.is_empty() {
                return;
            }

            if block.is_single_line() {
                // At most one annotation in the single-line form
                if let Some((_, content)) = renames.first() {
                    block.splice_lines(0..1, vec![Line::from_raw(format!("/** {} */", content))]);
                }
                return;
            }
            for (idx, content) in renames {
                block.set_content(idx, &content);
            }
        })
    }
}

/// Swap the tag name in a first line, keeping the inline-brace form and
/// everything after the name untouched.
fn rename_first_line(line: &str, from: &str, to: &str) -> String {
    let (prefix, rest) = if let Some(rest) = line.strip_prefix("{@") {
        ("{@", rest)
    } else if let Some(rest) = line.strip_prefix('@') {
        ("@", rest)
    } else {
        return line.to_string();
    };

    match rest.strip_prefix(from) {
        Some(tail) => format!("{prefix}{to}{tail}"),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixers::phpdoc::testutil::{assert_untouched, fix};

    #[test]
    fn test_default_replacements() {
        let code = "<?php\n/**\n * @type int $x\n * @link https://example.org\n * @property-read string $name\n */\nclass A {}\n";
        let fixed = fix(&PhpdocNoAliasTagFixer, code, &FixerConfig::default());

        assert!(fixed.contains("@var int $x"));
        assert!(fixed.contains("@see https://example.org"));
        assert!(fixed.contains("@property string $name"));
        assert!(!fixed.contains("@type"));
    }

    #[test]
    fn test_single_line_type_to_var() {
        let code = "<?php\n/** @type string Hello! */\n$x = 'hi';\n";
        let fixed = fix(&PhpdocNoAliasTagFixer, code, &FixerConfig::default());
        assert!(fixed.contains("/** @var string Hello! */"), "got:\n{fixed}");
    }

    #[test]
    fn test_inverse_configured_direction() {
        let code = "<?php\n/** @var string Hello! */\n$x = 'hi';\n";
        let mut replacements = HashMap::new();
        replacements.insert("var".to_string(), "type".to_string());
        let config = FixerConfig::default()
            .with_option("replacements", ConfigValue::StringMap(replacements));

        let fixed = fix(&PhpdocNoAliasTagFixer, code, &config);
        assert!(fixed.contains("/** @type string Hello! */"));
    }

    #[test]
    fn test_rejects_rename_cycle() {
        let mut replacements = HashMap::new();
        replacements.insert("a".to_string(), "b".to_string());
        replacements.insert("b".to_string(), "a".to_string());
        let config = FixerConfig::default()
            .with_option("replacements", ConfigValue::StringMap(replacements));

        let err = PhpdocNoAliasTagFixer.validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ReplacementCycle { .. }));
    }

    #[test]
    fn test_rejects_invalid_tag_name() {
        let mut replacements = HashMap::new();
        replacements.insert("type".to_string(), "@var".to_string());
        let config = FixerConfig::default()
            .with_option("replacements", ConfigValue::StringMap(replacements));

        let err = PhpdocNoAliasTagFixer.validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTagName { .. }));
    }

    #[test]
    fn test_prefix_collision_is_exact() {
        // `property-read` must not rewrite a plain `property` tag
        let code = "<?php\n/**\n * @property string $name\n */\nclass A {}\n";
        assert_untouched(&PhpdocNoAliasTagFixer, code, &FixerConfig::default());
    }

    #[test]
    fn test_ordinary_comments_untouched() {
        let code = "<?php\n// @type int $x\n/* @type int $y */\n";
        assert_untouched(&PhpdocNoAliasTagFixer, code, &FixerConfig::default());
    }
}
