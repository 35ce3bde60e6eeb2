//! Rule option schema and validation
//!
//! Every fixer declares its options (name, type, allowed values, default).
//! A configuration map is validated against that schema before any source
//! text is touched: unknown keys, wrong value types, out-of-range enum
//! values, invalid tag names and replacement cycles are all rejected with
//! a message naming the offending key and value.

use std::collections::HashMap;

use thiserror::Error;

/// Configuration value types for fixer options
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    String(String),
    Number(i64),
    Array(Vec<String>),
    StringMap(HashMap<String, String>),
    /// List of string groups (e.g. tag groups for separation rules)
    GroupList(Vec<Vec<String>>),
}

/// Declared type of a fixer option
#[derive(Debug, Clone)]
pub enum OptionType {
    Bool,
    String,
    Number,
    StringArray,
    StringMap,
    GroupList,
    Enum(Vec<&'static str>),
}

impl OptionType {
    fn describe(&self) -> String {
        match self {
            OptionType::Bool => "bool".to_string(),
            OptionType::String => "string".to_string(),
            OptionType::Number => "number".to_string(),
            OptionType::StringArray => "list of strings".to_string(),
            OptionType::StringMap => "map of string to string".to_string(),
            OptionType::GroupList => "list of string lists".to_string(),
            OptionType::Enum(allowed) => format!("one of {}", allowed.join(", ")),
        }
    }
}

/// A configurable option of a fixer
#[derive(Debug, Clone)]
pub struct FixerOption {
    pub name: &'static str,
    pub description: &'static str,
    pub option_type: OptionType,
    pub default: Option<ConfigValue>,
}

/// Configuration validation errors. All of these are fatal and raised
/// before any file content is transformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown option `{key}` for fixer `{fixer}`")]
    UnknownOption { fixer: String, key: String },

    #[error("invalid type for option `{key}` of fixer `{fixer}`: expected {expected}")]
    InvalidType {
        fixer: String,
        key: String,
        expected: String,
    },

    #[error("invalid value `{value}` for option `{key}` of fixer `{fixer}`: expected {allowed}")]
    InvalidValue {
        fixer: String,
        key: String,
        value: String,
        allowed: String,
    },

    #[error("invalid tag name `{tag}` in option `{key}` of fixer `{fixer}`")]
    InvalidTagName {
        fixer: String,
        key: String,
        tag: String,
    },

    #[error("tag replacement cycle in option `{key}` of fixer `{fixer}`: {}", cycle.join(" -> "))]
    ReplacementCycle {
        fixer: String,
        key: String,
        cycle: Vec<String>,
    },
}

/// Validate an option map against a fixer's declared schema
pub fn validate_options(
    fixer: &str,
    schema: &[FixerOption],
    options: &HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    for (key, value) in options {
        let declared = schema.iter().find(|o| o.name == key).ok_or_else(|| {
            ConfigError::UnknownOption {
                fixer: fixer.to_string(),
                key: key.clone(),
            }
        })?;

        let matches_type = matches!(
            (&declared.option_type, value),
            (OptionType::Bool, ConfigValue::Bool(_))
                | (OptionType::String, ConfigValue::String(_))
                | (OptionType::Number, ConfigValue::Number(_))
                | (OptionType::StringArray, ConfigValue::Array(_))
                | (OptionType::StringMap, ConfigValue::StringMap(_))
                | (OptionType::GroupList, ConfigValue::GroupList(_))
                | (OptionType::Enum(_), ConfigValue::String(_))
        );
        if !matches_type {
            return Err(ConfigError::InvalidType {
                fixer: fixer.to_string(),
                key: key.clone(),
                expected: declared.option_type.describe(),
            });
        }

        if let (OptionType::Enum(allowed), ConfigValue::String(s)) = (&declared.option_type, value) {
            if !allowed.contains(&s.as_str()) {
                return Err(ConfigError::InvalidValue {
                    fixer: fixer.to_string(),
                    key: key.clone(),
                    value: s.clone(),
                    allowed: declared.option_type.describe(),
                });
            }
        }
    }
    Ok(())
}

/// Whether `tag` is a syntactically valid PHPDoc tag name
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Reject replacement maps containing a rename cycle. The error enumerates
/// the offending cycle (`a -> b -> a`).
pub fn check_replacement_cycles(
    fixer: &str,
    key: &str,
    replacements: &HashMap<String, String>,
) -> Result<(), ConfigError> {
    for start in replacements.keys() {
        let mut path = vec![start.clone()];
        let mut current = start.clone();
        while let Some(next) = replacements.get(&current) {
            if next == start {
                path.push(next.clone());
                return Err(ConfigError::ReplacementCycle {
                    fixer: fixer.to_string(),
                    key: key.to_string(),
                    cycle: path,
                });
            }
            if path.contains(next) {
                // A cycle not involving `start`; reported from its own start
                break;
            }
            path.push(next.clone());
            current = next.clone();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<FixerOption> {
        vec![
            FixerOption {
                name: "align",
                description: "alignment mode",
                option_type: OptionType::Enum(vec!["vertical", "left"]),
                default: Some(ConfigValue::String("vertical".to_string())),
            },
            FixerOption {
                name: "tags",
                description: "tags to align",
                option_type: OptionType::StringArray,
                default: None,
            },
        ]
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut options = HashMap::new();
        options.insert("nope".to_string(), ConfigValue::Bool(true));
        let err = validate_options("phpdoc_align", &schema(), &options).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownOption {
                fixer: "phpdoc_align".to_string(),
                key: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_type_rejected() {
        let mut options = HashMap::new();
        options.insert("tags".to_string(), ConfigValue::Bool(true));
        let err = validate_options("phpdoc_align", &schema(), &options).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidType { .. }));
    }

    #[test]
    fn test_enum_value_checked() {
        let mut options = HashMap::new();
        options.insert("align".to_string(), ConfigValue::String("diagonal".to_string()));
        let err = validate_options("phpdoc_align", &schema(), &options).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        options.insert("align".to_string(), ConfigValue::String("left".to_string()));
        assert!(validate_options("phpdoc_align", &schema(), &options).is_ok());
    }

    #[test]
    fn test_tag_name_validity() {
        assert!(is_valid_tag_name("param"));
        assert!(is_valid_tag_name("property-read"));
        assert!(!is_valid_tag_name("@param"));
        assert!(!is_valid_tag_name("2param"));
        assert!(!is_valid_tag_name(""));
    }

    #[test]
    fn test_two_cycle_detected() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), "b".to_string());
        map.insert("b".to_string(), "a".to_string());
        let err = check_replacement_cycles("phpdoc_no_alias_tag", "replacements", &map).unwrap_err();
        match err {
            ConfigError::ReplacementCycle { cycle, .. } => {
                assert_eq!(cycle.len(), 3);
                assert_eq!(cycle.first(), cycle.last());
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_three_cycle_detected() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), "b".to_string());
        map.insert("b".to_string(), "c".to_string());
        map.insert("c".to_string(), "a".to_string());
        assert!(check_replacement_cycles("f", "replacements", &map).is_err());
    }

    #[test]
    fn test_chain_without_cycle_allowed() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), "b".to_string());
        map.insert("b".to_string(), "c".to_string());
        assert!(check_replacement_cycles("f", "replacements", &map).is_ok());
    }
}
