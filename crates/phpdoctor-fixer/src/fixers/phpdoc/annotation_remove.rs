//! Remove configured annotations outright

use phpdoctor_core::Edit;

use super::rewrite_docblocks;
use crate::config::{ConfigValue, FixerOption, OptionType};
use crate::fixers::{Fixer, FixerConfig};

pub struct GeneralPhpdocAnnotationRemoveFixer;

impl Fixer for GeneralPhpdocAnnotationRemoveFixer {
    fn name(&self) -> &'static str { "general_phpdoc_annotation_remove" }
    fn description(&self) -> &'static str { "Remove configured annotations, continuation lines included" }
    fn priority(&self) -> i32 { 30 }

    fn options(&self) -> Vec<FixerOption> {
        vec![
            FixerOption {
                name: "annotations",
                description: "Tag names to remove",
                option_type: OptionType::StringArray,
                default: Some(ConfigValue::Array(vec![])),
            },
            FixerOption {
                name: "case_sensitive",
                description: "Match tag names case-sensitively",
                option_type: OptionType::Bool,
                default: Some(ConfigValue::Bool(true)),
            },
        ]
    }

    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit> {
        let annotations: Vec<String> = config
            .get_array("annotations")
            .map(|a| a.to_vec())
            .unwrap_or_default();
        if annotations.is_empty() {
            return Vec::new();
        }
        let case_sensitive = config.get_bool("case_sensitive").unwrap_or(true);

        rewrite_docblocks(source, config, self.name(), "Remove annotation", move |_, block| {
            let targeted = |name: &str| {
                annotations.iter().any(|a| {
                    if case_sensitive {
                        a == name
                    } else {
                        a.eq_ignore_ascii_case(name)
                    }
                })
            };

            if block.is_single_line() {
                if block.annotations().iter().any(|a| targeted(a.name())) {
                    block.set_empty();
                }
                return;
            }
            if !block.is_well_formed() {
                return;
            }

            let ranges: Vec<_> = block
                .annotations()
                .iter()
                .filter(|a| targeted(a.name()))
                .map(|a| a.line_range())
                .collect();
            for range in ranges.into_iter().rev() {
                block.remove_lines(range);
            }

            if block.is_empty_body() {
                block.set_empty();
            }
        })
    }
}
