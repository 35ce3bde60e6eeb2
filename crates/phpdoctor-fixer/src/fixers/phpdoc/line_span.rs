//! Convert docblocks between single-line and multi-line form

use phpdoctor_core::Edit;
use phpdoctor_docblock::ElementKind;

use super::rewrite_docblocks;
use crate::config::{ConfigValue, FixerOption, OptionType};
use crate::fixers::{Fixer, FixerConfig};

pub struct PhpdocLineSpanFixer;

impl Fixer for PhpdocLineSpanFixer {
    fn name(&self) -> &'static str { "phpdoc_line_span" }
    fn description(&self) -> &'static str { "Enforce single-line or multi-line docblocks per element kind" }
    fn priority(&self) -> i32 { 12 }

    fn options(&self) -> Vec<FixerOption> {
        let span = |name, description| FixerOption {
            name,
            description,
            option_type: OptionType::Enum(vec!["single", "multi"]),
            default: Some(ConfigValue::String("multi".to_string())),
        };
        vec![
            span("property", "Line span for property docblocks"),
            span("const", "Line span for constant docblocks"),
            span("method", "Line span for method docblocks"),
        ]
    }

    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit> {
        let property = config.get_str("property").unwrap_or("multi").to_string();
        let constant = config.get_str("const").unwrap_or("multi").to_string();
        let method = config.get_str("method").unwrap_or("multi").to_string();

        rewrite_docblocks(source, config, self.name(), "Convert docblock line span", move |doc, block| {
            let want = match doc.element {
                ElementKind::Property => &property,
                ElementKind::Constant => &constant,
                ElementKind::Function => &method,
                _ => return,
            };
            if !block.is_well_formed() {
                return;
            }

            if want == "multi" && block.is_single_line() {
                block.expand();
            } else if want == "single" && !block.is_single_line() {
                // Refused when the body holds more than one semantic line
                block.try_collapse();
            }
        })
    }
}
