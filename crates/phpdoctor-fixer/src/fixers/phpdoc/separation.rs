//! Separate annotation groups with blank lines

use phpdoctor_core::Edit;
use phpdoctor_docblock::Line;

use super::rewrite_docblocks;
use crate::config::{ConfigValue, FixerOption, OptionType};
use crate::fixers::{Fixer, FixerConfig};

pub struct PhpdocSeparationFixer;

fn default_groups() -> Vec<Vec<String>> {
    [
        &["deprecated", "internal", "covers"][..],
        &["category", "package", "subpackage"][..],
        &["property", "property-read", "property-write"][..],
    ]
    .iter()
    .map(|g| g.iter().map(|t| t.to_string()).collect())
    .collect()
}

impl Fixer for PhpdocSeparationFixer {
    fn name(&self) -> &'static str { "phpdoc_separation" }
    fn description(&self) -> &'static str { "Keep same-group annotations together, separate groups with one blank line" }
    fn priority(&self) -> i32 { 18 }

    fn options(&self) -> Vec<FixerOption> {
        vec![FixerOption {
            name: "groups",
            description: "Tag groups kept adjacent without separation",
            option_type: OptionType::GroupList,
            default: Some(ConfigValue::GroupList(default_groups())),
        }]
    }

    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit> {
        let groups: Vec<Vec<String>> = config
            .get_groups("groups")
            .map(|g| g.to_vec())
            .unwrap_or_else(default_groups);

        rewrite_docblocks(source, config, self.name(), "Separate annotation groups", move |_, block| {
            if block.is_single_line() || !block.is_well_formed() {
                return;
            }
            let annotations = block.annotations();
            if annotations.is_empty() {
                return;
            }

            let body = block.body_range();
            let first_tag = annotations[0].start;
            let last_tag_end = annotations.last().map(|a| a.end).unwrap_or(first_tag);

            // Free text sitting between annotations belongs to no tag; a
            // rebuild would lose it, so such docblocks are left alone.
            for idx in first_tag..=last_tag_end {
                let covered = annotations.iter().any(|a| a.line_range().contains(&idx));
                if !covered && !block.lines()[idx].is_blank() {
                    return;
                }
            }

            let mut rebuilt: Vec<Line> = Vec::new();

            // Free text before the first tag, trailing blanks dropped
            let mut head: Vec<Line> = block.lines()[body.start..first_tag].to_vec();
            while head.last().is_some_and(Line::is_blank) {
                head.pop();
            }
            let head_present = !head.is_empty();
            rebuilt.extend(head);
            if head_present {
                rebuilt.push(block.make_line(""));
            }

            for (i, ann) in annotations.iter().enumerate() {
                if i > 0 && !same_group(annotations[i - 1].name(), ann.name(), &groups) {
                    rebuilt.push(block.make_line(""));
                }
                rebuilt.extend(block.lines()[ann.line_range()].to_vec());
            }

            // Trailing free text keeps its blank separator
            let mut tail: Vec<Line> = block.lines()[last_tag_end + 1..body.end].to_vec();
            while tail.first().is_some_and(Line::is_blank) {
                tail.remove(0);
            }
            if !tail.is_empty() {
                rebuilt.push(block.make_line(""));
                rebuilt.extend(tail);
            }

            block.splice_lines(body, rebuilt);
        })
    }
}

/// Two tags are in the same group when they share a configured group or
/// have the same name
fn same_group(a: &str, b: &str, groups: &[Vec<String>]) -> bool {
    if a == b {
        return true;
    }
    groups
        .iter()
        .any(|g| g.iter().any(|t| t == a) && g.iter().any(|t| t == b))
}
