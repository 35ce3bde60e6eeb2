//! Align PHPDoc tag columns

use phpdoctor_core::Edit;
use phpdoctor_docblock::{Annotation, DocBlock, Tag};

use super::rewrite_docblocks;
use crate::config::{ConfigValue, FixerOption, OptionType};
use crate::fixers::{Fixer, FixerConfig};

const DEFAULT_TAGS: &[&str] = &["param", "return", "throws", "type", "var"];

pub struct PhpdocAlignFixer;

impl Fixer for PhpdocAlignFixer {
    fn name(&self) -> &'static str { "phpdoc_align" }
    fn description(&self) -> &'static str { "Align PHPDoc tag type, variable and description columns" }
    fn priority(&self) -> i32 { 10 }

    fn options(&self) -> Vec<FixerOption> {
        vec![
            FixerOption {
                name: "tags",
                description: "Tags participating in alignment",
                option_type: OptionType::StringArray,
                default: Some(ConfigValue::Array(
                    DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
                )),
            },
            FixerOption {
                name: "align",
                description: "Alignment mode",
                option_type: OptionType::Enum(vec!["vertical", "left"]),
                default: Some(ConfigValue::String("vertical".to_string())),
            },
        ]
    }

    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit> {
        let tags: Vec<String> = config
            .get_array("tags")
            .map(|t| t.to_vec())
            .unwrap_or_else(|| DEFAULT_TAGS.iter().map(|t| t.to_string()).collect());
        let vertical = config.get_str("align").unwrap_or("vertical") == "vertical";

        rewrite_docblocks(source, config, self.name(), "Align PHPDoc tags", |_, block| {
            if block.is_single_line() || !block.is_well_formed() {
                return;
            }
            for run in contiguous_runs(&block.annotations(), &tags) {
                align_run(block, &run, vertical);
            }
        })
    }
}

/// Split the annotation list into runs of adjacent targeted tags
fn contiguous_runs(annotations: &[Annotation], tags: &[String]) -> Vec<Vec<Annotation>> {
    let mut runs: Vec<Vec<Annotation>> = Vec::new();

    for ann in annotations {
        if !tags.iter().any(|t| t == ann.name()) {
            continue;
        }
        match runs.last_mut() {
            Some(run) if run.last().map(|a| a.end + 1) == Some(ann.start) => {
                run.push(ann.clone());
            }
            _ => runs.push(vec![ann.clone()]),
        }
    }

    runs
}

fn align_run(block: &mut DocBlock, run: &[Annotation], vertical: bool) {
    let parsed: Vec<Option<Tag>> = run.iter().map(|a| a.parse()).collect();

    let max_name = parsed
        .iter()
        .flatten()
        .map(|t| char_width(&t.name) + 1)
        .max()
        .unwrap_or(0);
    let max_ty = parsed
        .iter()
        .flatten()
        .filter_map(|t| t.ty.as_deref().map(char_width))
        .max()
        .unwrap_or(0);
    let max_var = parsed
        .iter()
        .flatten()
        .filter_map(|t| t.variable.as_deref().map(char_width))
        .max()
        .unwrap_or(0);

    // Description column relative to the content start
    let mut desc_col = max_name + 1;
    if max_ty > 0 {
        desc_col += max_ty + 1;
    }
    if max_var > 0 {
        desc_col += max_var + 1;
    }

    for (ann, tag) in run.iter().zip(parsed.iter()) {
        let tag = match tag {
            Some(t) => t,
            None => continue,
        };

        let first = if vertical {
            render_vertical(tag, max_name, max_ty, max_var)
        } else {
            render_left(tag)
        };
        block.set_content(ann.start, first.trim_end());

        // Continuation lines move to the description column; annotations
        // opening a nested inline block keep their structure as written.
        if vertical && !tag.description.ends_with('{') {
            for idx in ann.start + 1..ann.end + 1 {
                let content = block.content_of(idx).trim().to_string();
                if content.is_empty() {
                    continue;
                }
                block.set_content(idx, &format!("{}{}", " ".repeat(desc_col), content));
            }
        }
    }
}

fn render_vertical(tag: &Tag, max_name: usize, max_ty: usize, max_var: usize) -> String {
    let mut out = format!("@{}", tag.name);
    pad_to(&mut out, max_name);

    if max_ty > 0 {
        out.push(' ');
        let col = char_width(&out);
        out.push_str(tag.ty.as_deref().unwrap_or(""));
        pad_to(&mut out, col + max_ty);
    }
    if max_var > 0 {
        out.push(' ');
        let col = char_width(&out);
        out.push_str(tag.variable.as_deref().unwrap_or(""));
        pad_to(&mut out, col + max_var);
    }
    if !tag.description.is_empty() {
        out.push(' ');
        out.push_str(&tag.description);
    }
    out
}

fn render_left(tag: &Tag) -> String {
    let mut parts = vec![format!("@{}", tag.name)];
    if let Some(ty) = &tag.ty {
        parts.push(ty.clone());
    }
    if let Some(var) = &tag.variable {
        parts.push(var.clone());
    }
    if !tag.description.is_empty() {
        parts.push(tag.description.clone());
    }
    parts.join(" ")
}

/// Column widths are measured in characters; type and variable text may
/// hold multi-byte names
fn char_width(s: &str) -> usize {
    s.chars().count()
}

fn pad_to(s: &mut String, width: usize) {
    let mut len = char_width(s);
    while len < width {
        s.push(' ');
        len += 1;
    }
}
