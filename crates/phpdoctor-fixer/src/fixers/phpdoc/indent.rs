//! Fix docblock continuation-line indentation

use phpdoctor_core::Edit;
use phpdoctor_docblock::Line;

use super::rewrite_docblocks;
use crate::fixers::{Fixer, FixerConfig};

pub struct PhpdocIndentFixer;

impl Fixer for PhpdocIndentFixer {
    fn name(&self) -> &'static str { "phpdoc_indent" }
    fn description(&self) -> &'static str { "Indent continuation lines to the docblock's opening column" }
    fn priority(&self) -> i32 { 16 }

    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit> {
        rewrite_docblocks(source, config, self.name(), "Fix docblock indentation", |doc, block| {
            if block.is_single_line() || !doc.owns_line {
                return;
            }

            // The expected leading whitespace of every framed line: the
            // opening token's own column plus one space before the `*`.
            let frame_ws = format!("{} ", doc.indent);

            let replacements: Vec<(usize, Line)> = (1..block.lines().len())
                .filter_map(|idx| {
                    let line = &block.lines()[idx];
                    // Malformed lines without a `*` frame are left alone;
                    // everything after the asterisk (example code included)
                    // keeps its own indentation.
                    if !line.has_asterisk() {
                        return None;
                    }
                    let after = line.raw().trim_start();
                    if line.leading_ws() == frame_ws {
                        return None;
                    }
                    Some((idx, Line::from_raw(format!("{frame_ws}{after}"))))
                })
                .collect();

            for (idx, line) in replacements {
                block.splice_lines(idx..idx + 1, vec![line]);
            }
        })
    }
}
