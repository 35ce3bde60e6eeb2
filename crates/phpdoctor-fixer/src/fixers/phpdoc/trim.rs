//! Trim blank edges and trailing whitespace inside docblocks

use phpdoctor_core::Edit;

use super::rewrite_docblocks;
use crate::fixers::{Fixer, FixerConfig};

pub struct PhpdocTrimFixer;

impl Fixer for PhpdocTrimFixer {
    fn name(&self) -> &'static str { "phpdoc_trim" }
    fn description(&self) -> &'static str { "Remove blank lines at the body edges and trailing whitespace" }
    fn priority(&self) -> i32 { 14 }

    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit> {
        rewrite_docblocks(source, config, self.name(), "Trim docblock", |_, block| {
            if block.is_single_line() || !block.is_well_formed() {
                return;
            }

            for idx in block.body_range() {
                let content = block.content_of(idx).trim_end().to_string();
                block.set_content(idx, &content);
            }

            let mut range = block.body_range();
            while range.len() > 1 && block.lines()[range.end - 1].is_blank() {
                block.remove_lines(range.end - 1..range.end);
                range = block.body_range();
            }
            while range.len() > 1 && block.lines()[range.start].is_blank() {
                block.remove_lines(range.start..range.start + 1);
                range = block.body_range();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixers::phpdoc::testutil::{assert_idempotent, assert_untouched, fix};

    #[test]
    fn test_strips_edge_blank_lines() {
        let code = "<?php\n/**\n *\n * Summary.\n *\n * @return void\n *\n *\n */\nfunction f() {}\n";
        let fixed = fix(&PhpdocTrimFixer, code, &FixerConfig::default());
        assert!(fixed.contains("/**\n * Summary.\n *\n * @return void\n */"), "got:\n{fixed}");
    }

    #[test]
    fn test_strips_trailing_whitespace() {
        let code = "<?php\n/**\n * Summary.   \n * @return void\t\n */\nfunction f() {}\n";
        let fixed = fix(&PhpdocTrimFixer, code, &FixerConfig::default());
        assert!(fixed.contains(" * Summary.\n"));
        assert!(fixed.contains(" * @return void\n"));
    }

    #[test]
    fn test_clean_docblock_untouched() {
        let code = "<?php\n/**\n * Summary.\n *\n * @return void\n */\nfunction f() {}\n";
        assert_untouched(&PhpdocTrimFixer, code, &FixerConfig::default());
    }

    #[test]
    fn test_all_blank_body_keeps_one_line() {
        let code = "<?php\n/**\n *\n *\n */\nclass A {}\n";
        let fixed = fix(&PhpdocTrimFixer, code, &FixerConfig::default());
        assert!(fixed.contains("/**\n *\n */"), "got:\n{fixed}");
    }

    #[test]
    fn test_idempotent() {
        let code = "<?php\n/**\n *\n * Text.  \n *\n */\nclass A {}\n";
        assert_idempotent(&PhpdocTrimFixer, code, &FixerConfig::default());
    }

    #[test]
    fn test_configured_line_ending_applies_to_rewritten_blocks() {
        let config = FixerConfig {
            line_ending: Some(crate::config::LineEnding::CrLf),
            ..FixerConfig::default()
        };

        let code = "<?php\n/**\n *\n * Summary.\n */\nclass A {}\n";
        let fixed = fix(&PhpdocTrimFixer, code, &config);
        assert!(fixed.contains("/**\r\n * Summary.\r\n */"), "got:\n{fixed:?}");

        let clean = "<?php\n/**\n * Summary.\n */\nclass A {}\n";
        assert_untouched(&PhpdocTrimFixer, clean, &config);
    }
}
