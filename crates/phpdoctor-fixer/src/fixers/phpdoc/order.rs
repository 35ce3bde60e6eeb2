//! Order @param, @return and @throws groups

use phpdoctor_core::Edit;

use super::{reorder_annotations, rewrite_docblocks};
use crate::config::{ConfigValue, FixerOption, OptionType};
use crate::fixers::{Fixer, FixerConfig};

pub struct PhpdocOrderFixer;

impl Fixer for PhpdocOrderFixer {
    fn name(&self) -> &'static str { "phpdoc_order" }
    fn description(&self) -> &'static str { "Order @param, @return and @throws annotations by style" }
    fn priority(&self) -> i32 { 22 }

    fn options(&self) -> Vec<FixerOption> {
        vec![FixerOption {
            name: "style",
            description: "Ordering convention",
            option_type: OptionType::Enum(vec!["phpcs", "symfony"]),
            default: Some(ConfigValue::String("phpcs".to_string())),
        }]
    }

    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit> {
        let style = config.get_str("style").unwrap_or("phpcs").to_string();

        rewrite_docblocks(source, config, self.name(), "Order PHPDoc annotations", move |_, block| {
            if block.is_single_line() || !block.is_well_formed() {
                return;
            }

            let targeted: Vec<_> = block
                .annotations()
                .into_iter()
                .filter(|a| rank(a.name(), &style).is_some())
                .collect();
            if targeted.len() < 2 {
                return;
            }

            let mut order: Vec<usize> = (0..targeted.len()).collect();
            order.sort_by_key(|&i| rank(targeted[i].name(), &style));

            reorder_annotations(block, &targeted, &order);
        })
    }
}

/// Sort rank of a tag under the given style; `None` for untargeted tags
fn rank(name: &str, style: &str) -> Option<u8> {
    match (style, name) {
        (_, "param") => Some(0),
        ("phpcs", "throws") => Some(1),
        ("phpcs", "return") => Some(2),
        ("symfony", "return") => Some(1),
        ("symfony", "throws") => Some(2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixers::phpdoc::testutil::{assert_idempotent, assert_untouched, fix};

    fn symfony() -> FixerConfig {
        FixerConfig::default().with_option("style", ConfigValue::String("symfony".to_string()))
    }

    #[test]
    fn test_symfony_order() {
        let code = "<?php\n/**\n * @throws \\RuntimeException\n * @return bool\n * @param int $x\n */\nfunction f($x) {}\n";
        let fixed = fix(&PhpdocOrderFixer, code, &symfony());

        let param = fixed.find("@param").unwrap();
        let ret = fixed.find("@return").unwrap();
        let throws = fixed.find("@throws").unwrap();
        assert!(param < ret && ret < throws, "got:\n{fixed}");
    }

    #[test]
    fn test_phpcs_puts_return_last() {
        let code = "<?php\n/**\n * @return bool\n * @throws \\RuntimeException\n * @param int $x\n */\nfunction f($x) {}\n";
        let fixed = fix(&PhpdocOrderFixer, code, &FixerConfig::default());

        let param = fixed.find("@param").unwrap();
        let throws = fixed.find("@throws").unwrap();
        let ret = fixed.find("@return").unwrap();
        assert!(param < throws && throws < ret, "got:\n{fixed}");
    }

    #[test]
    fn test_continuations_move_with_their_tag() {
        let code = "<?php\n/**\n * @return array $options the resolved set,\n *                        keyed by name\n * @param array $options\n */\nfunction f($options) {}\n";
        let fixed = fix(&PhpdocOrderFixer, code, &symfony());

        let cont = fixed.find("keyed by name").unwrap();
        let ret = fixed.find("@return").unwrap();
        let param = fixed.find("@param").unwrap();
        assert!(param < ret && ret < cont, "got:\n{fixed}");
    }

    #[test]
    fn test_untargeted_parts_keep_positions() {
        let code = "<?php\n/**\n * Summary.\n *\n * @return bool\n * @author Jane\n * @param int $x\n */\nfunction f($x) {}\n";
        let fixed = fix(&PhpdocOrderFixer, code, &symfony());

        // @author stays in the middle slot it occupied
        let lines: Vec<&str> = fixed.lines().collect();
        let author_idx = lines.iter().position(|l| l.contains("@author")).unwrap();
        assert!(lines[author_idx - 1].contains("@param"));
        assert!(lines[author_idx + 1].contains("@return"));
    }

    #[test]
    fn test_already_ordered_untouched() {
        let code = "<?php\n/**\n * @param int $x\n * @return bool\n * @throws \\RuntimeException\n */\nfunction f($x) {}\n";
        assert_untouched(&PhpdocOrderFixer, code, &symfony());
    }

    #[test]
    fn test_idempotent() {
        let code = "<?php\n/**\n * @throws A\n * @return bool\n * @param int $x\n * @param string $y\n */\nfunction f($x, $y) {}\n";
        assert_idempotent(&PhpdocOrderFixer, code, &symfony());
    }
}
