//! Order @param tags by the signature's parameter order

use phpdoctor_core::{tokenize, Edit};
use phpdoctor_docblock::{context, find_doc_comments, Annotation, DocBlock, ElementKind};

use super::{doc_indent, newline_override, reorder_annotations};
use crate::config::{ConfigValue, FixerOption, OptionType};
use crate::fixers::{edit_with_rule, Fixer, FixerConfig};

pub struct PhpdocParamOrderFixer;

impl Fixer for PhpdocParamOrderFixer {
    fn name(&self) -> &'static str { "phpdoc_param_order" }
    fn description(&self) -> &'static str { "Order @param annotations to match the declared parameter order" }
    fn priority(&self) -> i32 { 21 }

    fn options(&self) -> Vec<FixerOption> {
        vec![FixerOption {
            name: "param_aliases",
            description: "Alias tags reordered together with @param (e.g. psalm-param)",
            option_type: OptionType::StringArray,
            default: Some(ConfigValue::Array(vec![])),
        }]
    }

    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit> {
        let aliases: Vec<String> = config
            .get_array("param_aliases")
            .map(|a| a.to_vec())
            .unwrap_or_default();

        let tokens = tokenize(source);
        let mut edits = Vec::new();

        for doc in find_doc_comments(source, &tokens) {
            if doc.element != ElementKind::Function {
                continue;
            }

            let indent = doc_indent(&doc, config);
            let mut block = DocBlock::parse_with_newline(&doc.text, &indent, doc.newline);
            if block.is_single_line() || !block.is_well_formed() {
                continue;
            }

            let targeted: Vec<Annotation> = block
                .annotations()
                .into_iter()
                .filter(|a| a.name() == "param" || aliases.iter().any(|al| al == a.name()))
                .collect();
            if targeted.len() < 2 {
                continue;
            }

            let ctx = context::extract(&tokens, doc.token_index);
            let order = signature_order(&targeted, &ctx.params.iter().map(|p| p.name.clone()).collect::<Vec<_>>());
            reorder_annotations(&mut block, &targeted, &order);

            if block.render() == doc.text {
                continue;
            }
            if let Some(newline) = newline_override(config) {
                block.set_newline(newline);
            }
            edits.push(edit_with_rule(
                doc.offset,
                doc.offset + doc.text.len(),
                block.render(),
                "Order @param annotations by signature".to_string(),
                self.name(),
            ));
        }

        edits
    }
}

/// Permutation of the targeted annotations: signature order first, with
/// alias tags grouped right after their parameter's primary tag, then
/// superfluous tags in their original relative order.
fn signature_order(targeted: &[Annotation], params: &[String]) -> Vec<usize> {
    let var_of = |a: &Annotation| a.parse().and_then(|t| t.variable_name().map(str::to_string));

    let mut order = Vec::with_capacity(targeted.len());
    for param in params {
        for (i, ann) in targeted.iter().enumerate() {
            if ann.name() == "param" && var_of(ann).as_deref() == Some(param) {
                order.push(i);
            }
        }
        for (i, ann) in targeted.iter().enumerate() {
            if ann.name() != "param" && var_of(ann).as_deref() == Some(param) {
                order.push(i);
            }
        }
    }

    // Tags documenting no declared parameter go to the end, original order
    for (i, ann) in targeted.iter().enumerate() {
        let superfluous = match var_of(ann) {
            Some(name) => !params.contains(&name),
            None => true,
        };
        if superfluous {
            order.push(i);
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixers::phpdoc::testutil::{assert_idempotent, assert_untouched, fix};

    #[test]
    fn test_reorders_to_signature() {
        let code = "<?php\n/**\n * @param string $b\n * @param int $a\n */\nfunction f(int $a, string $b) {}\n";
        let fixed = fix(&PhpdocParamOrderFixer, code, &FixerConfig::default());
        assert!(fixed.find("$a").unwrap() < fixed.find("$b").unwrap(), "got:\n{fixed}");
    }

    #[test]
    fn test_superfluous_params_move_to_end() {
        let code = "<?php\n/**\n * @param bool $gone\n * @param string $b\n * @param mixed $also\n * @param int $a\n */\nfunction f(int $a, string $b) {}\n";
        let fixed = fix(&PhpdocParamOrderFixer, code, &FixerConfig::default());

        let pos = |needle: &str| fixed.find(needle).unwrap();
        assert!(pos("$a") < pos("$b"));
        assert!(pos("$b") < pos("$gone"));
        assert!(pos("$gone") < pos("$also"), "original relative order kept, got:\n{fixed}");
    }

    #[test]
    fn test_aliases_group_with_primary() {
        let code = "<?php\n/**\n * @psalm-param non-empty-string $b\n * @param string $b\n * @param int $a\n */\nfunction f(int $a, string $b) {}\n";
        let config = FixerConfig::default().with_option(
            "param_aliases",
            ConfigValue::Array(vec!["psalm-param".to_string()]),
        );
        let fixed = fix(&PhpdocParamOrderFixer, code, &config);

        let lines: Vec<&str> = fixed.lines().collect();
        let primary = lines.iter().position(|l| l.contains("@param string $b")).unwrap();
        assert!(lines[primary - 1].contains("@param int $a"), "got:\n{fixed}");
        assert!(lines[primary + 1].contains("@psalm-param"), "got:\n{fixed}");
    }

    #[test]
    fn test_matching_order_untouched() {
        let code = "<?php\n/**\n * @param int $a\n * @param string $b\n */\nfunction f(int $a, string $b) {}\n";
        assert_untouched(&PhpdocParamOrderFixer, code, &FixerConfig::default());
    }

    #[test]
    fn test_non_function_docblock_skipped() {
        let code = "<?php\nclass A {\n    /**\n     * @param string $b\n     * @param int $a\n     */\n    private $x;\n}\n";
        assert_untouched(&PhpdocParamOrderFixer, code, &FixerConfig::default());
    }

    #[test]
    fn test_idempotent() {
        let code = "<?php\n/**\n * @param string $b stays\n *     with its tag\n * @param bool $gone\n * @param int $a\n */\nfunction f(int $a, string $b) {}\n";
        assert_idempotent(&PhpdocParamOrderFixer, code, &FixerConfig::default());
    }
}
