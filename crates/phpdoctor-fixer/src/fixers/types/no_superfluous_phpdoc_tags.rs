//! Remove tags that repeat the native type declaration

use phpdoctor_core::{tokenize, Edit};
use phpdoctor_docblock::{
    context, find_doc_comments, typeexpr, Annotation, DocBlock, ElementKind, TypeContext,
};

use crate::config::{ConfigValue, FixerOption, OptionType};
use crate::fixers::phpdoc::{doc_indent, newline_override};
use crate::fixers::{edit_with_rule, Fixer, FixerConfig};

pub struct NoSuperfluousPhpdocTagsFixer;

impl Fixer for NoSuperfluousPhpdocTagsFixer {
    fn name(&self) -> &'static str { "no_superfluous_phpdoc_tags" }
    fn description(&self) -> &'static str { "Remove @param, @return and @var tags whose type repeats the declaration" }
    fn priority(&self) -> i32 { 26 }

    fn options(&self) -> Vec<FixerOption> {
        vec![
            FixerOption {
                name: "allow_mixed",
                description: "Keep `mixed` annotations that have no native counterpart",
                option_type: OptionType::Bool,
                default: Some(ConfigValue::Bool(false)),
            },
            FixerOption {
                name: "remove_inheritdoc",
                description: "Remove @inheritDoc tags that share the docblock with nothing else",
                option_type: OptionType::Bool,
                default: Some(ConfigValue::Bool(false)),
            },
        ]
    }

    fn check(&self, source: &str, config: &FixerConfig) -> Vec<Edit> {
        let allow_mixed = config.get_bool("allow_mixed").unwrap_or(false);
        let remove_inheritdoc = config.get_bool("remove_inheritdoc").unwrap_or(false);

        let tokens = tokenize(source);
        let mut edits = Vec::new();

        for doc in find_doc_comments(source, &tokens) {
            let indent = doc_indent(&doc, config);
            let mut block = DocBlock::parse_with_newline(&doc.text, &indent, doc.newline);
            if !block.is_well_formed() {
                continue;
            }
            let ctx = context::extract(&tokens, doc.token_index);
            let annotations = block.annotations();

            let removable: Vec<&Annotation> = annotations
                .iter()
                .filter(|ann| {
                    is_superfluous(ann, doc.element, &ctx, allow_mixed)
                        || is_lone_inheritdoc(ann, &block, &annotations, remove_inheritdoc)
                })
                .collect();
            if removable.is_empty() {
                continue;
            }

            if block.is_single_line() {
                block.set_empty();
            } else {
                let ranges: Vec<_> = removable.iter().map(|a| a.line_range()).collect();
                for range in ranges.into_iter().rev() {
                    block.remove_lines(range);
                }
                if block.is_empty_body() {
                    block.set_empty();
                }
            }

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
                "Remove superfluous PHPDoc tag".to_string(),
                self.name(),
            ));
        }

        edits
    }
}

/// Whether the annotation's type is provably redundant with the native
/// declaration and it adds no prose. Any ambiguity keeps the tag.
fn is_superfluous(
    ann: &Annotation,
    element: ElementKind,
    ctx: &TypeContext,
    allow_mixed: bool,
) -> bool {
    if !ann.continuations().is_empty() {
        return false;
    }
    let tag = match ann.parse() {
        Some(t) => t,
        None => return false,
    };
    if !tag.description.trim().is_empty() {
        return false;
    }
    let doc_ty = match tag.ty.as_deref() {
        Some(t) => t,
        None => return false,
    };

    let native = match (element, ann.name()) {
        (ElementKind::Function, "param") => {
            let name = match tag.variable_name() {
                Some(n) => n,
                None => return false,
            };
            match ctx.param(name) {
                Some(p) => (p.ty.clone(), p.default_is_null),
                None => return false,
            }
        }
        (ElementKind::Function, "return") => (ctx.return_type.clone(), false),
        (ElementKind::Property, "var") => (ctx.property_type.clone(), false),
        _ => return false,
    };

    match native {
        (Some(native_ty), implicit_null) => {
            typeexpr::is_redundant(doc_ty, &native_ty, implicit_null, ctx)
        }
        // No native type at all: only a bare `mixed` is superfluous,
        // and only when the configuration says so
        (None, _) => !allow_mixed && is_mixed(doc_ty, ctx),
    }
}

fn is_mixed(doc_ty: &str, ctx: &TypeContext) -> bool {
    typeexpr::parse_type(doc_ty)
        .and_then(|expr| typeexpr::normalized_atoms(&expr, ctx))
        .is_some_and(|atoms| atoms.len() == 1 && atoms.contains("mixed"))
}

/// An @inheritDoc tag sharing the docblock with nothing descriptive
fn is_lone_inheritdoc(
    ann: &Annotation,
    block: &DocBlock,
    annotations: &[Annotation],
    remove_inheritdoc: bool,
) -> bool {
    remove_inheritdoc
        && ann.name().eq_ignore_ascii_case("inheritdoc")
        && ann.continuations().is_empty()
        && annotations.len() == 1
        && block.summary().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpdoctor_core::apply_edits;

    fn fix(source: &str, config: &FixerConfig) -> String {
        let edits = NoSuperfluousPhpdocTagsFixer.check(source, config);
        apply_edits(source, &edits).unwrap()
    }

    fn assert_untouched(source: &str, config: &FixerConfig) {
        assert!(
            NoSuperfluousPhpdocTagsFixer.check(source, config).is_empty(),
            "expected no edits for: {source}"
        );
    }

    fn inheritdoc_config() -> FixerConfig {
        FixerConfig::default().with_option("remove_inheritdoc", ConfigValue::Bool(true))
    }

    #[test]
    fn test_exact_match_removed() {
        let code = "<?php\n/**\n * @param Bar $bar\n * @param string $note why\n */\nfunction f(Bar $bar, string $note) {}\n";
        let fixed = fix(code, &FixerConfig::default());

        assert!(!fixed.contains("@param Bar $bar"), "got:\n{fixed}");
        assert!(fixed.contains("@param string $note why"), "description keeps the tag");
    }

    #[test]
    fn test_nullability_sugar_removed() {
        let code = "<?php\n/**\n * @param Bar|null $bar\n */\nfunction f(?Bar $bar) {}\n";
        let fixed = fix(code, &FixerConfig::default());
        assert!(!fixed.contains("@param"), "got:\n{fixed}");
    }

    #[test]
    fn test_subtype_mismatch_kept() {
        let code = "<?php\n/**\n * @param Bar $bar\n */\nfunction f(BarSubtype $bar) {}\n";
        assert_untouched(code, &FixerConfig::default());
    }

    #[test]
    fn test_unprovable_nullability_kept() {
        let code = "<?php\n/**\n * @var bool|null\n */\nclass A {\n    public bool $flag;\n}\n";
        // @var on the class docblock targets nothing; the property case:
        let code2 = "<?php\nclass A {\n    /**\n     * @var bool|null\n     */\n    public bool $flag;\n}\n";
        assert_untouched(code, &FixerConfig::default());
        assert_untouched(code2, &FixerConfig::default());
    }

    #[test]
    fn test_return_and_var_tags() {
        let code = "<?php\nclass A {\n    /**\n     * @var int\n     */\n    private int $x;\n    /**\n     * @return bool\n     */\n    public function ok(): bool { return true; }\n}\n";
        let fixed = fix(code, &FixerConfig::default());
        assert!(!fixed.contains("@var"), "got:\n{fixed}");
        assert!(!fixed.contains("@return"), "got:\n{fixed}");
    }

    #[test]
    fn test_mixed_without_native_type() {
        let code = "<?php\n/**\n * @param mixed $x\n */\nfunction f($x) {}\n";

        let fixed = fix(code, &FixerConfig::default());
        assert!(!fixed.contains("@param"), "superfluous by default, got:\n{fixed}");

        let allow = FixerConfig::default().with_option("allow_mixed", ConfigValue::Bool(true));
        assert_untouched(code, &allow);
    }

    #[test]
    fn test_lone_inheritdoc_becomes_empty_docblock() {
        let code = "<?php\nclass A extends B {\n    /**\n     * @inheritDoc\n     */\n    public function f() {}\n}\n";
        let fixed = fix(code, &inheritdoc_config());
        assert!(fixed.contains("/**\n     *\n     */"), "got:\n{fixed}");
        assert!(!fixed.contains("@inheritDoc"));
    }

    #[test]
    fn test_inheritdoc_with_description_kept() {
        let code = "<?php\nclass A extends B {\n    /**\n     * Adds logging.\n     *\n     * @inheritDoc\n     */\n    public function f() {}\n}\n";
        assert_untouched(code, &inheritdoc_config());
    }

    #[test]
    fn test_inheritdoc_kept_without_config() {
        let code = "<?php\nclass A extends B {\n    /**\n     * @inheritDoc\n     */\n    public function f() {}\n}\n";
        assert_untouched(code, &FixerConfig::default());
    }

    #[test]
    fn test_imported_alias_resolution() {
        let code = "<?php\nnamespace App;\nuse Vendor\\Pkg\\Bar;\n/**\n * @param \\Vendor\\Pkg\\Bar $bar\n */\nfunction f(Bar $bar) {}\n";
        let fixed = fix(code, &FixerConfig::default());
        assert!(!fixed.contains("@param"), "got:\n{fixed}");
    }

    #[test]
    fn test_free_statement_docblock_skipped() {
        let code = "<?php\n/** @var int $x */\n$x = 1;\n";
        assert_untouched(code, &FixerConfig::default());
    }
}
