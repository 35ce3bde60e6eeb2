//! PHPDoc structural fixers
//!
//! These rules rewrite the inside of `/** ... */` comments: alignment,
//! ordering, renaming, removal, line-span conversion, indentation and
//! trimming. Ordinary `/* */`, `//` and `#` comments are never touched.

mod align;
mod annotation_remove;
mod indent;
mod line_span;
mod no_alias_tag;
mod order;
mod param_order;
mod separation;
mod trim;

pub use align::PhpdocAlignFixer;
pub use annotation_remove::GeneralPhpdocAnnotationRemoveFixer;
pub use indent::PhpdocIndentFixer;
pub use line_span::PhpdocLineSpanFixer;
pub use no_alias_tag::PhpdocNoAliasTagFixer;
pub use order::PhpdocOrderFixer;
pub use param_order::PhpdocParamOrderFixer;
pub use separation::PhpdocSeparationFixer;
pub use trim::PhpdocTrimFixer;

use phpdoctor_core::{tokenize, Edit};
use phpdoctor_docblock::{find_doc_comments, Annotation, DocBlock, DocComment, Line, Newline};

use super::{edit_with_rule, FixerConfig};
use crate::config::LineEnding;

/// Indent for synthesized docblock lines: the comment's own when it
/// starts its line, else the configured unit.
pub(crate) fn doc_indent(doc: &DocComment, config: &FixerConfig) -> String {
    if doc.owns_line {
        doc.indent.clone()
    } else {
        config.indent.map(|style| style.unit()).unwrap_or_default()
    }
}

/// Line break style the serializer must use for rewritten docblocks,
/// when the configuration pins one.
pub(crate) fn newline_override(config: &FixerConfig) -> Option<Newline> {
    config.line_ending.map(|ending| match ending {
        LineEnding::Lf => Newline::Lf,
        LineEnding::CrLf => Newline::CrLf,
    })
}

/// Run a rewrite closure over every docblock in the source and collect
/// one whole-token edit per docblock that actually changed.
///
/// Each docblock is parsed and rewritten independently; the closure sees
/// the located comment (element kind, indent, line break style) and the
/// parsed model, and mutates the model in place. Docblocks the closure
/// changes are serialized with the configured line ending; untouched
/// docblocks stay byte-identical whatever the configuration says.
pub(crate) fn rewrite_docblocks<F>(
    source: &str,
    config: &FixerConfig,
    rule: &str,
    message: &str,
    mut rewrite: F,
) -> Vec<Edit>
where
    F: FnMut(&DocComment, &mut DocBlock),
{
    let tokens = tokenize(source);
    let mut edits = Vec::new();

    for doc in find_doc_comments(source, &tokens) {
        let indent = doc_indent(&doc, config);
        let mut block = DocBlock::parse_with_newline(&doc.text, &indent, doc.newline);
        rewrite(&doc, &mut block);

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
            message.to_string(),
            rule,
        ));
    }

    edits
}

/// Permute annotation blocks among their own slots.
///
/// `order[i]` names the annotation (index into `slots`) whose lines land
/// in slot `i`. Lines between the slots stay exactly where they are, so
/// free text and untargeted tags keep their positions.
pub(crate) fn reorder_annotations(block: &mut DocBlock, slots: &[Annotation], order: &[usize]) {
    if order.iter().enumerate().all(|(i, &o)| i == o) {
        return;
    }

    let moved: Vec<Vec<Line>> = slots
        .iter()
        .map(|a| block.lines()[a.line_range()].to_vec())
        .collect();

    // Back to front so earlier slot indices stay valid
    for (slot, &src) in slots.iter().zip(order.iter()).rev() {
        block.splice_lines(slot.line_range(), moved[src].clone());
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use phpdoctor_core::apply_edits;

    use crate::fixers::{Fixer, FixerConfig};

    /// Apply a fixer once and return the resulting source
    pub fn fix(fixer: &dyn Fixer, source: &str, config: &FixerConfig) -> String {
        let edits = fixer.check(source, config);
        apply_edits(source, &edits).unwrap()
    }

    /// Assert the fixer leaves the source untouched
    pub fn assert_untouched(fixer: &dyn Fixer, source: &str, config: &FixerConfig) {
        assert!(
            fixer.check(source, config).is_empty(),
            "expected no edits for: {source}"
        );
    }

    /// Assert the fixer's output is stable under a second application
    pub fn assert_idempotent(fixer: &dyn Fixer, source: &str, config: &FixerConfig) {
        let once = fix(fixer, source, config);
        let twice = fix(fixer, &once, config);
        assert_eq!(once, twice, "fixer is not idempotent on: {source}");
    }
}
