//! Line-preserving docblock model
//!
//! `DocBlock::parse` is total: any input splits into physical lines that
//! are stored verbatim, so rendering an unmodified model reproduces the
//! original text byte-for-byte. Structure (summary, description,
//! annotations) is derived on demand; mutation happens through line-level
//! operations that keep every untouched line's bytes intact.

use std::fmt;
use std::ops::Range;

use crate::line::Line;
use crate::tag::{parse_tag, tag_start_name, Tag};

/// Line break style of a docblock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Newline {
    #[default]
    Lf,
    CrLf,
}

impl Newline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }

    /// Detect the line break style used in `text`, if it has any
    pub fn detect(text: &str) -> Option<Newline> {
        if text.contains("\r\n") {
            Some(Newline::CrLf)
        } else if text.contains('\n') {
            Some(Newline::Lf)
        } else {
            None
        }
    }
}

/// One tag occurrence inside a docblock: the tag's first line plus all
/// continuation lines up to the next tag start or blank separator.
#[derive(Debug, Clone)]
pub struct Annotation {
    /// Index of the tag's first physical line
    pub start: usize,
    /// Index of the tag's last physical line (inclusive)
    pub end: usize,
    name: String,
    first_line: String,
    continuations: Vec<String>,
}

impl Annotation {
    /// Tag name without the leading `@`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical line range, suitable for line-level mutation
    pub fn line_range(&self) -> Range<usize> {
        self.start..self.end + 1
    }

    /// Content of the tag's first line (starts with `@` or `{@`)
    pub fn first_line(&self) -> &str {
        &self.first_line
    }

    /// Contents of the continuation lines
    pub fn continuations(&self) -> &[String] {
        &self.continuations
    }

    /// Split the first line into type / variable / description
    pub fn parse(&self) -> Option<Tag> {
        parse_tag(&self.first_line)
    }
}

/// Parsed docblock
#[derive(Debug, Clone)]
pub struct DocBlock {
    lines: Vec<Line>,
    newline: Newline,
    indent: String,
    single_line: bool,
}

impl DocBlock {
    /// Parse a raw `/** ... */` text. Total: malformed input is retained
    /// verbatim and reported through `is_well_formed`.
    pub fn parse(raw: &str, indent: &str) -> Self {
        Self::parse_with_newline(raw, indent, Newline::Lf)
    }

    /// Parse with an explicit fallback line break style, used when the
    /// comment itself is single-line and carries no line break of its own.
    pub fn parse_with_newline(raw: &str, indent: &str, fallback: Newline) -> Self {
        let newline = Newline::detect(raw).unwrap_or(fallback);
        let single_line = !raw.contains('\n');
        let lines = raw
            .split('\n')
            .map(|l| Line::from_raw(l.strip_suffix('\r').unwrap_or(l)))
            .collect();

        Self {
            lines,
            newline,
            indent: indent.to_string(),
            single_line,
        }
    }

    pub fn newline(&self) -> Newline {
        self.newline
    }

    /// Override the line break style `render` uses
    pub fn set_newline(&mut self, newline: Newline) {
        self.newline = newline;
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Render the docblock back to text
    pub fn render(&self) -> String {
        let sep = self.newline.as_str();
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            out.push_str(line.raw());
        }
        out
    }

    /// Indices of the body lines (everything between `/**` and `*/`).
    /// Empty for single-line docblocks.
    pub fn body_range(&self) -> Range<usize> {
        if self.single_line || self.lines.len() < 2 {
            0..0
        } else {
            1..self.lines.len() - 1
        }
    }

    /// Inner content of a single-line docblock (`/** X */` -> `X`)
    pub fn single_line_content(&self) -> Option<&str> {
        if !self.single_line {
            return None;
        }
        let raw = self.lines.first()?.raw();
        let inner = raw.strip_prefix("/**")?.strip_suffix("*/")?;
        Some(inner.trim())
    }

    /// Whether the docblock has the expected shape for structural rules:
    /// plain `/**` opener, `*/` closer on its own line, and every body
    /// line framed by a leading `*`. Anything else (stray asterisks,
    /// content on the delimiter lines) is left alone by callers.
    pub fn is_well_formed(&self) -> bool {
        if self.single_line {
            let raw = self.lines[0].raw();
            return match self.single_line_content() {
                Some(inner) => !inner.starts_with('*') && raw.len() >= "/***/".len(),
                None => false,
            };
        }

        if self.lines.len() < 2 {
            return false;
        }
        if self.lines[0].raw().trim() != "/**" {
            return false;
        }
        if self.lines[self.lines.len() - 1].raw().trim() != "*/" {
            return false;
        }
        self.body_range().all(|i| self.lines[i].has_asterisk())
    }

    /// Content of one body line
    pub fn content_of(&self, idx: usize) -> &str {
        self.lines[idx].content()
    }

    /// Replace one body line's content, keeping its frame
    pub fn set_content(&mut self, idx: usize, content: &str) {
        self.lines[idx].set_content(content);
    }

    /// Build a body line framed the way this docblock frames lines
    pub fn make_line(&self, content: &str) -> Line {
        if content.is_empty() {
            Line::from_raw(format!("{} *", self.indent))
        } else {
            Line::from_raw(format!("{} * {}", self.indent, content))
        }
    }

    /// Remove a range of physical lines
    pub fn remove_lines(&mut self, range: Range<usize>) {
        self.lines.drain(range);
    }

    /// Insert a body line with the given content before `idx`
    pub fn insert_content(&mut self, idx: usize, content: &str) {
        let line = self.make_line(content);
        self.lines.insert(idx, line);
    }

    /// Replace a range of physical lines with the given raw lines
    pub fn splice_lines(&mut self, range: Range<usize>, replacement: Vec<Line>) {
        self.lines.splice(range, replacement);
    }

    /// Ordered top-level annotations. Tag-looking lines nested inside a
    /// brace-opened inline block are continuations of the enclosing tag,
    /// never top-level annotations.
    pub fn annotations(&self) -> Vec<Annotation> {
        if self.single_line {
            if let Some(inner) = self.single_line_content() {
                if let Some(name) = tag_start_name(inner) {
                    return vec![Annotation {
                        start: 0,
                        end: 0,
                        name,
                        first_line: inner.to_string(),
                        continuations: Vec::new(),
                    }];
                }
            }
            return Vec::new();
        }

        let mut annotations: Vec<Annotation> = Vec::new();
        let mut current: Option<Annotation> = None;
        let mut depth: usize = 0;

        for idx in self.body_range() {
            let content = self.lines[idx].content().to_string();
            let trimmed = content.trim();

            if trimmed.is_empty() && depth == 0 {
                // Blank separator line: closes the running annotation
                if let Some(ann) = current.take() {
                    annotations.push(ann);
                }
                continue;
            }

            let starts_tag = depth == 0 && tag_start_name(trimmed).is_some();
            if starts_tag {
                if let Some(ann) = current.take() {
                    annotations.push(ann);
                }
                current = Some(Annotation {
                    start: idx,
                    end: idx,
                    name: tag_start_name(trimmed).unwrap_or_default(),
                    first_line: content.clone(),
                    continuations: Vec::new(),
                });
                depth = adjust_depth(depth, &content);
            } else if let Some(ann) = current.as_mut() {
                ann.end = idx;
                ann.continuations.push(content.clone());
                depth = adjust_depth(depth, &content);
            }
            // Lines before the first tag belong to summary/description
        }

        if let Some(ann) = current.take() {
            annotations.push(ann);
        }
        annotations
    }

    /// First non-tag paragraph of the docblock
    pub fn summary(&self) -> Option<String> {
        self.free_text_paragraphs().into_iter().next()
    }

    /// Non-tag paragraphs after the summary, joined by blank lines
    pub fn description(&self) -> Option<String> {
        let paragraphs = self.free_text_paragraphs();
        if paragraphs.len() < 2 {
            return None;
        }
        Some(paragraphs[1..].join("\n\n"))
    }

    fn free_text_paragraphs(&self) -> Vec<String> {
        if self.single_line {
            return match self.single_line_content() {
                Some(inner) if !inner.is_empty() && tag_start_name(inner).is_none() => {
                    vec![inner.to_string()]
                }
                _ => Vec::new(),
            };
        }

        let first_tag = self
            .annotations()
            .first()
            .map(|a| a.start)
            .unwrap_or(self.lines.len());

        let mut paragraphs = Vec::new();
        let mut buf: Vec<String> = Vec::new();
        for idx in self.body_range() {
            if idx >= first_tag {
                break;
            }
            let content = self.lines[idx].content().trim_end();
            if content.trim().is_empty() {
                if !buf.is_empty() {
                    paragraphs.push(buf.join("\n"));
                    buf.clear();
                }
            } else {
                buf.push(content.to_string());
            }
        }
        if !buf.is_empty() {
            paragraphs.push(buf.join("\n"));
        }
        paragraphs
    }

    /// Whether the body carries no content at all
    pub fn is_empty_body(&self) -> bool {
        if self.single_line {
            return self.single_line_content().map_or(true, str::is_empty);
        }
        self.body_range().all(|i| self.lines[i].is_blank())
    }

    /// Reduce the docblock to the canonical empty form:
    /// `/**` + ` *` + ` */` on three lines at the docblock's indent.
    pub fn set_empty(&mut self) {
        self.lines = vec![
            Line::from_raw("/**"),
            Line::from_raw(format!("{} *", self.indent)),
            Line::from_raw(format!("{} */", self.indent)),
        ];
        self.single_line = false;
    }

    /// Convert a single-line docblock to multi-line form
    pub fn expand(&mut self) {
        if !self.single_line {
            return;
        }
        let inner = self.single_line_content().unwrap_or_default().to_string();
        let mut lines = vec![Line::from_raw("/**")];
        if !inner.is_empty() {
            lines.push(self.make_line(&inner));
        } else {
            lines.push(self.make_line(""));
        }
        lines.push(Line::from_raw(format!("{} */", self.indent)));
        self.lines = lines;
        self.single_line = false;
    }

    /// Collapse a multi-line docblock to `/** content */` form. Refuses
    /// (returns false) when the body holds more than one semantic line.
    pub fn try_collapse(&mut self) -> bool {
        if self.single_line {
            return true;
        }
        if !self.is_well_formed() {
            return false;
        }

        let mut content: Option<String> = None;
        for idx in self.body_range() {
            let line = &self.lines[idx];
            if line.is_blank() {
                continue;
            }
            if content.is_some() {
                return false;
            }
            content = Some(line.content().trim_end().to_string());
        }

        let inner = match content {
            Some(c) => c,
            None => return false,
        };
        self.lines = vec![Line::from_raw(format!("/** {} */", inner))];
        self.single_line = true;
        true
    }
}

impl fmt::Display for DocBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Track brace nesting across annotation lines. The depth never goes
/// negative; stray closers are treated as text.
fn adjust_depth(depth: usize, content: &str) -> usize {
    let mut depth = depth as i64;
    for c in content.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = (depth - 1).max(0),
            _ => {}
        }
    }
    depth as usize
}
