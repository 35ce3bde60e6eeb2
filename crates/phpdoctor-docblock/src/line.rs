//! One physical line of a docblock
//!
//! The raw text (without its line break) is stored verbatim. The content
//! accessors strip the conventional `" * "` frame; a line that does not
//! carry the frame is reported as such and its text is never rewritten
//! behind the caller's back.

/// A physical docblock line, stored verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    raw: String,
}

impl Line {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Leading whitespace of the line
    pub fn leading_ws(&self) -> &str {
        let end = self
            .raw
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(self.raw.len());
        &self.raw[..end]
    }

    /// Whether the first non-whitespace character is the framing `*`
    pub fn has_asterisk(&self) -> bool {
        self.raw.trim_start().starts_with('*')
    }

    /// Byte offset where the content starts: past leading whitespace, the
    /// `*`, and at most one following space. For a line without a leading
    /// `*` this is the start of the non-whitespace text.
    pub fn content_start(&self) -> usize {
        let ws = self.leading_ws().len();
        let rest = &self.raw[ws..];
        if let Some(after) = rest.strip_prefix('*') {
            if after.starts_with(' ') {
                ws + 2
            } else {
                ws + 1
            }
        } else {
            ws
        }
    }

    /// The line's content, without the indent / `*` frame
    pub fn content(&self) -> &str {
        &self.raw[self.content_start()..]
    }

    /// Replace the content, keeping the existing frame bytes
    pub fn set_content(&mut self, content: &str) {
        let ws = self.leading_ws().len();
        let rest = &self.raw[ws..];
        let mut new = String::with_capacity(ws + 2 + content.len());
        new.push_str(&self.raw[..ws]);
        if rest.starts_with('*') {
            new.push('*');
            if !content.is_empty() {
                new.push(' ');
            }
        }
        new.push_str(content);
        self.raw = new;
    }

    /// Whether the content is empty (a bare `*` separator line)
    pub fn is_blank(&self) -> bool {
        self.content().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_strips_frame() {
        let line = Line::from_raw("     * @param int $x");
        assert_eq!(line.content(), "@param int $x");
        assert!(line.has_asterisk());
    }

    #[test]
    fn test_content_strips_at_most_one_space() {
        let line = Line::from_raw(" *   indented content");
        assert_eq!(line.content(), "  indented content");
    }

    #[test]
    fn test_bare_asterisk_is_blank() {
        assert!(Line::from_raw("     *").is_blank());
        assert!(Line::from_raw("     * ").is_blank());
        assert!(!Line::from_raw("     * x").is_blank());
    }

    #[test]
    fn test_line_without_asterisk() {
        let line = Line::from_raw("    stray text");
        assert!(!line.has_asterisk());
        assert_eq!(line.content(), "stray text");
    }

    #[test]
    fn test_set_content_keeps_frame() {
        let mut line = Line::from_raw("\t * old");
        line.set_content("new");
        assert_eq!(line.raw(), "\t * new");

        line.set_content("");
        assert_eq!(line.raw(), "\t *");
    }
}
