//! Lightweight lexical scan of PHP source
//!
//! This is not a full PHP lexer. It only separates the lexical regions a
//! docblock fixer has to respect: comments (all three styles), string
//! literals, heredoc/nowdoc bodies, attributes, variables and bare words.
//! Everything else comes out as single-character punctuation tokens.
//!
//! The token text always slices the original source verbatim, so joining
//! all token texts reproduces the input byte-for-byte.

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Text outside `<?php ... ?>`
    InlineHtml,
    /// `<?php`, `<?=` or `<?`
    OpenTag,
    /// `?>`
    CloseTag,
    /// `/** ... */`
    DocComment,
    /// `/* ... */` (not a doc comment)
    BlockComment,
    /// `// ...` or `# ...` up to (excluding) the line break
    LineComment,
    /// Single- or double-quoted string literal
    StringLiteral,
    /// Heredoc or nowdoc body including the `<<<` opener and closing label
    Heredoc,
    /// `#[...]` attribute group
    Attribute,
    /// `$name`
    Variable,
    /// Identifier or keyword
    Word,
    /// Run of whitespace
    Whitespace,
    /// Any other single character
    Punct,
}

/// One lexical token
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line of the token's first byte
    pub line: usize,
    /// Byte offset of the token's first byte
    pub offset: usize,
}

impl Token {
    pub fn end_offset(&self) -> usize {
        self.offset + self.text.len()
    }

    /// Case-insensitive keyword comparison for `Word` tokens
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(keyword)
    }
}

/// Split PHP source into tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            self.html();
            self.php();
        }
        self.tokens
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        if end <= start {
            return;
        }
        let text = &self.source[start..end];
        let line = self.line;
        self.line += text.matches('\n').count();
        self.tokens.push(Token {
            kind,
            text: text.to_string(),
            line,
            offset: start,
        });
    }

    fn starts_with(&self, pat: &str) -> bool {
        self.source[self.pos..].starts_with(pat)
    }

    /// Consume inline HTML up to and including the next PHP open tag
    fn html(&mut self) {
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.starts_with("<?") {
            self.pos += char_len(self.bytes[self.pos]);
        }
        self.push(TokenKind::InlineHtml, start, self.pos);

        if self.pos < self.bytes.len() {
            let tag_start = self.pos;
            let rest = &self.source[self.pos..];
            let len = if rest.starts_with("<?php") {
                5
            } else if rest.starts_with("<?=") {
                3
            } else {
                2
            };
            self.pos += len;
            self.push(TokenKind::OpenTag, tag_start, self.pos);
        }
    }

    /// Consume PHP tokens up to and including the next close tag
    fn php(&mut self) {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            let b = self.bytes[self.pos];

            if self.starts_with("?>") {
                self.pos += 2;
                self.push(TokenKind::CloseTag, start, self.pos);
                return;
            }

            if b.is_ascii_whitespace() {
                while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
                    self.pos += 1;
                }
                self.push(TokenKind::Whitespace, start, self.pos);
            } else if self.starts_with("/**") && !self.starts_with("/**/") {
                self.block_comment(TokenKind::DocComment);
            } else if self.starts_with("/*") {
                self.block_comment(TokenKind::BlockComment);
            } else if self.starts_with("//") {
                self.line_comment();
            } else if self.starts_with("#[") {
                self.attribute();
            } else if b == b'#' {
                self.line_comment();
            } else if b == b'\'' || b == b'"' {
                self.string_literal(b);
            } else if self.starts_with("<<<") {
                self.heredoc();
            } else if b == b'$' && self.pos + 1 < self.bytes.len() && is_name_byte(self.bytes[self.pos + 1]) {
                self.pos += 1;
                while self.pos < self.bytes.len() && is_name_byte(self.bytes[self.pos]) {
                    self.pos += 1;
                }
                self.push(TokenKind::Variable, start, self.pos);
            } else if is_name_start_byte(b) {
                while self.pos < self.bytes.len() && is_name_byte(self.bytes[self.pos]) {
                    self.pos += 1;
                }
                self.push(TokenKind::Word, start, self.pos);
            } else {
                self.pos += char_len(b);
                self.push(TokenKind::Punct, start, self.pos);
            }
        }
    }

    fn block_comment(&mut self, kind: TokenKind) {
        let start = self.pos;
        self.pos += if kind == TokenKind::DocComment { 3 } else { 2 };
        match self.source[self.pos..].find("*/") {
            Some(rel) => self.pos += rel + 2,
            None => self.pos = self.bytes.len(),
        }
        self.push(kind, start, self.pos);
    }

    fn line_comment(&mut self) {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] == b'\n' || self.starts_with("?>") {
                break;
            }
            self.pos += char_len(self.bytes[self.pos]);
        }
        // Exclude a trailing \r from the comment text
        let mut end = self.pos;
        if end > start && self.bytes[end - 1] == b'\r' {
            end -= 1;
        }
        self.push(TokenKind::LineComment, start, end);
        self.pos = end;
    }

    fn attribute(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let mut depth = 1usize;
        while self.pos < self.bytes.len() && depth > 0 {
            match self.bytes[self.pos] {
                b'[' => {
                    depth += 1;
                    self.pos += 1;
                }
                b']' => {
                    depth -= 1;
                    self.pos += 1;
                }
                q @ (b'\'' | b'"') => self.skip_quoted(q),
                b => self.pos += char_len(b),
            }
        }
        self.push(TokenKind::Attribute, start, self.pos);
    }

    fn string_literal(&mut self, quote: u8) {
        let start = self.pos;
        self.skip_quoted(quote);
        self.push(TokenKind::StringLiteral, start, self.pos);
    }

    fn skip_quoted(&mut self, quote: u8) {
        self.pos += 1;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b == b'\\' {
                self.pos += 1;
                if self.pos < self.bytes.len() {
                    self.pos += char_len(self.bytes[self.pos]);
                }
            } else if b == quote {
                self.pos += 1;
                return;
            } else {
                self.pos += char_len(b);
            }
        }
    }

    fn heredoc(&mut self) {
        let start = self.pos;
        self.pos += 3;

        // Opener: optional quotes around the label, then the rest of the line
        let label_start = self.pos;
        let mut label_end = label_start;
        while label_end < self.bytes.len() {
            let b = self.bytes[label_end];
            if b == b'\n' {
                break;
            }
            label_end += 1;
        }
        let label: String = self.source[label_start..label_end]
            .trim()
            .trim_matches(|c| c == '\'' || c == '"')
            .to_string();
        self.pos = label_end;

        if label.is_empty() {
            self.push(TokenKind::Heredoc, start, self.pos);
            return;
        }

        // Body: scan line by line for the closing label
        while self.pos < self.bytes.len() {
            // Move past the newline that ended the previous line
            self.pos += 1;
            let line_start = self.pos;
            let mut content_start = line_start;
            while content_start < self.bytes.len()
                && (self.bytes[content_start] == b' ' || self.bytes[content_start] == b'\t')
            {
                content_start += 1;
            }
            if self.source[content_start..].starts_with(label.as_str()) {
                self.pos = content_start + label.len();
                break;
            }
            match self.source[line_start..].find('\n') {
                Some(rel) => self.pos = line_start + rel,
                None => {
                    self.pos = self.bytes.len();
                    break;
                }
            }
        }
        self.push(TokenKind::Heredoc, start, self.pos);
    }
}

fn is_name_start_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Length in bytes of the UTF-8 character starting with `b`
fn char_len(b: u8) -> usize {
    if b < 0x80 {
        1
    } else if b >> 5 == 0b110 {
        2
    } else if b >> 4 == 0b1110 {
        3
    } else if b >> 3 == 0b11110 {
        4
    } else {
        1
    }
}
