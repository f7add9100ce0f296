use crate::token::{BlockTag, Token, TokenKind};

/// Scan Lua source into a token sequence.
///
/// The scanner walks the text byte by byte and recognizes comments, string
/// literals and words; everything it recognizes inside a comment or string
/// stays part of that token, so block keywords in there are never reported
/// as structural. Unterminated strings and comments consume the remainder
/// of the line (short strings) or file (long brackets) as literal content.
/// The scanner never fails on malformed input.
pub fn scan(source: &str) -> Vec<Token<'_>> {
    Scanner::new(source).run()
}

struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token<'a>> {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            match b {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b'-' if self.peek(1) == Some(b'-') => self.comment(),
                b'"' | b'\'' => self.short_string(b),
                b'[' if self.long_bracket_level(self.pos).is_some() => self.long_string(),
                b if b == b'_' || b.is_ascii_alphabetic() => self.word(),
                _ => self.pos += 1,
            }
        }
        self.tokens
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    /// Level of a long-bracket opener `[`, `[=[`, `[==[` ... at `pos`,
    /// or `None` if `pos` does not start one.
    fn long_bracket_level(&self, pos: usize) -> Option<usize> {
        if self.bytes.get(pos) != Some(&b'[') {
            return None;
        }
        let mut i = pos + 1;
        let mut level = 0;
        while self.bytes.get(i) == Some(&b'=') {
            level += 1;
            i += 1;
        }
        if self.bytes.get(i) == Some(&b'[') {
            Some(level)
        } else {
            None
        }
    }

    fn comment(&mut self) {
        let start = self.pos;
        let start_line = self.line;
        self.pos += 2; // consume "--"
        if let Some(level) = self.long_bracket_level(self.pos) {
            self.pos += level + 2;
            self.consume_until_long_close(level);
        } else {
            while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                self.pos += 1;
            }
        }
        self.push(TokenKind::Comment, start, start_line);
    }

    fn short_string(&mut self, quote: u8) {
        let start = self.pos;
        let start_line = self.line;
        self.pos += 1; // opening quote
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => {
                    // escape sequence; an escaped newline keeps the string open
                    if self.peek(1) == Some(b'\n') {
                        self.line += 1;
                    }
                    self.pos = (self.pos + 2).min(self.bytes.len());
                }
                b if b == quote => {
                    self.pos += 1;
                    break;
                }
                // unterminated: the remainder of the line is literal content
                b'\n' => break,
                _ => self.pos += 1,
            }
        }
        self.push(TokenKind::StringLiteral, start, start_line);
    }

    fn long_string(&mut self) {
        let start = self.pos;
        let start_line = self.line;
        let level = self
            .long_bracket_level(self.pos)
            .unwrap_or_default();
        self.pos += level + 2;
        self.consume_until_long_close(level);
        self.push(TokenKind::StringLiteral, start, start_line);
    }

    /// Advance past the matching `]`, `]=]`, ... closer, counting newlines.
    /// Consumes to end of input when the closer never appears.
    fn consume_until_long_close(&mut self, level: usize) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b']' => {
                    let mut i = self.pos + 1;
                    let mut eq = 0;
                    while self.bytes.get(i) == Some(&b'=') {
                        eq += 1;
                        i += 1;
                    }
                    if eq == level && self.bytes.get(i) == Some(&b']') {
                        self.pos = i + 1;
                        return;
                    }
                    self.pos += 1;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn word(&mut self) {
        let start = self.pos;
        while self.pos < self.bytes.len() && is_word_byte(self.bytes[self.pos]) {
            self.pos += 1;
        }
        let text = &self.source[start..self.pos];
        let kind = match text {
            "end" | "until" => TokenKind::BlockClose,
            word => match BlockTag::from_word(word) {
                Some(tag) => TokenKind::BlockOpen(tag),
                None => TokenKind::Other,
            },
        };
        self.push(kind, start, self.line);
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: u32) {
        self.tokens.push(Token {
            kind,
            text: &self.source[start..self.pos],
            start_offset: start,
            end_offset: self.pos,
            line,
        });
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
