//! parse/scan — general-purpose lexical scanner over a submitted document.
//!
//! Token kinds: identifiers, numbers, string literals (including GraphQL
//! `"""` block strings), comments and single-char punctuation. Comments are
//! NOT auto-discarded: they are surfaced as tokens, and the segmenter decides
//! what to do with them.
//!
//! Every token carries byte offsets (start/end) into the source, so callers
//! can slice spans of the original text. The scanner itself never fails:
//! an unterminated string/comment simply runs to end of input and the
//! segmenter's flush rule decides whether that is malformed.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokKind {
    Ident,
    Number,
    Str,
    Comment,
    Punct,
}

#[derive(Clone, Copy, Debug)]
pub struct Token<'a> {
    pub kind: TokKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    #[inline]
    fn peek2(&self) -> Option<char> {
        let mut it = self.src[self.pos..].chars();
        it.next();
        it.next()
    }

    #[inline]
    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn eat_while<F: Fn(char) -> bool>(&mut self, f: F) {
        while let Some(c) = self.peek() {
            if f(c) {
                self.bump(c);
            } else {
                break;
            }
        }
    }

    fn eat_line(&mut self) {
        self.eat_while(|c| c != '\n');
    }

    // "..." with backslash escapes, or """...""" block string. Unterminated
    // literals run to end of input.
    fn eat_string(&mut self) {
        self.bump('"');
        if self.src[self.pos..].starts_with("\"\"") {
            self.pos += 2;
            match self.src[self.pos..].find("\"\"\"") {
                Some(i) => self.pos += i + 3,
                None => self.pos = self.src.len(),
            }
            return;
        }
        while let Some(c) = self.peek() {
            self.bump(c);
            match c {
                '\\' => {
                    if let Some(n) = self.peek() {
                        self.bump(n);
                    }
                }
                '"' => break,
                _ => {}
            }
        }
    }

    fn eat_block_comment(&mut self) {
        self.pos += 2;
        match self.src[self.pos..].find("*/") {
            Some(i) => self.pos += i + 2,
            None => self.pos = self.src.len(),
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump(c);
            } else {
                break;
            }
        }

        let start = self.pos;
        let c = self.peek()?;

        let kind = match c {
            '#' => {
                self.eat_line();
                TokKind::Comment
            }
            '/' if self.peek2() == Some('/') => {
                self.eat_line();
                TokKind::Comment
            }
            '/' if self.peek2() == Some('*') => {
                self.eat_block_comment();
                TokKind::Comment
            }
            '"' => {
                self.eat_string();
                TokKind::Str
            }
            c if c == '_' || c.is_ascii_alphabetic() => {
                self.eat_while(|c| c == '_' || c.is_ascii_alphanumeric());
                TokKind::Ident
            }
            c if c.is_ascii_digit() => {
                self.eat_while(|c| {
                    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
                });
                TokKind::Number
            }
            c => {
                self.bump(c);
                TokKind::Punct
            }
        };

        Some(Token {
            kind,
            text: &self.src[start..self.pos],
            start,
            end: self.pos,
        })
    }
}
