use std::iter::FusedIterator;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::ast::{Token, TokenKind};

/// Patterns for the token classes that are not single punctuation marks.
/// Compiled on first use and shared by every lexer.
struct TokenPatterns {
    symbol: Regex,
    number: Regex,
}

static PATTERNS: LazyLock<TokenPatterns> = LazyLock::new(|| TokenPatterns {
    symbol: Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*")
        .expect("symbol pattern is valid"),
    number: Regex::new(r"^[0-9]+(\.[0-9]+)?").expect("number pattern is valid"),
});

/// Errors raised while splitting source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("line {line}: unknown text {text:?}")]
    UnknownText { text: String, line: usize },

    #[error("line {line}: unterminated string literal {text}")]
    UnterminatedString { text: String, line: usize },

    #[error("line {line}: invalid escape sequence {text}")]
    InvalidEscape { text: String, line: usize },

    #[error("line {line}: unterminated block comment")]
    UnterminatedComment { line: usize },

    #[error("line {line}: number {text} is out of range")]
    NumberOutOfRange { text: String, line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnknownText { line, .. }
            | LexError::UnterminatedString { line, .. }
            | LexError::InvalidEscape { line, .. }
            | LexError::UnterminatedComment { line }
            | LexError::NumberOutOfRange { line, .. } => *line,
        }
    }
}

/// Tokenizer over a single source string.
///
/// A lexer is single-use: once it has returned [`TokenKind::Eof`] or an
/// error, create a new one for the next input.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    finished: bool,
}

/// Lazily tokenize `input`. Comments, whitespace and the end-of-input marker
/// are not yielded; iteration stops after the first error.
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            finished: false,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
            }
        }
    }

    /// Consume `len` bytes, keeping the line count in step.
    fn advance_by(&mut self, len: usize) -> &'a str {
        let consumed = &self.input[self.position..self.position + len];
        self.line += consumed.matches('\n').count();
        self.position += len;
        consumed
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let len = self
            .rest()
            .find(|c: char| !pred(c))
            .unwrap_or(self.rest().len());
        self.advance_by(len)
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match (self.current_char(), self.peek_char(1)) {
                (Some(' ' | '\t' | '\r' | '\n'), _) => self.advance(),
                (Some('#'), _) | (Some('/'), Some('/')) | (Some('-'), Some('-')) => {
                    self.take_while(|c| c != '\n');
                }
                (Some('/'), Some('*')) => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// `/* ... */` comments do not nest: the first `*/` closes the comment.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let line = self.line;
        match self.rest()[2..].find("*/") {
            Some(end) => {
                self.advance_by(end + 4);
                Ok(())
            }
            None => Err(LexError::UnterminatedComment { line }),
        }
    }

    fn read_symbol(&mut self) -> TokenKind {
        let len = PATTERNS
            .symbol
            .find(self.rest())
            .map_or(0, |m| m.end());
        let text = self.advance_by(len);

        if let Some(keyword) = TokenKind::keyword(&text.to_ascii_uppercase()) {
            return keyword;
        }
        match text {
            "true" => TokenKind::Boolean(true),
            "false" => TokenKind::Boolean(false),
            "null" => TokenKind::Null,
            _ => TokenKind::Symbol(text.to_string()),
        }
    }

    fn read_number(&mut self) -> Result<TokenKind, LexError> {
        let line = self.line;
        let (len, is_float) = match PATTERNS.number.captures(self.rest()) {
            Some(caps) => (caps[0].len(), caps.get(1).is_some()),
            None => (0, false),
        };
        let text = self.advance_by(len);
        let out_of_range = || LexError::NumberOutOfRange {
            text: text.to_string(),
            line,
        };

        if is_float {
            text.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| out_of_range())
        } else {
            text.parse::<i64>()
                .map(TokenKind::Integer)
                .map_err(|_| out_of_range())
        }
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let line = self.line;
        let mut result = String::new();
        self.advance(); // opening quote

        loop {
            match self.current_char() {
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                Some('\\') => {
                    self.advance();
                    result.push(self.read_escape(start, line)?);
                }
                Some('\n') | None => {
                    return Err(LexError::UnterminatedString {
                        text: self.input[start..self.position].to_string(),
                        line,
                    });
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Decode the escape whose backslash has just been consumed.
    fn read_escape(&mut self, string_start: usize, line: usize) -> Result<char, LexError> {
        let escape_start = self.position - 1;

        match self.current_char() {
            None | Some('\n') => Err(LexError::UnterminatedString {
                text: self.input[string_start..self.position].to_string(),
                line,
            }),
            Some('x') if self.peek_char(1).is_some_and(|c| c.is_ascii_hexdigit()) => {
                self.advance();
                let digits = self.take_while(|c| c.is_ascii_hexdigit());
                self.code_point(digits, 16, escape_start, line)
            }
            Some(c) if c.is_ascii_digit() => {
                let digits = self.take_while(|c| c.is_ascii_digit());
                self.code_point(digits, 10, escape_start, line)
            }
            Some(c) if is_simple_escape(c) => {
                self.advance();
                Ok(match c {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    'b' => '\u{8}',
                    'f' => '\u{c}',
                    'v' => '\u{b}',
                    'a' => '\u{7}',
                    other => other,
                })
            }
            Some(_) => {
                self.advance();
                Err(LexError::InvalidEscape {
                    text: self.input[escape_start..self.position].to_string(),
                    line,
                })
            }
        }
    }

    fn code_point(
        &self,
        digits: &str,
        radix: u32,
        escape_start: usize,
        line: usize,
    ) -> Result<char, LexError> {
        u32::from_str_radix(digits, radix)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| LexError::InvalidEscape {
                text: self.input[escape_start..self.position].to_string(),
                line,
            })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// `kind_pair` if the next char is `second`, else `kind_single`.
    fn one_or_two(&mut self, second: char, kind_pair: TokenKind, kind_single: TokenKind) -> TokenKind {
        self.advance();
        if self.current_char() == Some(second) {
            self.advance();
            kind_pair
        } else {
            kind_single
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;
        let line = self.line;

        let Some(ch) = self.current_char() else {
            return Ok(Token::new(TokenKind::Eof, line));
        };

        let kind = match ch {
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            ':' => self.single(TokenKind::Colon),
            ';' => self.single(TokenKind::Semicolon),
            ',' => self.single(TokenKind::Comma),
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '%' => self.single(TokenKind::Percent),
            '=' => self.one_or_two('=', TokenKind::DblEqual, TokenKind::Equal),
            '>' => self.one_or_two('=', TokenKind::Gte, TokenKind::Gt),
            '<' => self.one_or_two('=', TokenKind::Lte, TokenKind::Lt),
            '!' if self.peek_char(1) == Some('=') => {
                self.advance();
                self.single(TokenKind::Ne)
            }
            '"' | '\'' => TokenKind::String(self.read_string(ch)?),
            c if c.is_ascii_digit() => self.read_number()?,
            c if c.is_ascii_alphabetic() || c == '_' => self.read_symbol(),
            c => {
                return Err(LexError::UnknownText {
                    text: c.to_string(),
                    line,
                });
            }
        };

        tracing::trace!(line, token = %kind, "lexed token");
        Ok(Token::new(kind, line))
    }
}

fn is_simple_escape(c: char) -> bool {
    c.is_ascii_alphabetic() || "._~!=&^-\\?'\"".contains(c)
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(Token {
                kind: TokenKind::Eof,
                ..
            }) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
            token => Some(token),
        }
    }
}

impl FusedIterator for Lexer<'_> {}

#[test]
fn test_keywords_are_case_insensitive() {
    let mut lexer = Lexer::new("select From wHeRe geo_near");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Select);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::From);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Where);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::GeoNear);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_line_tracking() {
    let mut lexer = Lexer::new("a\n/* one\ntwo */ b\n\nc");
    assert_eq!(lexer.next_token().unwrap().line, 1);
    assert_eq!(lexer.next_token().unwrap().line, 3);
    assert_eq!(lexer.next_token().unwrap().line, 5);
}
