//! Lexer: turns plan text into a lazy token stream.
//!
//! The lexer is purely functional over its input: it holds no state beyond
//! the cursor, and tokens are produced on demand. Line comments (`// ...`)
//! are skipped. Numeric and string literals may carry a `_suffix` type tag
//! (`100.0_fp64`); the suffix is captured raw and validated by the parser.

use crate::error::{LexError, LexResult};
use crate::token::{Span, Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;

/// A single-pass token source over a string.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: u32,
    column: u32,
    eof_emitted: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            column: 1,
            eof_emitted: false,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    // Only a comment if followed by a second slash; a lone
                    // slash falls through to the error path in next_token.
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    if lookahead.peek() == Some(&'/') {
                        while let Some(ch) = self.peek() {
                            if ch == '\n' {
                                break;
                            }
                            self.bump();
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    fn is_ident_start(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_ident_continue(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
    }

    fn read_ident(&mut self, first: char) -> String {
        let mut name = String::new();
        name.push(first);
        while let Some(ch) = self.peek() {
            if Self::is_ident_continue(ch) {
                name.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        name
    }

    /// Read an optional `_suffix` type tag after a literal.
    fn read_suffix(&mut self) -> Option<String> {
        if self.peek() != Some('_') {
            return None;
        }
        self.bump();
        let mut suffix = String::new();
        while let Some(ch) = self.peek() {
            if Self::is_ident_continue(ch) {
                suffix.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        Some(suffix)
    }

    fn read_number(&mut self, first: char, span: Span) -> LexResult<Token> {
        let mut text = String::new();
        text.push(first);
        let mut is_float = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.bump();
            } else if ch == '.' {
                // A dot only continues the number when a digit follows;
                // otherwise it is the '.' punctuation token.
                let mut lookahead = self.chars.clone();
                lookahead.next();
                match lookahead.peek() {
                    Some(d) if d.is_ascii_digit() => {
                        is_float = true;
                        text.push(ch);
                        self.bump();
                    }
                    _ => break,
                }
            } else if ch == 'e' || ch == 'E' {
                is_float = true;
                text.push(ch);
                self.bump();
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    text.push(sign);
                    self.bump();
                }
            } else {
                break;
            }
        }

        let suffix = self.read_suffix();

        // Alphabetic characters glued onto a number are a malformed numeral,
        // not an identifier.
        if let Some(ch) = self.peek() {
            if Self::is_ident_continue(ch) {
                while let Some(ch) = self.peek() {
                    if Self::is_ident_continue(ch) {
                        text.push(ch);
                        self.bump();
                    } else {
                        break;
                    }
                }
                return Err(LexError::InvalidNumber { text, span });
            }
        }

        let kind = if is_float {
            let value = text.parse::<f64>().map_err(|_| LexError::InvalidNumber {
                text: text.clone(),
                span,
            })?;
            TokenKind::Float { value, suffix }
        } else {
            let value = text.parse::<i64>().map_err(|_| LexError::InvalidNumber {
                text: text.clone(),
                span,
            })?;
            TokenKind::Integer { value, suffix }
        };
        Ok(Token { kind, span })
    }

    fn read_string(&mut self, span: Span) -> LexResult<Token> {
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(LexError::UnterminatedString { span }),
                Some('\n') => return Err(LexError::UnterminatedString { span }),
                Some('"') => break,
                Some('\\') => {
                    let escape_span = self.span();
                    match self.bump() {
                        Some('"') => value.push('"'),
                        Some('\\') => value.push('\\'),
                        Some('n') => value.push('\n'),
                        Some('r') => value.push('\r'),
                        Some('t') => value.push('\t'),
                        Some(other) => {
                            return Err(LexError::InvalidEscape {
                                escape: other,
                                span: escape_span,
                            })
                        }
                        None => return Err(LexError::UnterminatedString { span }),
                    }
                }
                Some(ch) => value.push(ch),
            }
        }
        let suffix = self.read_suffix();
        Ok(Token {
            kind: TokenKind::Str { value, suffix },
            span,
        })
    }

    /// Produce the next token. At end of input this returns an `Eof` token
    /// (repeatedly, so callers may over-read safely).
    pub fn next_token(&mut self) -> LexResult<Token> {
        self.skip_trivia();
        let span = self.span();

        let Some(ch) = self.bump() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span,
            });
        };

        let kind = match ch {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Equals,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '.' => TokenKind::Dot,
            '"' => return self.read_string(span),
            '-' => match self.peek() {
                Some('>') => {
                    self.bump();
                    TokenKind::Arrow
                }
                Some(d) if d.is_ascii_digit() => {
                    let first = self.bump().unwrap_or('0');
                    let token = self.read_number(first, span)?;
                    return Ok(negate(token, span)?);
                }
                _ => return Err(LexError::UnexpectedCharacter { ch, span }),
            },
            _ if ch.is_ascii_digit() => return self.read_number(ch, span),
            _ if Self::is_ident_start(ch) => TokenKind::Ident(self.read_ident(ch)),
            _ => return Err(LexError::UnexpectedCharacter { ch, span }),
        };

        Ok(Token { kind, span })
    }
}

fn negate(token: Token, span: Span) -> LexResult<Token> {
    let kind = match token.kind {
        TokenKind::Integer { value, suffix } => TokenKind::Integer {
            value: -value,
            suffix,
        },
        TokenKind::Float { value, suffix } => TokenKind::Float {
            value: -value,
            suffix,
        },
        other => {
            return Err(LexError::InvalidNumber {
                text: other.describe(),
                span,
            })
        }
    };
    Ok(Token { kind, span })
}

impl Iterator for Lexer<'_> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_emitted {
            return None;
        }
        match self.next_token() {
            Ok(token) => {
                if token.kind == TokenKind::Eof {
                    self.eof_emitted = true;
                }
                Some(Ok(token))
            }
            Err(err) => {
                self.eof_emitted = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod tests;
