//! Tokens produced by the lexer.

use std::fmt;

/// Source position of a token, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The kind of a lexed token.
///
/// Numeric and string literals carry their optional `_suffix` type tag as
/// raw text; the parser validates it against the type system.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Integer { value: i64, suffix: Option<String> },
    Float { value: f64, suffix: Option<String> },
    Str { value: String, suffix: Option<String> },
    Arrow,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Semi,
    Comma,
    Equals,
    Colon,
    Question,
    Lt,
    Gt,
    Dot,
    Eof,
}

impl TokenKind {
    /// Short human-readable description used in parse errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier '{}'", name),
            TokenKind::Integer { value, .. } => format!("integer '{}'", value),
            TokenKind::Float { value, .. } => format!("float '{}'", value),
            TokenKind::Str { value, .. } => format!("string \"{}\"", value),
            TokenKind::Arrow => "'->'".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Semi => "';'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Equals => "'='".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Question => "'?'".to_string(),
            TokenKind::Lt => "'<'".to_string(),
            TokenKind::Gt => "'>'".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Whether this token is an identifier equal to `keyword`, ignoring
    /// ASCII case. This is how both surface grammars are accepted without
    /// a mode flag: keywords match in either case, identifiers stay exact.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(name) if name.eq_ignore_ascii_case(keyword))
    }
}
