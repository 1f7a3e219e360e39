//! Error types for pf-parser

use crate::token::Span;
use thiserror::Error;

/// Lexing errors: malformed tokens.
#[derive(Error, Debug)]
pub enum LexError {
    /// String literal never closed
    #[error("unterminated string literal at {span}")]
    UnterminatedString { span: Span },

    /// Unknown escape sequence inside a string literal
    #[error("invalid escape sequence '\\{escape}' at {span}")]
    InvalidEscape { escape: char, span: Span },

    /// Numeric literal that does not parse
    #[error("malformed number '{text}' at {span}")]
    InvalidNumber { text: String, span: Span },

    /// Character with no meaning in the grammar
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedCharacter { ch: char, span: Span },
}

/// Result type alias for LexError
pub type LexResult<T> = Result<T, LexError>;

/// Parsing errors: malformed structure.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Lexer failure surfaced through the parser
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The catch-all expected-vs-found error
    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    /// Top-level keyword that starts no known declaration
    #[error("unknown declaration '{keyword}' at {span}")]
    UnknownDeclaration { keyword: String, span: Span },

    /// Source kind outside the supported set
    #[error("unknown source kind '{kind}' at {span}")]
    UnknownSourceKind { kind: String, span: Span },

    /// Type name outside the closed type set
    #[error("unknown type '{name}' at {span}")]
    UnknownType { name: String, span: Span },

    /// Literal carries a type suffix that names no known type
    #[error("unknown literal type suffix '{suffix}' at {span}")]
    UnknownLiteralSuffix { suffix: String, span: Span },

    /// Sort direction outside the supported set
    #[error("unknown sort direction '{name}' at {span}")]
    UnknownSortDirection { name: String, span: Span },

    /// A relation detail that may appear at most once appeared again
    #[error("duplicate '{detail}' detail at {span}")]
    DuplicateDetail { detail: String, span: Span },

    /// A local-file item without a location
    #[error("file item is missing a location (uri_file, uri_path, uri_path_glob, or uri_folder) at {span}")]
    MissingFileLocation { span: Span },

    /// Input with no declarations; an empty plan cannot have roots
    #[error("plan text contains no declarations")]
    EmptyPlan,
}

/// Result type alias for ParseError
pub type ParseResult<T> = Result<T, ParseError>;

/// Resolution errors: undefined or duplicate symbols, bad references.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A reference names nothing in its namespace
    #[error("undefined {kind} '{name}' referenced at {span}")]
    UndefinedSymbol {
        kind: &'static str,
        name: String,
        span: Span,
    },

    /// Two declarations share a name within one namespace
    #[error("duplicate {kind} '{name}' declared at {span}")]
    DuplicateSymbol {
        kind: &'static str,
        name: String,
        span: Span,
    },

    /// Two fields share a name within one schema
    #[error("duplicate field '{field}' in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    /// The relation graph is not acyclic
    #[error("circular relation reference: {cycle}")]
    CyclicReference { cycle: String },

    /// Explicit input details and pipeline edges disagree
    #[error("relation '{relation}' has conflicting inputs '{first}' and '{second}'")]
    ConflictingInput {
        relation: String,
        first: String,
        second: String,
    },

    /// A pipeline edge feeds a relation that takes no input
    #[error("relation '{relation}' takes no input but receives '{input}'")]
    UnexpectedInput { relation: String, input: String },

    /// A required relation detail is absent
    #[error("relation '{relation}' is missing required detail '{detail}'")]
    MissingDetail {
        relation: String,
        detail: &'static str,
    },

    /// Join type outside the supported set
    #[error("unknown join type '{name}' at {span}")]
    UnknownJoinType { name: String, span: Span },

    /// The explicit root list repeats a name
    #[error("duplicate root relation '{name}'")]
    DuplicateRoot { name: String },

    /// `root` is the pipeline sentinel and cannot be declared
    #[error("'root' is reserved and cannot name a relation (declared at {span})")]
    ReservedName { span: Span },

    /// No root declaration and no pipeline edge into the sentinel
    #[error("plan has no root relations")]
    NoRoots,
}

/// Result type alias for ResolveError
pub type ResolveResult<T> = Result<T, ResolveError>;
