//! pf-parser - Parsing layer for PlanForge
//!
//! This crate turns plan text into the plan IR in three stages: the lexer
//! produces a lazy token stream, the grammar parser builds a concrete syntax
//! tree accepting both recognised surface syntaxes, and the resolver binds
//! every name reference into arena indices.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod token;

pub use error::{LexError, ParseError, ResolveError};
pub use lexer::Lexer;
pub use parser::parse;
pub use resolver::resolve;
pub use token::{Span, Token, TokenKind};
