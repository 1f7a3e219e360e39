//! Expression trees used inside relations (filter conditions, projections,
//! groupings, and measures).
//!
//! Expressions are fully self-contained: column references stay as names and
//! never point at other plan entities, so they need no resolution pass.

use crate::types::Type;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed literal constant.
///
/// The optional type annotation mirrors the textplan `_suffix` syntax
/// (`100.0_fp64`) and is preserved verbatim through round trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// `null`, optionally typed.
    Null(Option<Type>),
    Bool(bool),
    Integer { value: i64, ty: Option<Type> },
    Float { value: f64, ty: Option<Type> },
    String { value: String, ty: Option<Type> },
}

impl Literal {
    /// The explicit type annotation, if one was written.
    pub fn annotation(&self) -> Option<&Type> {
        match self {
            Literal::Null(ty) => ty.as_ref(),
            Literal::Bool(_) => None,
            Literal::Integer { ty, .. }
            | Literal::Float { ty, .. }
            | Literal::String { ty, .. } => ty.as_ref(),
        }
    }
}

/// A node in an expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    /// A field reference, optionally qualified (`orders.id`).
    Column {
        qualifier: Option<String>,
        name: String,
    },
    /// A function call with an optional declared output type (`sum(x) -> i64`).
    Call {
        function: String,
        args: Vec<Expr>,
        output_type: Option<Type>,
    },
    /// An explicit cast (`x AS i64`).
    Cast { expr: Box<Expr>, ty: Type },
}

/// Escape a string for inclusion in textplan source.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Format a float so it re-lexes as a float, never as an integer.
fn format_float(value: f64) -> String {
    let text = format!("{}", value);
    if text.contains('.') || text.contains('e') || text.contains("inf") || text.contains("NaN") {
        text
    } else {
        format!("{}.0", text)
    }
}

fn write_annotation(f: &mut fmt::Formatter<'_>, ty: &Option<Type>) -> fmt::Result {
    if let Some(ty) = ty {
        write!(f, "_{}", ty)?;
    }
    Ok(())
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null(ty) => {
                f.write_str("null")?;
                write_annotation(f, ty)
            }
            Literal::Bool(true) => f.write_str("true"),
            Literal::Bool(false) => f.write_str("false"),
            Literal::Integer { value, ty } => {
                write!(f, "{}", value)?;
                write_annotation(f, ty)
            }
            Literal::Float { value, ty } => {
                f.write_str(&format_float(*value))?;
                write_annotation(f, ty)
            }
            Literal::String { value, ty } => {
                write!(f, "\"{}\"", escape_string(value))?;
                write_annotation(f, ty)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Column { qualifier, name } => {
                if let Some(q) = qualifier {
                    write!(f, "{}.{}", q, name)
                } else {
                    f.write_str(name)
                }
            }
            Expr::Call {
                function,
                args,
                output_type,
            } => {
                let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function, rendered.join(", "))?;
                if let Some(ty) = output_type {
                    write!(f, " -> {}", ty)?;
                }
                Ok(())
            }
            Expr::Cast { expr, ty } => write!(f, "{} as {}", expr, ty),
        }
    }
}

#[cfg(test)]
#[path = "expr_test.rs"]
mod tests;
