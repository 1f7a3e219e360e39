//! The closed type system used by schema fields, literals, and casts.
//!
//! Types follow the textplan surface syntax: a primitive name with optional
//! nullability marker (`i32?`) and optional parameter list (`decimal<10,2>`),
//! plus the `list`, `map`, and `struct` compound forms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive type kinds recognised by the plan grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Fp32,
    Fp64,
    String,
    Binary,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Uuid,
    IntervalYear,
    IntervalDay,
    Decimal,
    Varchar,
    FixedChar,
}

impl PrimitiveKind {
    /// Look up a primitive kind from its textplan name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Self::Bool,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "fp32" => Self::Fp32,
            "fp64" => Self::Fp64,
            "string" => Self::String,
            "binary" => Self::Binary,
            "date" => Self::Date,
            "time" => Self::Time,
            "timestamp" => Self::Timestamp,
            "timestamp_tz" => Self::TimestampTz,
            "uuid" => Self::Uuid,
            "interval_year" => Self::IntervalYear,
            "interval_day" => Self::IntervalDay,
            "decimal" => Self::Decimal,
            "varchar" => Self::Varchar,
            "fixedchar" => Self::FixedChar,
            _ => return None,
        };
        Some(kind)
    }

    /// The canonical textplan name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Fp32 => "fp32",
            Self::Fp64 => "fp64",
            Self::String => "string",
            Self::Binary => "binary",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::TimestampTz => "timestamp_tz",
            Self::Uuid => "uuid",
            Self::IntervalYear => "interval_year",
            Self::IntervalDay => "interval_day",
            Self::Decimal => "decimal",
            Self::Varchar => "varchar",
            Self::FixedChar => "fixedchar",
        }
    }

    /// Wire tag used by the binary format. Stable across releases.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Bool => 0,
            Self::I8 => 1,
            Self::I16 => 2,
            Self::I32 => 3,
            Self::I64 => 4,
            Self::Fp32 => 5,
            Self::Fp64 => 6,
            Self::String => 7,
            Self::Binary => 8,
            Self::Date => 9,
            Self::Time => 10,
            Self::Timestamp => 11,
            Self::TimestampTz => 12,
            Self::Uuid => 13,
            Self::IntervalYear => 14,
            Self::IntervalDay => 15,
            Self::Decimal => 16,
            Self::Varchar => 17,
            Self::FixedChar => 18,
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(tag: u8) -> Option<Self> {
        let kind = match tag {
            0 => Self::Bool,
            1 => Self::I8,
            2 => Self::I16,
            3 => Self::I32,
            4 => Self::I64,
            5 => Self::Fp32,
            6 => Self::Fp64,
            7 => Self::String,
            8 => Self::Binary,
            9 => Self::Date,
            10 => Self::Time,
            11 => Self::Timestamp,
            12 => Self::TimestampTz,
            13 => Self::Uuid,
            14 => Self::IntervalYear,
            15 => Self::IntervalDay,
            16 => Self::Decimal,
            17 => Self::Varchar,
            18 => Self::FixedChar,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully specified type as it appears in schemas and expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// A primitive type, optionally parameterised (`decimal<10,2>`, `varchar<100>`).
    Simple {
        kind: PrimitiveKind,
        nullable: bool,
        params: Vec<u32>,
    },
    /// `list<T>`
    List { nullable: bool, element: Box<Type> },
    /// `map<K, V>`
    Map {
        nullable: bool,
        key: Box<Type>,
        value: Box<Type>,
    },
    /// `struct<T1, T2, ...>`
    Struct { nullable: bool, fields: Vec<Type> },
}

impl Type {
    /// A non-nullable, unparameterised primitive type.
    pub fn simple(kind: PrimitiveKind) -> Self {
        Self::Simple {
            kind,
            nullable: false,
            params: Vec::new(),
        }
    }

    /// Whether this type admits nulls.
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Simple { nullable, .. }
            | Self::List { nullable, .. }
            | Self::Map { nullable, .. }
            | Self::Struct { nullable, .. } => *nullable,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn null_mark(nullable: bool) -> &'static str {
            if nullable {
                "?"
            } else {
                ""
            }
        }

        match self {
            Type::Simple {
                kind,
                nullable,
                params,
            } => {
                write!(f, "{}{}", kind.name(), null_mark(*nullable))?;
                if !params.is_empty() {
                    let rendered: Vec<String> = params.iter().map(|p| p.to_string()).collect();
                    write!(f, "<{}>", rendered.join(","))?;
                }
                Ok(())
            }
            Type::List { nullable, element } => {
                write!(f, "list{}<{}>", null_mark(*nullable), element)
            }
            Type::Map {
                nullable,
                key,
                value,
            } => {
                write!(f, "map{}<{}, {}>", null_mark(*nullable), key, value)
            }
            Type::Struct { nullable, fields } => {
                let rendered: Vec<String> = fields.iter().map(|t| t.to_string()).collect();
                write!(f, "struct{}<{}>", null_mark(*nullable), rendered.join(", "))
            }
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
