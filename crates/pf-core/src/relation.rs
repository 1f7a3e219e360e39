//! Relation nodes: the operators that make up a plan's graph.
//!
//! Relations reference their inputs through [`RelationId`] arena indices
//! rather than names; the resolver is the only place name lookup happens.

use crate::expr::Expr;
use crate::plan::{RelationId, SchemaId, SourceId};
use crate::types::Type;
use serde::{Deserialize, Serialize};

/// A named operator in the plan graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub name: String,
    pub kind: RelationKind,
}

impl Relation {
    /// The ids of this relation's inputs, in declaration order.
    pub fn inputs(&self) -> Vec<RelationId> {
        match &self.kind {
            RelationKind::Read { .. } => Vec::new(),
            RelationKind::Filter { input, .. }
            | RelationKind::Project { input, .. }
            | RelationKind::Aggregate { input, .. }
            | RelationKind::Sort { input, .. } => vec![*input],
            RelationKind::Join { left, right, .. } => vec![*left, *right],
        }
    }

    /// The canonical textplan keyword for this relation's kind.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            RelationKind::Read { .. } => "read",
            RelationKind::Filter { .. } => "filter",
            RelationKind::Project { .. } => "project",
            RelationKind::Join { .. } => "join",
            RelationKind::Aggregate { .. } => "aggregate",
            RelationKind::Sort { .. } => "sort",
        }
    }
}

/// The supported relation variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RelationKind {
    /// Reads rows from a source, shaped by a schema.
    Read { schema: SchemaId, source: SourceId },
    /// Keeps rows matching a boolean condition.
    Filter { input: RelationId, condition: Expr },
    /// Computes expressions over its input and optionally narrows the output.
    Project {
        input: RelationId,
        expressions: Vec<NamedExpr>,
        emits: Vec<String>,
    },
    /// Joins two inputs on an optional condition.
    Join {
        left: RelationId,
        right: RelationId,
        join_type: JoinType,
        condition: Option<Expr>,
    },
    /// Groups its input and computes measures per group.
    Aggregate {
        input: RelationId,
        groupings: Vec<Expr>,
        measures: Vec<Measure>,
    },
    /// Orders its input by one or more sort fields.
    Sort {
        input: RelationId,
        fields: Vec<SortField>,
    },
}

/// An expression with an optional output name (`expression add(x, 1) named bumped;`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedExpr {
    pub expr: Expr,
    pub name: Option<String>,
}

/// One aggregate measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub expr: Expr,
    pub output_type: Option<Type>,
    pub name: Option<String>,
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortField {
    pub expr: Expr,
    pub direction: Option<SortDirection>,
}

/// Sort order for a sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
    AscNullsFirst,
    AscNullsLast,
    DescNullsFirst,
    DescNullsLast,
}

impl SortDirection {
    /// Look up a direction from its textplan name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let dir = match name.to_ascii_lowercase().as_str() {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            "asc_nulls_first" => Self::AscNullsFirst,
            "asc_nulls_last" => Self::AscNullsLast,
            "desc_nulls_first" => Self::DescNullsFirst,
            "desc_nulls_last" => Self::DescNullsLast,
            _ => return None,
        };
        Some(dir)
    }

    /// The canonical textplan name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::AscNullsFirst => "asc_nulls_first",
            Self::AscNullsLast => "asc_nulls_last",
            Self::DescNullsFirst => "desc_nulls_first",
            Self::DescNullsLast => "desc_nulls_last",
        }
    }

    /// Wire tag used by the binary format.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Asc => 0,
            Self::Desc => 1,
            Self::AscNullsFirst => 2,
            Self::AscNullsLast => 3,
            Self::DescNullsFirst => 4,
            Self::DescNullsLast => 5,
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(tag: u8) -> Option<Self> {
        let dir = match tag {
            0 => Self::Asc,
            1 => Self::Desc,
            2 => Self::AscNullsFirst,
            3 => Self::AscNullsLast,
            4 => Self::DescNullsFirst,
            5 => Self::DescNullsLast,
            _ => return None,
        };
        Some(dir)
    }
}

/// Join variant for a join relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Outer,
    Semi,
    Anti,
}

impl JoinType {
    /// Look up a join type from its textplan name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let join = match name.to_ascii_lowercase().as_str() {
            "inner" => Self::Inner,
            "left" => Self::Left,
            "right" => Self::Right,
            "outer" => Self::Outer,
            "semi" => Self::Semi,
            "anti" => Self::Anti,
            _ => return None,
        };
        Some(join)
    }

    /// The canonical textplan name for this join type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Left => "left",
            Self::Right => "right",
            Self::Outer => "outer",
            Self::Semi => "semi",
            Self::Anti => "anti",
        }
    }

    /// Wire tag used by the binary format.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Inner => 0,
            Self::Left => 1,
            Self::Right => 2,
            Self::Outer => 3,
            Self::Semi => 4,
            Self::Anti => 5,
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(tag: u8) -> Option<Self> {
        let join = match tag {
            0 => Self::Inner,
            1 => Self::Left,
            2 => Self::Right,
            3 => Self::Outer,
            4 => Self::Semi,
            5 => Self::Anti,
            _ => return None,
        };
        Some(join)
    }
}
