//! Concrete syntax tree: declarations as parsed, before name resolution.
//!
//! Both surface grammars (legacy uppercase `ROOT { NAMES = [...] }` form and
//! the lowercase pipeline form) populate these same node kinds; nothing
//! downstream of the parser knows which syntax family the input used.

use crate::token::Span;
use pf_core::{Expr, Field, Measure, SortField, SourceKind};

/// A name reference with the span it was written at.
#[derive(Debug, Clone, PartialEq)]
pub struct NameRef {
    pub name: String,
    pub span: Span,
}

/// One top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Schema(SchemaDecl),
    Source(SourceDecl),
    Relation(RelationDecl),
    Root(RootDecl),
    Pipelines(PipelinesDecl),
}

/// `schema NAME { field type; ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDecl {
    pub name: String,
    pub span: Span,
    pub fields: Vec<Field>,
}

/// `source KIND NAME { ... }`
///
/// Source bodies reference nothing, so the parsed [`SourceKind`] is already
/// in its final IR shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDecl {
    pub name: String,
    pub span: Span,
    pub kind: SourceKind,
}

/// The relation kinds the grammar recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKindName {
    Read,
    Filter,
    Project,
    Join,
    Aggregate,
    Sort,
}

impl RelationKindName {
    /// Look up a relation kind from its keyword (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "read" => Self::Read,
            "filter" => Self::Filter,
            "project" => Self::Project,
            "join" => Self::Join,
            "aggregate" => Self::Aggregate,
            "sort" => Self::Sort,
            _ => return None,
        };
        Some(kind)
    }
}

/// `KIND relation NAME { details }`
///
/// Details are collected permissively; the resolver checks which ones the
/// declared kind actually requires or forbids.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDecl {
    pub kind: RelationKindName,
    pub name: String,
    pub span: Span,
    pub source: Option<NameRef>,
    pub base_schema: Option<NameRef>,
    pub input: Option<NameRef>,
    pub left: Option<NameRef>,
    pub right: Option<NameRef>,
    pub join_type: Option<NameRef>,
    pub filter: Option<Expr>,
    pub expressions: Vec<(Expr, Option<String>)>,
    pub groupings: Vec<Expr>,
    pub measures: Vec<Measure>,
    pub sorts: Vec<SortField>,
    pub emits: Vec<String>,
}

impl RelationDecl {
    pub fn new(kind: RelationKindName, name: String, span: Span) -> Self {
        Self {
            kind,
            name,
            span,
            source: None,
            base_schema: None,
            input: None,
            left: None,
            right: None,
            join_type: None,
            filter: None,
            expressions: Vec::new(),
            groupings: Vec::new(),
            measures: Vec::new(),
            sorts: Vec::new(),
            emits: Vec::new(),
        }
    }
}

/// `root { names = [a, b] }`
#[derive(Debug, Clone, PartialEq)]
pub struct RootDecl {
    pub span: Span,
    pub names: Vec<NameRef>,
}

/// One edge of a `pipelines { a -> b; }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NameRef,
    pub to: NameRef,
}

/// `pipelines { a -> b; b -> root; }`
#[derive(Debug, Clone, PartialEq)]
pub struct PipelinesDecl {
    pub span: Span,
    pub edges: Vec<Edge>,
}
