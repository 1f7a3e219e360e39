//! pf-core - Core library for PlanForge
//!
//! This crate provides the plan IR (schemas, sources, relations, roots), the
//! type system, expression trees, structural validation, and the relation
//! graph used for cycle detection and topological ordering.

pub mod error;
pub mod expr;
pub mod graph;
pub mod plan;
pub mod relation;
pub mod source;
pub mod types;

pub use error::{PlanError, PlanResult};
pub use expr::{escape_string, Expr, Literal};
pub use graph::RelationGraph;
pub use plan::{Field, Plan, RelationId, Schema, SchemaId, SourceId};
pub use relation::{
    JoinType, Measure, NamedExpr, Relation, RelationKind, SortDirection, SortField,
};
pub use source::{FileFormat, FileItem, FileLocation, Source, SourceKind};
pub use types::{PrimitiveKind, Type};
