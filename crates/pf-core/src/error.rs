//! Error types for pf-core

use thiserror::Error;

/// Structural plan invariant violations.
///
/// These are raised when a [`Plan`](crate::plan::Plan) fails validation:
/// an index points outside its arena, the relation graph contains a cycle,
/// or the root list is empty. A plan produced by the resolver never
/// violates them; decoded or hand-built plans may.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A relation references a schema index outside the schema arena
    #[error("relation '{relation}' references undefined schema index {index}")]
    DanglingSchema { relation: String, index: u32 },

    /// A relation references a source index outside the source arena
    #[error("relation '{relation}' references undefined source index {index}")]
    DanglingSource { relation: String, index: u32 },

    /// A relation references an input index outside the relation arena
    #[error("relation '{relation}' references undefined relation index {index}")]
    DanglingInput { relation: String, index: u32 },

    /// A root entry references a relation index outside the relation arena
    #[error("root list references undefined relation index {index}")]
    DanglingRoot { index: u32 },

    /// The relation graph is not acyclic
    #[error("circular relation reference: {cycle}")]
    CircularReference { cycle: String },

    /// The root list is empty
    #[error("plan has no root relations")]
    NoRoots,
}

/// Result type alias for PlanError
pub type PlanResult<T> = Result<T, PlanError>;
