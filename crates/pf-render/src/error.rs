//! Error types for pf-render

use pf_core::PlanError;
use thiserror::Error;

/// Rendering failures.
///
/// The renderer only rejects plans that fail structural validation; any
/// valid plan renders successfully.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The plan failed structural validation before rendering
    #[error("plan cannot be rendered: {0}")]
    InvalidPlan(#[from] PlanError),
}

/// Result type alias for RenderError
pub type RenderResult<T> = Result<T, RenderError>;
