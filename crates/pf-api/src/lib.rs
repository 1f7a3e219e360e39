//! pf-api - Public facade for PlanForge
//!
//! One call per boundary operation: plan text to binary, binary back to
//! canonical text, and JSON import/export of the IR. Every call is
//! stateless and all-or-nothing; no partially converted output ever
//! escapes.

use thiserror::Error;

pub use pf_binary::{decode_plan, encode_plan, DecodeError, EncodeError};
pub use pf_core::{
    Expr, Field, JoinType, Literal, Measure, NamedExpr, Plan, PlanError, PrimitiveKind, Relation,
    RelationId, RelationKind, Schema, SchemaId, SortDirection, SortField, Source, SourceId,
    SourceKind, Type,
};
pub use pf_parser::{ParseError, ResolveError};
pub use pf_render::{render_plan, RenderError};

/// Any failure from any conversion stage.
#[derive(Error, Debug)]
pub enum PlanForgeError {
    /// Plan text failed to lex or parse
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Plan text parsed but its names failed to resolve
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The IR could not be encoded
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The binary buffer could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The IR could not be rendered back to text
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A plan imported from JSON failed structural validation
    #[error("imported plan is structurally invalid: {0}")]
    InvalidPlan(#[from] PlanError),

    /// JSON import/export failure
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for PlanForgeError
pub type PlanForgeResult<T> = Result<T, PlanForgeError>;

/// Parse plan text (either surface syntax) into the IR.
pub fn parse_text_to_plan(text: &str) -> PlanForgeResult<Plan> {
    let decls = pf_parser::parse(text)?;
    Ok(pf_parser::resolve(decls)?)
}

/// Parse plan text and encode it into the binary wire format.
pub fn parse_text_to_binary(text: &str) -> PlanForgeResult<Vec<u8>> {
    let plan = parse_text_to_plan(text)?;
    Ok(pf_binary::encode_plan(&plan)?)
}

/// Decode a binary plan buffer back into the IR.
pub fn decode_binary_to_plan(bytes: &[u8]) -> PlanForgeResult<Plan> {
    Ok(pf_binary::decode_plan(bytes)?)
}

/// Render the IR as canonical plan text.
pub fn render_plan_to_text(plan: &Plan) -> PlanForgeResult<String> {
    Ok(pf_render::render_plan(plan)?)
}

/// Decode a binary plan buffer and render it as canonical plan text.
pub fn render_binary_to_text(bytes: &[u8]) -> PlanForgeResult<String> {
    let plan = pf_binary::decode_plan(bytes)?;
    Ok(pf_render::render_plan(&plan)?)
}

/// Export the IR as pretty-printed JSON.
pub fn plan_to_json(plan: &Plan) -> PlanForgeResult<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Import the IR from JSON, re-validating its structure.
pub fn plan_from_json(json: &str) -> PlanForgeResult<Plan> {
    let plan: Plan = serde_json::from_str(json)?;
    plan.validate()?;
    Ok(plan)
}
