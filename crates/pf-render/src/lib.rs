//! pf-render - Canonical text rendering for PlanForge
//!
//! This crate turns a resolved plan back into plan text. The output is
//! canonical: one fixed surface syntax, one fixed layout, so equal plans
//! always render to identical text.

pub mod error;
pub mod renderer;

pub use error::{RenderError, RenderResult};
pub use renderer::render_plan;
