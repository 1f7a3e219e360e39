//! pf-binary - Binary plan wire format for PlanForge
//!
//! This crate serialises the plan IR into a self-describing binary envelope
//! and reconstructs it again. Encoding is deterministic: equal plans produce
//! byte-identical output. The decoder validates the envelope checksum and
//! every record boundary before handing back a structurally valid plan.

pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
mod reader;
mod writer;

pub use decode::decode_plan;
pub use encode::encode_plan;
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
