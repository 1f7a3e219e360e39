//! Error types for pf-binary

use pf_core::PlanError;
use thiserror::Error;

/// Encoder-internal invariant violations.
///
/// A plan that came out of the resolver never triggers these; hand-built
/// plans with dangling indices do. The encoder does not otherwise
/// re-validate its input.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The plan failed structural validation before encoding
    #[error("plan violates encoder invariants: {0}")]
    InvalidPlan(#[from] PlanError),
}

/// Result type alias for EncodeError
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Decoding errors: malformed, truncated, or unrecognised binary input.
///
/// Decoding is all-or-nothing; none of these leave a partially built plan
/// visible to the caller.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Zero-length input buffer
    #[error("binary plan buffer is empty")]
    EmptyBuffer,

    /// Buffer ends before a field it promises
    #[error("binary plan buffer is truncated ({needed} more bytes needed)")]
    Truncated { needed: usize },

    /// Envelope length prefix disagrees with the buffer
    #[error("envelope declares {declared} payload bytes but {actual} are present")]
    LengthMismatch { declared: usize, actual: usize },

    /// Payload checksum does not match
    #[error("payload checksum mismatch (stored {stored:#010x}, computed {computed:#010x})")]
    ChecksumMismatch { stored: u32, computed: u32 },

    /// Payload does not start with the format marker
    #[error("unrecognized format marker")]
    BadMagic,

    /// Version this build does not understand
    #[error("unsupported format version {version}")]
    UnsupportedVersion { version: u16 },

    /// Variant tag outside the known set
    #[error("unknown {what} tag {tag}")]
    UnknownTag { what: &'static str, tag: u8 },

    /// Record with trailing or missing bytes
    #[error("malformed {what} record")]
    MalformedRecord { what: &'static str },

    /// String field with invalid UTF-8
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    /// Decoded plan fails structural validation (dangling index, cycle,
    /// empty root list)
    #[error("decoded plan is structurally invalid: {0}")]
    InvalidPlan(#[from] PlanError),
}

/// Result type alias for DecodeError
pub type DecodeResult<T> = Result<T, DecodeError>;
