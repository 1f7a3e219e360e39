//! Wire format constants.
//!
//! The envelope is `[payload_len: u32 LE] [payload] [crc32(payload): u32 LE]`.
//! The payload opens with a four-byte magic marker and a version, then the
//! schema, source, relation, and root sections. Every schema, source, and
//! relation record is length-prefixed so the decoder can validate structure
//! without interpreting the record first. All cross-references are u32 arena
//! indices; names only appear on declarations.

/// Format marker at the start of every payload.
pub const MAGIC: [u8; 4] = *b"PFPL";

/// Current wire format version.
pub const VERSION: u16 = 1;

// Source variant tags
pub const SOURCE_LOCAL_FILES: u8 = 0;
pub const SOURCE_NAMED_TABLE: u8 = 1;
pub const SOURCE_VIRTUAL_TABLE: u8 = 2;
pub const SOURCE_EXTENSION: u8 = 3;

// Relation variant tags
pub const REL_READ: u8 = 0;
pub const REL_FILTER: u8 = 1;
pub const REL_PROJECT: u8 = 2;
pub const REL_JOIN: u8 = 3;
pub const REL_AGGREGATE: u8 = 4;
pub const REL_SORT: u8 = 5;

// Type shape tags
pub const TYPE_SIMPLE: u8 = 0;
pub const TYPE_LIST: u8 = 1;
pub const TYPE_MAP: u8 = 2;
pub const TYPE_STRUCT: u8 = 3;

// Expression tags
pub const EXPR_LITERAL: u8 = 0;
pub const EXPR_COLUMN: u8 = 1;
pub const EXPR_CALL: u8 = 2;
pub const EXPR_CAST: u8 = 3;

// Literal tags
pub const LIT_NULL: u8 = 0;
pub const LIT_BOOL: u8 = 1;
pub const LIT_INTEGER: u8 = 2;
pub const LIT_FLOAT: u8 = 3;
pub const LIT_STRING: u8 = 4;

// File location tags
pub const LOC_URI_FILE: u8 = 0;
pub const LOC_URI_PATH: u8 = 1;
pub const LOC_URI_PATH_GLOB: u8 = 2;
pub const LOC_URI_FOLDER: u8 = 3;

// File format tags
pub const FILE_FORMAT_PARQUET: u8 = 0;
pub const FILE_FORMAT_ORC: u8 = 1;
