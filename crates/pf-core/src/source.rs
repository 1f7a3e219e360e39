//! Source declarations: where a read relation's data comes from.

use crate::expr::Literal;
use serde::{Deserialize, Serialize};

/// A named provenance declaration for tabular data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub kind: SourceKind,
}

/// The supported source variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceKind {
    /// A set of local files or file patterns.
    LocalFiles { items: Vec<FileItem> },
    /// A qualified table name, stored as its segments.
    NamedTable { names: Vec<String> },
    /// Inline literal rows.
    VirtualTable { rows: Vec<Vec<Literal>> },
    /// An extension-defined source with no inline configuration.
    Extension,
}

impl SourceKind {
    /// The canonical textplan keyword for this variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SourceKind::LocalFiles { .. } => "local_files",
            SourceKind::NamedTable { .. } => "named_table",
            SourceKind::VirtualTable { .. } => "virtual_table",
            SourceKind::Extension => "extension_table",
        }
    }
}

/// One entry in a local-file-set source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileItem {
    pub location: FileLocation,
    pub partition_index: Option<u64>,
    pub start: Option<u64>,
    pub length: Option<u64>,
    pub format: Option<FileFormat>,
}

impl FileItem {
    /// A plain item with only a location.
    pub fn at(location: FileLocation) -> Self {
        Self {
            location,
            partition_index: None,
            start: None,
            length: None,
            format: None,
        }
    }
}

/// How a file item names its data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileLocation {
    UriFile(String),
    UriPath(String),
    UriPathGlob(String),
    UriFolder(String),
}

impl FileLocation {
    /// The canonical textplan key for this location kind.
    pub fn key(&self) -> &'static str {
        match self {
            FileLocation::UriFile(_) => "uri_file",
            FileLocation::UriPath(_) => "uri_path",
            FileLocation::UriPathGlob(_) => "uri_path_glob",
            FileLocation::UriFolder(_) => "uri_folder",
        }
    }

    /// The URI or path itself.
    pub fn value(&self) -> &str {
        match self {
            FileLocation::UriFile(v)
            | FileLocation::UriPath(v)
            | FileLocation::UriPathGlob(v)
            | FileLocation::UriFolder(v) => v,
        }
    }
}

/// Declared on-disk format of a file item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Parquet,
    Orc,
}

impl FileFormat {
    /// The canonical textplan key for this format.
    pub fn key(&self) -> &'static str {
        match self {
            FileFormat::Parquet => "parquet",
            FileFormat::Orc => "orc",
        }
    }
}
