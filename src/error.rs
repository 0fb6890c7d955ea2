use std::path::PathBuf;

use crate::schema::type_ref::TypeRefParseError;

/// Where a field reference sits, as `Owner.field`, or `<root>` for a render entry point.
pub type FieldPath = String;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("unknown type `{type_name}` referenced by {field}")]
    UnknownType { type_name: String, field: FieldPath },

    #[error("nesting deeper than {limit} object levels at {path} (self-referential type?)")]
    DepthExceeded { limit: usize, path: FieldPath },
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema document {}: {message}", path.display())]
    Json { path: PathBuf, message: String },

    #[error("JSON pointer `{pointer}` selects nothing in {}", path.display())]
    Pointer { path: PathBuf, pointer: String },

    #[error("type `{name}` is declared more than once")]
    DuplicateType { name: String },

    #[error("field `{owner}.{field}` has malformed type `{notation}`: {source}")]
    InvalidTypeRef {
        owner: String,
        field: String,
        notation: String,
        #[source]
        source: TypeRefParseError,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
