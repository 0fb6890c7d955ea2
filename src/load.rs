//! Schema snapshot documents (JSON) → [`Registry`].
//!
//! ```json
//! { "types": [
//!     { "kind": "object", "name": "Post", "directives": ["md"],
//!       "fields": { "title": "String!", "tags": "[String]" } },
//!     { "kind": "enum", "name": "Role", "values": ["ADMIN", "USER"] },
//!     { "kind": "scalar", "name": "DateTime" }
//! ] }
//! ```
//!
//! Field types use the `[Type!]!` notation. Several documents merge into a
//! single registry in load order.
use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::SchemaError;
use crate::path_de;
use crate::schema::{
    is_builtin_scalar, CompositeKind, CompositeType, Directive, EnumType, Field, NamedType, Registry,
    ScalarType, TypeRef,
};

// ————————————————————————————————————————————————————————————————————————————
// DOCUMENT FORMAT
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDocument {
    types: Vec<TypeDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TypeDecl {
    Object(CompositeDecl),
    Interface(CompositeDecl),
    Enum(EnumDecl),
    Scalar(ScalarDecl),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CompositeDecl {
    name: String,
    #[serde(default)]
    directives: Vec<DirectiveDecl>,
    /// Field name → type notation, in document order.
    #[serde(default)]
    fields: IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnumDecl {
    name: String,
    #[serde(default)]
    values: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScalarDecl {
    name: String,
}

/// `"md"` or `{ "name": "md", "args": { ... } }`; arguments are ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DirectiveDecl {
    Bare(String),
    Full {
        name: String,
        #[serde(default)]
        #[allow(dead_code)]
        args: serde_json::Value,
    },
}

// ————————————————————————————————————————————————————————————————————————————
// LOADER
// ————————————————————————————————————————————————————————————————————————————

/// Accumulates documents into one registry.
#[derive(Debug)]
pub struct Loader {
    registry: Registry,
    declared: HashSet<String>,
    json_pointer: Option<String>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            declared: HashSet::new(),
            json_pointer: None,
        }
    }

    /// Select a sub-node (e.g. `/data/schema`) of every document before reading it.
    pub fn with_json_pointer(mut self, pointer: Option<String>) -> Self {
        self.json_pointer = pointer;
        self
    }

    pub fn load_path(&mut self, path: &Path) -> Result<(), SchemaError> {
        tracing::debug!(path = %path.display(), "loading schema document");
        let source = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&source, path)
    }

    /// `origin` is only used in error messages.
    pub fn load_str(&mut self, source: &str, origin: &Path) -> Result<(), SchemaError> {
        let json_error = |message: String| SchemaError::Json {
            path: origin.to_path_buf(),
            message,
        };
        let document = match self.json_pointer.as_deref() {
            None => path_de::from_str_with_path::<SchemaDocument>(source).map_err(json_error)?,
            Some(pointer) => {
                let mut value = serde_json::from_str::<serde_json::Value>(source)
                    .map_err(|error| json_error(error.to_string()))?;
                let node = value.pointer_mut(pointer).ok_or_else(|| SchemaError::Pointer {
                    path: origin.to_path_buf(),
                    pointer: pointer.to_string(),
                })?;
                path_de::from_value_with_path::<SchemaDocument>(node.take()).map_err(json_error)?
            }
        };
        for decl in document.types {
            self.declare(decl)?;
        }
        Ok(())
    }

    pub fn finish(self) -> Registry {
        self.registry
    }

    fn declare(&mut self, decl: TypeDecl) -> Result<(), SchemaError> {
        let ty = match decl {
            TypeDecl::Object(c) => NamedType::Composite(composite(c, CompositeKind::Object)?),
            TypeDecl::Interface(c) => NamedType::Composite(composite(c, CompositeKind::Interface)?),
            TypeDecl::Enum(e) => NamedType::Enum(EnumType::new(e.name, e.values)),
            TypeDecl::Scalar(s) => NamedType::Scalar(ScalarType::new(s.name)),
        };
        let name = ty.name().to_string();
        if !self.declared.insert(name.clone()) {
            return Err(SchemaError::DuplicateType { name });
        }
        if self.registry.contains(&name) {
            // only built-in scalars are pre-registered; redeclaring one as a scalar is a no-op
            if is_builtin_scalar(&name) && matches!(ty, NamedType::Scalar(_)) {
                return Ok(());
            }
            return Err(SchemaError::DuplicateType { name });
        }
        tracing::trace!(type_name = %name, "declared type");
        self.registry.insert(ty);
        Ok(())
    }
}

fn composite(decl: CompositeDecl, kind: CompositeKind) -> Result<CompositeType, SchemaError> {
    let mut fields = IndexMap::with_capacity(decl.fields.len());
    for (field_name, notation) in decl.fields {
        let ty = notation.parse::<TypeRef>().map_err(|source| SchemaError::InvalidTypeRef {
            owner: decl.name.clone(),
            field: field_name.clone(),
            notation: notation.clone(),
            source,
        })?;
        fields.insert(field_name.clone(), Field { name: field_name, ty });
    }
    let directives = decl
        .directives
        .into_iter()
        .map(|d| match d {
            DirectiveDecl::Bare(name) | DirectiveDecl::Full { name, .. } => Directive { name },
        })
        .collect();
    Ok(CompositeType {
        name: decl.name,
        kind,
        fields,
        directives,
    })
}

/// Loads and merges every path, in order.
pub fn load_paths<I>(paths: I, json_pointer: Option<String>) -> Result<Registry, SchemaError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut loader = Loader::new().with_json_pointer(json_pointer);
    for path in paths {
        loader.load_path(path.as_ref())?;
    }
    Ok(loader.finish())
}

/// Single in-memory document, no pointer.
pub fn registry_from_str(source: &str) -> Result<Registry, SchemaError> {
    let mut loader = Loader::new();
    loader.load_str(source, Path::new("<memory>"))?;
    Ok(loader.finish())
}
