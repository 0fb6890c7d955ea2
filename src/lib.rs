//! Markdown field outlines from a typed schema registry.
//!
//! ```
//! use schema_mdgen::load::registry_from_str;
//! use schema_mdgen::select::select;
//!
//! let registry = registry_from_str(r#"{ "types": [
//!     { "kind": "object", "name": "Post", "directives": ["md"],
//!       "fields": { "title": "String!", "tags": "[String]" } }
//! ] }"#).unwrap();
//!
//! let docs = select(&registry).unwrap();
//! assert_eq!(docs[0].identifier, "Post.generated.md");
//! assert_eq!(
//!     docs[0].content,
//!     "\n* `title` (type: `String`, required)\n* `tags` (type: `Array<String>`)"
//! );
//! ```
pub mod error;
pub mod load;
pub mod path_de;
pub mod render;
pub mod schema;
pub mod select;
pub mod write;

pub use error::{RenderError, SchemaError, WriteError};
pub use render::{RenderOptions, Renderer};
pub use schema::{NamedType, Registry, TypeRef};
pub use select::{RenderedDocument, SelectOptions, Selector};
