//! Type reference → markdown bullet outline.
//!
//! Four structural cases:
//! - `List(T)`      → `Array<T>`
//! - `Required(T)`  → `T` (required-ness is surfaced by the enclosing field line)
//! - enum / scalar  → `String (A | B)` / the scalar name
//! - composite      → newline + one bullet per field, indented `2 * level`
use crate::error::RenderError;
use crate::schema::{CompositeType, NamedType, Registry, TypeRef};

/// Label used for the entry point of a render call in error messages.
pub const ROOT_SITE: &str = "<root>";

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Composite nesting levels rendered before giving up with
    /// [`RenderError::DepthExceeded`]. Counted from the entry point, so the
    /// starting indentation level plays no part. Guards self-referential types.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Borrowing view over a registry. Holds no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    registry: &'a Registry,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self::with_options(registry, RenderOptions::default())
    }
    pub fn with_options(registry: &'a Registry, options: RenderOptions) -> Self {
        Self { registry, options }
    }
    pub fn render(&self, ty: &TypeRef, level: usize) -> Result<String, RenderError> {
        self.render_at(ty, level, 0, ROOT_SITE)
    }

    /// Renders the named type itself, e.g. a document root at level 0.
    pub fn render_named(&self, name: &str, level: usize) -> Result<String, RenderError> {
        self.render(&TypeRef::named(name), level)
    }

    /// `level` drives indentation only; `depth` counts composites entered since the entry point.
    fn render_at(&self, ty: &TypeRef, level: usize, depth: usize, site: &str) -> Result<String, RenderError> {
        match ty {
            TypeRef::List(inner) => Ok(format!("Array<{}>", self.render_at(inner, level, depth, site)?)),
            TypeRef::Required(inner) => self.render_at(inner, level, depth, site),
            TypeRef::Named(name) => match self.resolve(name, site)? {
                NamedType::Enum(e) => Ok(format!("String ({})", e.values.join(" | "))),
                NamedType::Scalar(s) => Ok(s.name.clone()),
                NamedType::Composite(c) => self.render_fields(c, level, depth, site),
            },
        }
    }

    fn render_fields(
        &self,
        composite: &CompositeType,
        level: usize,
        depth: usize,
        site: &str,
    ) -> Result<String, RenderError> {
        if depth >= self.options.max_depth {
            return Err(RenderError::DepthExceeded {
                limit: self.options.max_depth,
                path: site.to_string(),
            });
        }
        tracing::trace!(type_name = %composite.name, level, depth, "rendering fields");

        let indent = indent(level);
        let mut lines = Vec::<String>::with_capacity(composite.fields.len());
        for field in composite.fields.values() {
            let field_site = format!("{}.{}", composite.name, field.name);
            let required = if field.ty.is_required() { ", required" } else { "" };
            let label = self.render_at(&field.ty, level + 1, depth + 1, &field_site)?;
            let has_child_object = matches!(
                self.resolve(field.ty.named_type(), &field_site)?,
                NamedType::Composite(_)
            );
            if has_child_object {
                lines.push(format!("{indent}* `{}` (type: `object`{required}): {label}", field.name));
            } else {
                lines.push(format!("{indent}* `{}` (type: `{label}`{required})", field.name));
            }
        }
        Ok(format!("\n{}", lines.join("\n")))
    }

    fn resolve(&self, name: &str, site: &str) -> Result<&'a NamedType, RenderError> {
        self.registry.get(name).ok_or_else(|| RenderError::UnknownType {
            type_name: name.to_string(),
            field: site.to_string(),
        })
    }
}

/// Convenience wrapper with default options.
pub fn render(registry: &Registry, ty: &TypeRef, level: usize) -> Result<String, RenderError> {
    Renderer::new(registry).render(ty, level)
}

fn indent(level: usize) -> String {
    " ".repeat(level * 2)
}
