//! Picks the object types marked for documentation and renders each one.
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::render::{RenderOptions, Renderer};
use crate::schema::{CompositeKind, CompositeType, NamedType, Registry};

pub const DEFAULT_MARKER: &str = "md";
pub const DEFAULT_SUFFIX: &str = ".generated.md";

/// One output file: `identifier` is the file name, `content` the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub identifier: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOptions {
    /// Directive name that marks a type for documentation.
    pub marker: String,
    /// Appended to the type name to form the identifier.
    pub suffix: String,
    pub render: RenderOptions,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            render: RenderOptions::default(),
        }
    }
}

pub struct Selector<'a> {
    registry: &'a Registry,
    options: SelectOptions,
}

impl<'a> Selector<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self::with_options(registry, SelectOptions::default())
    }
    pub fn with_options(registry: &'a Registry, options: SelectOptions) -> Self {
        Self { registry, options }
    }

    /// Object types (never interfaces) carrying the marker, in registry order.
    pub fn candidates(&self) -> Vec<&'a CompositeType> {
        self.registry
            .iter()
            .filter_map(NamedType::as_composite)
            .filter(|c| c.kind == CompositeKind::Object && c.has_directive(&self.options.marker))
            .collect()
    }

    pub fn identifier_for(&self, type_name: &str) -> String {
        format!("{type_name}{}", self.options.suffix)
    }

    /// Fails on the first type (in registry order) that cannot be rendered.
    pub fn select(&self) -> Result<Vec<RenderedDocument>, RenderError> {
        self.select_each()
            .into_iter()
            .map(|(_, result)| result)
            .collect()
    }

    /// Per-type results so one bad type does not hide the others.
    pub fn select_each(&self) -> Vec<(String, Result<RenderedDocument, RenderError>)> {
        let candidates = self.candidates();
        tracing::debug!(
            marker = %self.options.marker,
            selected = candidates.len(),
            "selected types for documentation"
        );
        let renderer = Renderer::with_options(self.registry, self.options.render);
        // `collect` on an indexed parallel iterator keeps input order
        candidates
            .par_iter()
            .map(|c| {
                let result = renderer.render_named(&c.name, 0).map(|content| RenderedDocument {
                    identifier: self.identifier_for(&c.name),
                    content,
                });
                (c.name.clone(), result)
            })
            .collect()
    }
}

/// [`Selector::select`] with default options.
pub fn select(registry: &Registry) -> Result<Vec<RenderedDocument>, RenderError> {
    Selector::new(registry).select()
}
