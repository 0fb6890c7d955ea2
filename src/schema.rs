//! Read-only schema snapshot consumed by the renderer.
//!
//! Everything here is built once by the loader and then only borrowed.
pub mod type_ref;

use indexmap::IndexMap;

pub use type_ref::TypeRef;

/// Scalars every registry knows about without a declaration.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub enum NamedType {
    Composite(CompositeType),
    Enum(EnumType),
    Scalar(ScalarType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Object,
    Interface,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeType {
    pub name: String,
    pub kind: CompositeKind,
    /// Declaration order is output order.
    pub fields: IndexMap<String, Field>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarType {
    pub name: String,
}

/// Metadata tag attached to a type declaration. Arguments are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
}

/// Named types in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    types: IndexMap<String, NamedType>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl NamedType {
    pub fn name(&self) -> &str {
        match self {
            NamedType::Composite(c) => &c.name,
            NamedType::Enum(e) => &e.name,
            NamedType::Scalar(s) => &s.name,
        }
    }
    pub fn as_composite(&self) -> Option<&CompositeType> {
        match self {
            NamedType::Composite(c) => Some(c),
            _ => None,
        }
    }
}

impl CompositeType {
    pub fn new(name: impl Into<String>, kind: CompositeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: IndexMap::new(),
            directives: Vec::new(),
        }
    }
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, CompositeKind::Object)
    }
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, CompositeKind::Interface)
    }
    /// Builder-style field append; a repeated name replaces the earlier type in place.
    pub fn with_field(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        let name = name.into();
        self.fields.insert(name.clone(), Field { name, ty });
        self
    }
    pub fn with_directive(mut self, name: impl Into<String>) -> Self {
        self.directives.push(Directive { name: name.into() });
        self
    }
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name == name)
    }
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl ScalarType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Empty registry seeded with the built-in scalars.
    pub fn new() -> Self {
        let mut types = IndexMap::new();
        for name in BUILTIN_SCALARS {
            types.insert(name.to_string(), NamedType::Scalar(ScalarType::new(name)));
        }
        Self { types }
    }
    /// Registry with nothing pre-registered.
    pub fn empty() -> Self {
        Self { types: IndexMap::new() }
    }
    /// Inserts `ty`, returning the previous declaration of the same name (if any).
    /// A replaced entry keeps its original enumeration position.
    pub fn insert(&mut self, ty: NamedType) -> Option<NamedType> {
        self.types.insert(ty.name().to_string(), ty)
    }
    /// Builder-style [`Registry::insert`].
    pub fn with(mut self, ty: NamedType) -> Self {
        self.insert(ty);
        self
    }
    pub fn get(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
    /// Registration order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values()
    }
    pub fn len(&self) -> usize {
        self.types.len()
    }
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}
