//! Modifier chain around a named type, plus the `[Type!]!` notation.
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    List(Box<TypeRef>),
    Required(Box<TypeRef>),
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeRefParseError {
    #[error("empty type reference")]
    Empty,
    #[error("modifier at offset {offset} has no inner type")]
    MissingInner { offset: usize },
    #[error("unclosed `[` at offset {offset}")]
    Unclosed { offset: usize },
    #[error("repeated `!` at offset {offset}")]
    RepeatedRequired { offset: usize },
    #[error("unexpected `{found}` at offset {offset}")]
    Unexpected { found: char, offset: usize },
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }
    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }
    pub fn required(inner: TypeRef) -> Self {
        TypeRef::Required(Box::new(inner))
    }

    /// Field-level required-ness: only the outermost wrapper counts, so
    /// `[T]!` is required and `[T!]` is not.
    pub fn is_required(&self) -> bool {
        matches!(self, TypeRef::Required(_))
    }

    /// Name of the ultimate named type, all modifiers stripped.
    pub fn named_type(&self) -> &str {
        let mut cur = self;
        loop {
            match cur {
                TypeRef::List(inner) | TypeRef::Required(inner) => cur = inner,
                TypeRef::Named(name) => return name,
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::Required(inner) => write!(f, "{inner}!"),
            TypeRef::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.trim().is_empty() {
            return Err(TypeRefParseError::Empty);
        }
        let mut parser = Parser { src, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        match parser.peek() {
            None => Ok(ty),
            Some('!') => Err(TypeRefParseError::RepeatedRequired { offset: parser.pos }),
            Some(found) => Err(TypeRefParseError::Unexpected { found, offset: parser.pos }),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }
    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }
    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    // type := ( '[' type ']' | NAME ) '!'?
    fn parse_type(&mut self) -> Result<TypeRef, TypeRefParseError> {
        self.skip_ws();
        let start = self.pos;
        let base = match self.peek() {
            Some('[') => {
                self.bump();
                self.skip_ws();
                if matches!(self.peek(), Some(']') | Some('!')) {
                    return Err(TypeRefParseError::MissingInner { offset: start });
                }
                if self.peek().is_none() {
                    return Err(TypeRefParseError::Unclosed { offset: start });
                }
                let inner = self.parse_type()?;
                self.skip_ws();
                match self.peek() {
                    Some(']') => self.bump(),
                    None => return Err(TypeRefParseError::Unclosed { offset: start }),
                    Some('!') => return Err(TypeRefParseError::RepeatedRequired { offset: self.pos }),
                    Some(found) => return Err(TypeRefParseError::Unexpected { found, offset: self.pos }),
                }
                TypeRef::list(inner)
            }
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {
                while matches!(self.peek(), Some(c) if c == '_' || c.is_ascii_alphanumeric()) {
                    self.bump();
                }
                TypeRef::named(&self.src[start..self.pos])
            }
            Some('!') => return Err(TypeRefParseError::MissingInner { offset: start }),
            Some(found) => return Err(TypeRefParseError::Unexpected { found, offset: start }),
            None => return Err(TypeRefParseError::Empty),
        };
        self.skip_ws();
        if self.peek() == Some('!') {
            self.bump();
            return Ok(TypeRef::required(base));
        }
        Ok(base)
    }
}
