//! Abstract syntax tree for declaration sources.
//!
//! The AST is the generic s-expression layer: it knows nothing about
//! classes or enums. The declaration analyzer gives it meaning.

use crate::span::Span;

/// An AST node.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    /// `true` or `false`
    Bool(bool, Span),
    /// Integer literal like `42`
    Int(i64, Span),
    /// Float literal like `0.5`
    Float(f64, Span),
    /// String literal like `"activated"`
    String(String, Span),
    /// Symbol like `AudioNode` or `class:`
    Symbol(String, Span),
    /// Keyword like `:extends`
    Keyword(String, Span),

    /// List form like `(union A B)`
    List(Vec<Ast>, Span),
    /// Vector form like `[A B]`
    Vector(Vec<Ast>, Span),
    /// Map form like `{:scope string}`
    Map(Vec<(Ast, Ast)>, Span),
}

impl Ast {
    /// Returns the source span of this AST node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Bool(_, s)
            | Self::Int(_, s)
            | Self::Float(_, s)
            | Self::String(_, s)
            | Self::Symbol(_, s)
            | Self::Keyword(_, s)
            | Self::List(_, s)
            | Self::Vector(_, s)
            | Self::Map(_, s) => *s,
        }
    }

    /// Returns true if this is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_, _))
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self, Self::Keyword(_, _))
    }

    /// Returns the elements of a list, or None if not a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Ast]> {
        match self {
            Self::List(elements, _) => Some(elements),
            _ => None,
        }
    }

    /// Returns the elements of a vector, or None if not a vector.
    #[must_use]
    pub fn as_vector(&self) -> Option<&[Ast]> {
        match self {
            Self::Vector(elements, _) => Some(elements),
            _ => None,
        }
    }

    /// Returns the entries of a map, or None if not a map.
    #[must_use]
    pub fn as_map(&self) -> Option<&[(Ast, Ast)]> {
        match self {
            Self::Map(entries, _) => Some(entries),
            _ => None,
        }
    }

    /// Returns the symbol name, or None if not a symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name, _) => Some(name),
            _ => None,
        }
    }

    /// Returns the keyword name, or None if not a keyword.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(name, _) => Some(name),
            _ => None,
        }
    }

    /// Returns the boolean value, or None if not a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b, _) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value, or None if not an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n, _) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string value, or None if not a string.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s, _) => Some(s),
            _ => None,
        }
    }

    /// Returns the head symbol of a list form, e.g. `class:` for `(class: A)`.
    #[must_use]
    pub fn head(&self) -> Option<&str> {
        self.as_list()?.first()?.as_symbol()
    }

    /// A human-readable type name for this AST node.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_, _) => "bool",
            Self::Int(_, _) => "int",
            Self::Float(_, _) => "float",
            Self::String(_, _) => "string",
            Self::Symbol(_, _) => "symbol",
            Self::Keyword(_, _) => "keyword",
            Self::List(_, _) => "list",
            Self::Vector(_, _) => "vector",
            Self::Map(_, _) => "map",
        }
    }
}

/// Span-less constructors, used when building forms rather than parsing them.
impl Ast {
    /// Creates a bool node.
    #[must_use]
    pub fn bool_lit(b: bool) -> Self {
        Self::Bool(b, Span::default())
    }

    /// Creates an int node.
    #[must_use]
    pub fn int(n: i64) -> Self {
        Self::Int(n, Span::default())
    }

    /// Creates a float node.
    #[must_use]
    pub fn float(n: f64) -> Self {
        Self::Float(n, Span::default())
    }

    /// Creates a string node.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into(), Span::default())
    }

    /// Creates a symbol node.
    #[must_use]
    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into(), Span::default())
    }

    /// Creates a keyword node.
    #[must_use]
    pub fn keyword(s: impl Into<String>) -> Self {
        Self::Keyword(s.into(), Span::default())
    }

    /// Creates a list node.
    #[must_use]
    pub fn list(elements: Vec<Ast>) -> Self {
        Self::List(elements, Span::default())
    }

    /// Creates a vector node.
    #[must_use]
    pub fn vector(elements: Vec<Ast>) -> Self {
        Self::Vector(elements, Span::default())
    }

    /// Creates a map node.
    #[must_use]
    pub fn map(entries: Vec<(Ast, Ast)>) -> Self {
        Self::Map(entries, Span::default())
    }
}
