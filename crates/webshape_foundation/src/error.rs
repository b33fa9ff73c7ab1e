//! Error types for catalog loading, validation, and lookup.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Load and validation problems are collected as lists of [`Error`] values
//! rather than returned early; each kind carries a [`Severity`].

use std::fmt;

use thiserror::Error;

/// The main error type for webshape operations.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the source name, keeping any other context.
    #[must_use]
    pub fn in_source(mut self, source: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_source(source));
        self
    }

    /// Returns the severity of this error.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Returns true if this is a warning rather than an error.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self.severity(), Severity::Warning)
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: u32, column: u32, context: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            line,
            column,
            context: context.into(),
        })
    }

    /// Creates an unresolved reference error.
    #[must_use]
    pub fn unresolved(from: impl Into<String>, reference: impl Into<String>, role: ReferenceRole) -> Self {
        Self::new(ErrorKind::UnresolvedReference {
            from: from.into(),
            reference: reference.into(),
            role,
        })
    }

    /// Creates a type-not-found error.
    #[must_use]
    pub fn type_not_found(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeNotFound(name.into()))
    }

    /// Creates a member-not-found error.
    #[must_use]
    pub fn member_not_found(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::new(ErrorKind::MemberNotFound {
            type_name: type_name.into(),
            member: member.into(),
        })
    }

    /// Returns true if this error is one of the not-found lookup results.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::TypeNotFound(_)
                | ErrorKind::EnumNotFound(_)
                | ErrorKind::MemberNotFound { .. }
                | ErrorKind::EnumValueNotFound { .. }
        )
    }
}

/// Convenience alias used throughout webshape.
pub type Result<T> = std::result::Result<T, Error>;

/// How seriously a problem should be taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// The catalog is usable but a reference or check is degraded.
    Warning,
    /// The catalog is inconsistent and needs manual resolution.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Which slot of a declaration holds an unresolved reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceRole {
    /// `:extends`
    Extends,
    /// `:implements`
    Implements,
    /// Deprecation replacement.
    Replacement,
    /// Target of an `augment:` block.
    AugmentTarget,
    /// Property named by a method's `:mutates`.
    Mutates,
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Extends => "parent",
            Self::Implements => "capability",
            Self::Replacement => "replacement",
            Self::AugmentTarget => "augment target",
            Self::Mutates => "mutated property",
        };
        write!(f, "{name}")
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErrorKind {
    /// A declaration could not be decomposed into its fields.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// A reference names a declaration absent from the catalog.
    #[error("unresolved {role} `{reference}` in {from}")]
    UnresolvedReference {
        /// Declaration (or `Type/member`) holding the reference.
        from: String,
        /// The name that failed to resolve.
        reference: String,
        /// Which slot the reference occupies.
        role: ReferenceRole,
    },

    /// An inheritance chain revisits a type.
    #[error("cyclic inheritance for {type_name}: {}", .cycle.join(" -> "))]
    CyclicInheritance {
        /// Type whose chain is cyclic.
        type_name: String,
        /// The walk, ending with the revisited name.
        cycle: Vec<String>,
    },

    /// A member name is declared twice directly on one type.
    #[error("duplicate member {member} on {owner}")]
    DuplicateMember {
        /// Owning type.
        owner: String,
        /// Repeated member name.
        member: String,
    },

    /// Two top-level declarations share a name.
    #[error("duplicate declaration {0}")]
    DuplicateDeclaration(String),

    /// An enum declares a symbolic name twice.
    #[error("duplicate value {symbol} in enum {enum_name}")]
    DuplicateEnumValue {
        /// Enum name.
        enum_name: String,
        /// Repeated symbolic name.
        symbol: String,
    },

    /// A member overriding an ancestor's member widens or changes its shape.
    #[error("{owner}/{member} overrides {ancestor}/{member} incompatibly: {reason}")]
    InvalidOverride {
        /// Type declaring the override.
        owner: String,
        /// Member name.
        member: String,
        /// Ancestor declaring the shadowed member.
        ancestor: String,
        /// What is incompatible.
        reason: String,
    },

    /// A method is documented to mutate a read-only property.
    #[error("{owner}/{method} mutates read-only property {property}")]
    ReadOnlyMutation {
        /// Type declaring the method.
        owner: String,
        /// Method name.
        method: String,
        /// The read-only property.
        property: String,
    },

    /// A type expression references a name absent from the catalog.
    #[error("unknown type {name} referenced from {from}")]
    UnknownTypeReference {
        /// Declaration (or `Type/member`) holding the expression.
        from: String,
        /// Unknown name.
        name: String,
    },

    /// No type declaration has this name.
    #[error("type not found: {0}")]
    TypeNotFound(String),

    /// No enum declaration has this name.
    #[error("enum not found: {0}")]
    EnumNotFound(String),

    /// Neither the type nor its ancestors declare the member.
    #[error("member not found: {type_name}/{member}")]
    MemberNotFound {
        /// Type searched.
        type_name: String,
        /// Member searched for.
        member: String,
    },

    /// The enum has no variant with this symbolic name.
    #[error("enum value not found: {enum_name}.{symbol}")]
    EnumValueNotFound {
        /// Enum searched.
        enum_name: String,
        /// Symbolic name searched for.
        symbol: String,
    },

    /// Snapshot encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ErrorKind {
    /// Returns the severity of this kind.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnresolvedReference { .. }
            | Self::InvalidOverride { .. }
            | Self::ReadOnlyMutation { .. }
            | Self::UnknownTypeReference { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Context about where an error occurred.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Source name (file or embedded catalog name).
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<u32>,
    /// Column number in source.
    pub column: Option<u32>,
    /// Name of the declaration being processed.
    pub declaration: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Sets the declaration name.
    #[must_use]
    pub fn with_declaration(mut self, name: impl Into<String>) -> Self {
        self.declaration = Some(name.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if let Some(decl) = &self.declaration {
            if self.source.is_some() {
                write!(f, " ")?;
            }
            write!(f, "in {decl}")?;
        }
        Ok(())
    }
}
