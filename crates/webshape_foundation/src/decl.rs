//! Declarations making up a catalog of platform API shapes.
//!
//! These are plain data: a [`TypeDecl`] names a global or host type and lists
//! its members, an [`EnumDecl`] maps symbolic names to literal values. Nothing
//! here resolves references; that is the catalog's job.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{CallbackParam, TypeExpr};

// =============================================================================
// References and Deprecation
// =============================================================================

/// Reference to a type (`AudioNode`) or one of its members (`AudioNode/connect`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolRef {
    /// Name of the referenced type or enum.
    pub type_name: String,
    /// Member name, if the reference targets a member.
    pub member: Option<String>,
}

impl SymbolRef {
    /// Creates a reference to a type.
    #[must_use]
    pub fn to_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: None,
        }
    }

    /// Creates a reference to a member of a type.
    #[must_use]
    pub fn to_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: Some(member.into()),
        }
    }

    /// Parses `Type` or `Type/member`.
    ///
    /// Returns `None` for empty segments.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.split_once('/') {
            Some((ty, member)) if !ty.is_empty() && !member.is_empty() && !member.contains('/') => {
                Some(Self::to_member(ty, member))
            }
            Some(_) => None,
            None if !text.is_empty() => Some(Self::to_type(text)),
            None => None,
        }
    }
}

impl fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}/{member}", self.type_name),
            None => write!(f, "{}", self.type_name),
        }
    }
}

/// Deprecation marker with an optional successor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deprecation {
    /// The declaration that replaces this one.
    pub replacement: Option<SymbolRef>,
    /// Free-form note carried over from the upstream documentation.
    pub note: Option<String>,
}

impl Deprecation {
    /// A bare deprecation marker.
    #[must_use]
    pub fn marker() -> Self {
        Self::default()
    }

    /// A deprecation pointing at its successor.
    #[must_use]
    pub fn replaced_by(replacement: SymbolRef) -> Self {
        Self {
            replacement: Some(replacement),
            note: None,
        }
    }

    /// Sets the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

// =============================================================================
// Members
// =============================================================================

/// A named parameter of a method or constructor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeExpr,
    /// Whether callers may omit this argument.
    pub optional: bool,
}

impl Param {
    /// Creates a required parameter.
    #[must_use]
    pub fn required(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    /// Creates an optional parameter.
    #[must_use]
    pub fn optional(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
        }
    }
}

/// Shape of a property member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyShape {
    /// Declared type.
    pub ty: TypeExpr,
    /// Whether application code may assign to the property.
    pub readonly: bool,
    /// Declared as a constant (implies read-only).
    pub constant: bool,
}

/// Shape of a method member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MethodShape {
    /// Parameters in call order.
    pub params: Vec<Param>,
    /// Return type.
    pub returns: TypeExpr,
    /// Properties this method is documented to change.
    pub mutates: Vec<String>,
}

/// Property or method.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MemberKind {
    /// A data property.
    Property(PropertyShape),
    /// A callable method.
    Method(MethodShape),
}

/// One property or method belonging to a [`TypeDecl`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemberDecl {
    /// Member name, unique within its owner.
    pub name: String,
    /// Property or method shape.
    pub kind: MemberKind,
    /// Deprecation marker.
    pub deprecated: Option<Deprecation>,
    /// Reference links.
    pub see: Vec<String>,
}

impl MemberDecl {
    /// Creates a writable property.
    #[must_use]
    pub fn property(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self::with_kind(
            name,
            MemberKind::Property(PropertyShape {
                ty,
                readonly: false,
                constant: false,
            }),
        )
    }

    /// Creates a read-only property.
    #[must_use]
    pub fn readonly_property(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self::with_kind(
            name,
            MemberKind::Property(PropertyShape {
                ty,
                readonly: true,
                constant: false,
            }),
        )
    }

    /// Creates a method.
    #[must_use]
    pub fn method(name: impl Into<String>, params: Vec<Param>, returns: TypeExpr) -> Self {
        Self::with_kind(
            name,
            MemberKind::Method(MethodShape {
                params,
                returns,
                mutates: Vec::new(),
            }),
        )
    }

    fn with_kind(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            deprecated: None,
            see: Vec::new(),
        }
    }

    /// Marks the member deprecated.
    #[must_use]
    pub fn deprecated(mut self, deprecation: Deprecation) -> Self {
        self.deprecated = Some(deprecation);
        self
    }

    /// Returns true if this is a method.
    #[must_use]
    pub const fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method(_))
    }

    /// Returns true if this property cannot be assigned.
    ///
    /// Methods are never considered read-only properties.
    #[must_use]
    pub const fn is_readonly(&self) -> bool {
        match &self.kind {
            MemberKind::Property(p) => p.readonly || p.constant,
            MemberKind::Method(_) => false,
        }
    }

    /// Returns the declared return type, for methods.
    #[must_use]
    pub fn return_type(&self) -> Option<&TypeExpr> {
        match &self.kind {
            MemberKind::Method(m) => Some(&m.returns),
            MemberKind::Property(_) => None,
        }
    }

    /// Returns the parameters, for methods.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        match &self.kind {
            MemberKind::Method(m) => &m.params,
            MemberKind::Property(_) => &[],
        }
    }

    /// The type of the member's value.
    ///
    /// For a property this is its declared type; for a method it is the
    /// callback shape of the method itself.
    #[must_use]
    pub fn value_type(&self) -> TypeExpr {
        match &self.kind {
            MemberKind::Property(p) => p.ty.clone(),
            MemberKind::Method(m) => TypeExpr::function(
                m.params
                    .iter()
                    .map(|p| CallbackParam {
                        ty: p.ty.clone(),
                        optional: p.optional,
                    })
                    .collect(),
                m.returns.clone(),
            ),
        }
    }
}

// =============================================================================
// Type Declarations
// =============================================================================

/// What sort of type a declaration introduces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeKind {
    /// Constructible, class-like type.
    Class,
    /// Interface implemented by host objects.
    Interface,
    /// Structural dictionary type.
    Record,
    /// Alias for a type expression.
    Typedef,
}

impl TypeKind {
    /// The declaration head used in source (`class:` etc).
    #[must_use]
    pub const fn head(self) -> &'static str {
        match self {
            Self::Class => "class:",
            Self::Interface => "interface:",
            Self::Record => "record:",
            Self::Typedef => "typedef:",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Record => "record",
            Self::Typedef => "typedef",
        };
        write!(f, "{name}")
    }
}

/// One named global or host type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeDecl {
    /// Unique name.
    pub name: String,
    /// Declaration kind.
    pub kind: TypeKind,
    /// Single parent in the inheritance chain.
    pub extends: Option<String>,
    /// Capability interfaces satisfied without inheritance.
    pub implements: Vec<String>,
    /// Template type parameters.
    pub template: Vec<String>,
    /// Constructor parameters (classes only).
    pub constructor: Option<Vec<Param>>,
    /// Aliased expression (typedefs only).
    pub alias: Option<TypeExpr>,
    /// Members in declaration order.
    pub members: Vec<MemberDecl>,
    /// Deprecation marker.
    pub deprecated: Option<Deprecation>,
    /// Reference links.
    pub see: Vec<String>,
}

impl TypeDecl {
    /// Creates an empty declaration of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            extends: None,
            implements: Vec::new(),
            template: Vec::new(),
            constructor: None,
            alias: None,
            members: Vec::new(),
            deprecated: None,
            see: Vec::new(),
        }
    }

    /// Creates a class declaration with a no-argument constructor.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        let mut decl = Self::new(name, TypeKind::Class);
        decl.constructor = Some(Vec::new());
        decl
    }

    /// Creates an interface declaration.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Creates a typedef.
    #[must_use]
    pub fn typedef(name: impl Into<String>, alias: TypeExpr) -> Self {
        let mut decl = Self::new(name, TypeKind::Typedef);
        decl.alias = Some(alias);
        decl
    }

    /// Sets the parent type.
    #[must_use]
    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Adds a capability interface.
    #[must_use]
    pub fn implementing(mut self, capability: impl Into<String>) -> Self {
        self.implements.push(capability.into());
        self
    }

    /// Adds a member.
    #[must_use]
    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    /// Marks the declaration deprecated.
    #[must_use]
    pub fn deprecated(mut self, deprecation: Deprecation) -> Self {
        self.deprecated = Some(deprecation);
        self
    }

    /// Returns the member declared directly on this type.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&MemberDecl> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Returns true if `name` is one of this type's template parameters.
    #[must_use]
    pub fn is_template_param(&self, name: &str) -> bool {
        self.template.iter().any(|t| t == name)
    }
}

// =============================================================================
// Enum Declarations
// =============================================================================

/// Literal type of an enum's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EnumKind {
    /// String literals.
    String,
    /// Numeric literals.
    Number,
}

/// Literal value of an enum variant.
///
/// Floats compare by bit pattern, so `NaN` equals itself and `0.0` differs
/// from `-0.0`. This keeps equality consistent with `Hash`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EnumValue {
    /// String literal.
    String(String),
    /// Integer literal.
    Int(i64),
    /// Floating-point literal.
    Float(f64),
}

impl EnumValue {
    /// Returns the literal's kind.
    #[must_use]
    pub const fn kind(&self) -> EnumKind {
        match self {
            Self::String(_) => EnumKind::String,
            Self::Int(_) | Self::Float(_) => EnumKind::Number,
        }
    }

    /// Returns the string literal, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for EnumValue {}

impl std::hash::Hash for EnumValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::String(s) => s.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(n) => n.to_bits().hash(state),
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

/// One symbolic name of an enum.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumVariant {
    /// Symbolic name (e.g. `ACTIVATED`).
    pub name: String,
    /// Literal value.
    pub value: EnumValue,
}

/// Closed mapping from symbolic name to literal value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumDecl {
    /// Unique name.
    pub name: String,
    /// Literal type of every variant.
    pub kind: EnumKind,
    /// Variants in declaration order.
    pub variants: Vec<EnumVariant>,
    /// Deprecation marker.
    pub deprecated: Option<Deprecation>,
    /// Reference links.
    pub see: Vec<String>,
}

impl EnumDecl {
    /// Creates an empty enum.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EnumKind) -> Self {
        Self {
            name: name.into(),
            kind,
            variants: Vec::new(),
            deprecated: None,
            see: Vec::new(),
        }
    }

    /// Adds a variant.
    #[must_use]
    pub fn with_variant(mut self, name: impl Into<String>, value: EnumValue) -> Self {
        self.variants.push(EnumVariant {
            name: name.into(),
            value,
        });
        self
    }

    /// Returns the value of a symbolic name.
    #[must_use]
    pub fn value_of(&self, symbol: &str) -> Option<&EnumValue> {
        self.variants
            .iter()
            .find(|v| v.name == symbol)
            .map(|v| &v.value)
    }
}
