//! Type expressions describing the shape of a declared value.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Primitive value kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primitive {
    /// `number`
    Number,
    /// `string`
    String,
    /// `boolean`
    Boolean,
    /// `void` (no value; only meaningful as a return type or promise payload)
    Void,
    /// `undefined`
    Undefined,
    /// `null`
    Null,
}

impl Primitive {
    /// All primitives, in source order.
    pub const ALL: [Primitive; 6] = [
        Self::Number,
        Self::String,
        Self::Boolean,
        Self::Void,
        Self::Undefined,
        Self::Null,
    ];

    /// The source keyword for this primitive.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Void => "void",
            Self::Undefined => "undefined",
            Self::Null => "null",
        }
    }

    /// Looks up a primitive by its source keyword.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// Element kind of a typed buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BufferKind {
    /// Raw bytes (`ArrayBuffer`).
    Bytes,
    /// `Int8Array`
    Int8,
    /// `Uint8Array`
    Uint8,
    /// `Uint8ClampedArray`
    Uint8Clamped,
    /// `Int16Array`
    Int16,
    /// `Uint16Array`
    Uint16,
    /// `Int32Array`
    Int32,
    /// `Uint32Array`
    Uint32,
    /// `Float32Array`
    Float32,
    /// `Float64Array`
    Float64,
}

impl BufferKind {
    /// All buffer kinds.
    pub const ALL: [BufferKind; 10] = [
        Self::Bytes,
        Self::Int8,
        Self::Uint8,
        Self::Uint8Clamped,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Float32,
        Self::Float64,
    ];

    /// The element keyword used in `(buffer <kind>)`.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Uint8Clamped => "uint8-clamped",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    /// The platform constructor name (e.g. `Float32Array`).
    #[must_use]
    pub const fn platform_name(self) -> &'static str {
        match self {
            Self::Bytes => "ArrayBuffer",
            Self::Int8 => "Int8Array",
            Self::Uint8 => "Uint8Array",
            Self::Uint8Clamped => "Uint8ClampedArray",
            Self::Int16 => "Int16Array",
            Self::Uint16 => "Uint16Array",
            Self::Int32 => "Int32Array",
            Self::Uint32 => "Uint32Array",
            Self::Float32 => "Float32Array",
            Self::Float64 => "Float64Array",
        }
    }

    /// Looks up a buffer kind by its element keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == keyword)
    }
}

/// A parameter of a callback type (`function(A, B=)`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallbackParam {
    /// Parameter type.
    pub ty: TypeExpr,
    /// Whether the callback may be invoked without this argument.
    pub optional: bool,
}

/// Recursive description of a value's shape.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeExpr {
    /// A primitive value.
    Primitive(Primitive),
    /// Any value (`*`).
    Any,
    /// Unknown value (`?`); opts out of checking.
    Unknown,
    /// Reference to a declared type, enum, typedef or template parameter.
    Named(String),
    /// Explicitly nullable (`?T`).
    Nullable(Box<TypeExpr>),
    /// Explicitly non-null (`!T`).
    NonNull(Box<TypeExpr>),
    /// Array of elements.
    Array(Box<TypeExpr>),
    /// Typed buffer.
    Buffer(BufferKind),
    /// One of several alternatives.
    Union(Vec<TypeExpr>),
    /// Deferred value; always wraps exactly one inner expression.
    Promise(Box<TypeExpr>),
    /// Callback shape.
    Function {
        /// Parameters in call order.
        params: Vec<CallbackParam>,
        /// Return type (`void` when omitted in source).
        returns: Box<TypeExpr>,
    },
    /// Anonymous record shape, fields in declaration order.
    Record(Vec<(String, TypeExpr)>),
}

impl TypeExpr {
    /// `number`
    pub const NUMBER: TypeExpr = TypeExpr::Primitive(Primitive::Number);
    /// `string`
    pub const STRING: TypeExpr = TypeExpr::Primitive(Primitive::String);
    /// `boolean`
    pub const BOOLEAN: TypeExpr = TypeExpr::Primitive(Primitive::Boolean);
    /// `void`
    pub const VOID: TypeExpr = TypeExpr::Primitive(Primitive::Void);
    /// `undefined`
    pub const UNDEFINED: TypeExpr = TypeExpr::Primitive(Primitive::Undefined);

    /// Creates a reference to a named type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps a type as explicitly nullable.
    #[must_use]
    pub fn nullable(inner: TypeExpr) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// Wraps a type as explicitly non-null.
    #[must_use]
    pub fn non_null(inner: TypeExpr) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Creates an array type.
    #[must_use]
    pub fn array(element: TypeExpr) -> Self {
        Self::Array(Box::new(element))
    }

    /// Creates a deferred type.
    #[must_use]
    pub fn promise(inner: TypeExpr) -> Self {
        Self::Promise(Box::new(inner))
    }

    /// Creates a union type.
    #[must_use]
    pub fn union(alternatives: Vec<TypeExpr>) -> Self {
        Self::Union(alternatives)
    }

    /// Creates a callback type.
    #[must_use]
    pub fn function(params: Vec<CallbackParam>, returns: TypeExpr) -> Self {
        Self::Function {
            params,
            returns: Box::new(returns),
        }
    }

    /// Returns true if this is `void`.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Primitive(Primitive::Void))
    }

    /// Returns this expression without any nullability qualifier.
    #[must_use]
    pub fn unqualified(&self) -> &TypeExpr {
        match self {
            Self::Nullable(inner) | Self::NonNull(inner) => inner.unqualified(),
            other => other,
        }
    }

    /// Returns true if `null` is an accepted value.
    ///
    /// References, arrays, buffers and promises are nullable unless marked
    /// non-null; primitives, callbacks and record shapes are not.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::NonNull(_) => false,
            Self::Nullable(_)
            | Self::Any
            | Self::Unknown
            | Self::Named(_)
            | Self::Array(_)
            | Self::Buffer(_)
            | Self::Promise(_)
            | Self::Primitive(Primitive::Null) => true,
            Self::Union(alts) => alts.iter().any(TypeExpr::is_nullable),
            Self::Primitive(_) | Self::Function { .. } | Self::Record(_) => false,
        }
    }

    /// Returns the payload of a deferred type, looking through qualifiers.
    #[must_use]
    pub fn deferred_inner(&self) -> Option<&TypeExpr> {
        match self.unqualified() {
            Self::Promise(inner) => Some(inner),
            _ => None,
        }
    }

    /// Visits this expression and every nested expression, outermost first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TypeExpr)) {
        visit(self);
        match self {
            Self::Nullable(inner) | Self::NonNull(inner) | Self::Array(inner) | Self::Promise(inner) => {
                inner.walk(visit);
            }
            Self::Union(alts) => {
                for alt in alts {
                    alt.walk(visit);
                }
            }
            Self::Function { params, returns } => {
                for param in params {
                    param.ty.walk(visit);
                }
                returns.walk(visit);
            }
            Self::Record(fields) => {
                for (_, ty) in fields {
                    ty.walk(visit);
                }
            }
            Self::Primitive(_) | Self::Any | Self::Unknown | Self::Named(_) | Self::Buffer(_) => {}
        }
    }

    /// Returns every name referenced anywhere in this expression.
    #[must_use]
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |ty| {
            if let TypeExpr::Named(name) = ty {
                names.push(name.as_str());
            }
        });
        names
    }
}

impl fmt::Debug for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{}", p.name()),
            Self::Any => write!(f, "*"),
            Self::Unknown => write!(f, "?"),
            Self::Named(name) => write!(f, "{name}"),
            Self::Nullable(inner) => write!(f, "?{inner:?}"),
            Self::NonNull(inner) => write!(f, "!{inner:?}"),
            Self::Array(elem) => write!(f, "Array<{elem:?}>"),
            Self::Buffer(kind) => write!(f, "{}", kind.platform_name()),
            Self::Union(alts) => {
                write!(f, "(")?;
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{alt:?}")?;
                }
                write!(f, ")")
            }
            Self::Promise(inner) => write!(f, "Promise<{inner:?}>"),
            Self::Function { params, returns } => {
                write!(f, "function(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", param.ty)?;
                    if param.optional {
                        write!(f, "=")?;
                    }
                }
                write!(f, ")")?;
                if !returns.is_void() {
                    write!(f, ": {returns:?}")?;
                }
                Ok(())
            }
            Self::Record(fields) => {
                write!(f, "{{")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {ty:?}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
