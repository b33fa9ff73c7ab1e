//! Declaration model, persistent collections, and error types for webshape.
//!
//! This crate provides:
//! - [`TypeExpr`] - Recursive description of a value's shape
//! - [`TypeDecl`], [`MemberDecl`], [`EnumDecl`] - Declared API surface
//! - [`Error`] - Rich error types with severity and context
//! - [`OrderedMap`] - Persistent, insertion-ordered map keyed by name

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod decl;
pub mod error;
pub mod types;

pub use collections::OrderedMap;
pub use decl::{
    Deprecation, EnumDecl, EnumKind, EnumValue, EnumVariant, MemberDecl, MemberKind, MethodShape,
    Param, PropertyShape, SymbolRef, TypeDecl, TypeKind,
};
pub use error::{Error, ErrorContext, ErrorKind, ReferenceRole, Result, Severity};
pub use types::{BufferKind, CallbackParam, Primitive, TypeExpr};
