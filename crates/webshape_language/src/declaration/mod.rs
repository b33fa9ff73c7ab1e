//! Semantic declarations extracted from parsed AST.
//!
//! This module turns raw AST (lists, vectors, symbols) into the typed
//! declaration model of `webshape_foundation`.
//!
//! The flow is: Source → Parser → AST → `DeclarationAnalyzer` → Declaration → Catalog
//!
//! # Module Structure
//!
//! - `types` - Source-only declaration forms (augments)
//! - `type_expr` - Analysis of type expressions
//! - `analyzer` - The `DeclarationAnalyzer` implementation

mod analyzer;
mod type_expr;
mod types;


pub use analyzer::DeclarationAnalyzer;
pub use type_expr::{analyze_type_expr, emit_type_expr, parse_type_expr};
pub use types::AugmentDecl;

use webshape_foundation::{EnumDecl, TypeDecl};

use crate::span::Span;

/// Any top-level declaration, with the span of its source form.
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    /// `class:`, `interface:`, `record:` or `typedef:`.
    Type(TypeDecl, Span),
    /// `enum:`
    Enum(EnumDecl, Span),
    /// `augment:`
    Augment(AugmentDecl, Span),
}

impl Declaration {
    /// Name of the declared (or augmented) type or enum.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Type(decl, _) => &decl.name,
            Self::Enum(decl, _) => &decl.name,
            Self::Augment(decl, _) => &decl.target,
        }
    }

    /// Source span of the declaration form.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Type(_, span) | Self::Enum(_, span) | Self::Augment(_, span) => *span,
        }
    }
}
