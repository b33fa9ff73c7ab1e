//! Source language for webshape catalogs.
//!
//! Catalog sources are s-expressions. This crate provides:
//! - `Lexer` - Tokenization of declaration sources
//! - `Parser` - Parsing tokens into AST, with error recovery
//! - `DeclarationAnalyzer` - Turning AST forms into typed declarations
//! - `emit` - Turning declarations back into canonical source

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod declaration;
pub mod emit;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod token;


pub use ast::Ast;
pub use declaration::{
    AugmentDecl, Declaration, DeclarationAnalyzer, analyze_type_expr, emit_type_expr,
    parse_type_expr,
};
pub use emit::{emit_declaration, to_source};
pub use lexer::Lexer;
pub use parser::{Parser, parse, parse_one, parse_recovering};
pub use span::Span;
pub use token::{Token, TokenKind};
