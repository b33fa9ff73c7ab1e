//! Integration tests for Layer 1: Language
//!
//! Tests for the lexer, reader, declaration analyzer, and emitter.

mod lexer;
mod reader;
