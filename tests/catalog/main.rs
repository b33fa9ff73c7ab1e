//! Integration tests for Layer 2: Catalog
//!
//! Tests for loading, validation, lookup, and cycle detection.

mod cycles;
mod loading;
mod lookup;
mod validation;
