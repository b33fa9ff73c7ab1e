//! Integration tests for Layer 3: Externs
//!
//! Tests for the bundled browser API catalog, used through the facade crate.

mod standard;
