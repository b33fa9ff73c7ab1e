//! Integration tests for Layer 0: Foundation
//!
//! Tests for the declaration model, errors, and persistent collections.

mod collections;
mod errors;
