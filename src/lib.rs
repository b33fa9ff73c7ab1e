//! webshape - Declared shapes of browser Web APIs
//!
//! This crate re-exports all layers of the webshape system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: webshape_externs    - Bundled Web Audio / Service Worker declarations
//! Layer 2: webshape_catalog    - Loading, validation, inheritance-aware lookup
//! Layer 1: webshape_language   - Lexer, reader, declaration analyzer, emitter
//! Layer 0: webshape_foundation - Declaration model, collections, Error
//! ```

pub use webshape_catalog as catalog;
pub use webshape_externs as externs;
pub use webshape_foundation as foundation;
pub use webshape_language as language;
