//! Catalog loading, validation, and inheritance-aware lookup for webshape.
//!
//! This crate provides:
//! - [`CatalogLoader`] - Two-pass loading of declaration sources
//! - [`Catalog`] - Immutable declared types and enums with structural sharing
//! - [`validate`] - Consistency checks returning every problem found
//! - [`Catalog::resolve_member`] - Member lookup along the inheritance chain
//! - [`SharedCatalog`] - Process-wide catalog with atomic snapshot swaps

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod loader;
pub mod lookup;
pub mod options;
pub mod shared;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod subtype;
pub mod validate;

pub use catalog::Catalog;
pub use loader::{CatalogLoader, LoadOutcome, Source, load_catalog, load_sources};
pub use lookup::ResolvedMember;
pub use options::{DuplicatePolicy, LoadOptions};
pub use shared::SharedCatalog;
pub use subtype::{check_override, is_assignable};
pub use validate::{Validator, validate};
