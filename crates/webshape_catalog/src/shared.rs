//! Process-wide catalog with atomic snapshot replacement.
//!
//! Readers take an `Arc<Catalog>` snapshot and keep using it for as long as
//! they like. A reload builds a new catalog off to the side and swaps the
//! pointer, so an in-flight lookup always sees one consistent catalog.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;
use webshape_foundation::Error;

use crate::catalog::Catalog;
use crate::loader::CatalogLoader;

/// A shareable handle to the current catalog.
///
/// Cloning the handle shares the same slot.
#[derive(Clone, Debug, Default)]
pub struct SharedCatalog {
    current: Arc<RwLock<Arc<Catalog>>>,
}

impl SharedCatalog {
    /// Creates a handle holding the given catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Returns the current catalog.
    ///
    /// The snapshot is unaffected by later replacements.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.current.read())
    }

    /// Swaps in a new catalog, returning the previous one.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        self.swap(Arc::new(catalog))
    }

    /// Loads a new catalog and swaps it in if the load succeeds.
    ///
    /// Returns the catalog this call installed, even if another writer has
    /// replaced it since. The current catalog stays in place when the load
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns the load diagnostics if the new catalog is unusable under the
    /// loader's options.
    pub fn reload(&self, loader: &CatalogLoader) -> Result<Arc<Catalog>, Vec<Error>> {
        let loaded = Arc::new(loader.load().into_result()?);
        self.swap(Arc::clone(&loaded));
        Ok(loaded)
    }

    fn swap(&self, catalog: Arc<Catalog>) -> Arc<Catalog> {
        let types = catalog.type_count();
        let previous = std::mem::replace(&mut *self.current.write(), catalog);
        info!(
            types,
            previous_types = previous.type_count(),
            "replaced shared catalog"
        );
        previous
    }
}

impl From<Catalog> for SharedCatalog {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}
