use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::store::{CatalogError, VersionList};

/// A catalog handle shared by concurrent identification runs.
///
/// The held [`VersionList`] is never mutated. A reload builds a new value and
/// swaps the `Arc`, so readers holding a snapshot keep a consistent view.
#[derive(Debug, Default)]
pub struct SharedCatalog {
    current: RwLock<Arc<VersionList>>,
}

impl SharedCatalog {
    pub fn new(catalog: VersionList) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The currently installed catalog
    #[must_use]
    pub fn snapshot(&self) -> Arc<VersionList> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Install `catalog`, replacing the previous one entirely
    pub fn replace(&self, catalog: VersionList) {
        let catalog = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = catalog;
    }

    /// Load a catalog file and install it.
    ///
    /// On failure the previously installed catalog stays in place.
    ///
    /// # Errors
    ///
    /// Returns any [`CatalogError`] from loading.
    pub fn load_from_file(&self, path: &Path) -> Result<Arc<VersionList>, CatalogError> {
        let catalog = VersionList::load_from_file(path)?;
        info!(
            "Installed catalog '{}' with {} versions from {}",
            catalog.key,
            catalog.len(),
            path.display()
        );
        self.replace(catalog);
        Ok(self.snapshot())
    }
}
