use std::path::Path;
use std::sync::Arc;

use futures::stream::{Stream, StreamExt};
use serde::Serialize;
use tracing::info;

use crate::catalog::shared::SharedCatalog;
use crate::catalog::store::{CatalogError, VersionList};
use crate::core::file::FetchedFile;
use crate::core::types::Identification;
use crate::fetch::{self, Fetcher};
use crate::matching::digests::FileDigests;
use crate::matching::engine::{MatchingConfig, MatchingEngine};
use crate::matching::scoring::VersionScore;

/// Full result of one identification run
#[derive(Debug, Clone, Serialize)]
pub struct IdentificationReport {
    pub target: String,
    /// Product key of the catalog used
    pub product: String,
    pub identification: Identification,
    /// Best candidates, best first
    pub candidates: Vec<VersionScore>,
    pub paths_requested: usize,
    pub files_fetched: usize,
    pub scanned_at: String,
}

/// Identifies the version of a live target against a loaded catalog
pub struct VersionIdentifier<F: Fetcher> {
    fetcher: F,
    catalog: SharedCatalog,
    config: MatchingConfig,
}

impl<F: Fetcher> VersionIdentifier<F> {
    /// Create an identifier with an empty catalog
    pub fn new(fetcher: F) -> Self {
        Self::with_catalog(fetcher, VersionList::default())
    }

    pub fn with_catalog(fetcher: F, catalog: VersionList) -> Self {
        Self {
            fetcher,
            catalog: SharedCatalog::new(catalog),
            config: MatchingConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: MatchingConfig) -> Self {
        self.config = config;
        self
    }

    /// Load a signature catalog, replacing the current one.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` or a malformed-catalog error; the
    /// previous catalog stays installed in that case.
    pub fn load_versions_signatures(&self, path: &Path) -> Result<(), CatalogError> {
        self.catalog.load_from_file(path).map(|_| ())
    }

    /// Install an already loaded catalog
    pub fn set_catalog(&self, catalog: VersionList) {
        self.catalog.replace(catalog);
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The currently installed catalog
    #[must_use]
    pub fn catalog(&self) -> Arc<VersionList> {
        self.catalog.snapshot()
    }

    /// Fetch every required path of the current catalog from `target`
    pub fn fetch_files<'a>(&'a self, target: &'a str) -> impl Stream<Item = FetchedFile> + 'a {
        let paths = self.catalog.snapshot().required_paths().to_vec();
        fetch::fetch_files(&self.fetcher, target, paths)
    }

    /// Identify the version served at `target`.
    ///
    /// Returns [`Identification::Unknown`] when nothing matched; that is a
    /// normal outcome.
    pub async fn identify_version(&self, target: &str) -> Identification {
        self.identify_version_report(target).await.identification
    }

    /// Identify the version served at `target`, with ranking details
    pub async fn identify_version_report(&self, target: &str) -> IdentificationReport {
        // One snapshot for the whole run so a concurrent reload cannot mix catalogs
        let catalog = self.catalog.snapshot();
        let paths = catalog.required_paths().to_vec();
        let paths_requested = paths.len();

        let files: Vec<FetchedFile> = fetch::fetch_files(&self.fetcher, target, paths)
            .collect()
            .await;

        info!(
            "Fetched {}/{} files from {target}",
            files.len(),
            paths_requested
        );

        let engine = MatchingEngine::with_config(&catalog, self.config.clone());
        let digests = FileDigests::new(&files);
        let identification = engine.identify_digests(&digests);
        let candidates = engine.rank(&digests);

        info!(
            "Identified {} as {} ({})",
            target,
            identification.label(),
            identification.match_type()
        );

        IdentificationReport {
            target: target.to_string(),
            product: catalog.key.clone(),
            identification,
            candidates,
            paths_requested,
            files_fetched: files.len(),
            scanned_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
