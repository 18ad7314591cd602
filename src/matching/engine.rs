use tracing::debug;

use crate::catalog::store::VersionList;
use crate::core::file::FetchedFile;
use crate::core::types::Identification;
use crate::matching::digests::FileDigests;
use crate::matching::scoring::VersionScore;

/// Default number of candidates kept in a ranking
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// Configuration for the matching engine
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Report only exact matches; a best-effort closest match becomes unknown
    pub exact_only: bool,
    /// Candidates kept when ranking
    pub max_candidates: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            exact_only: false,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// The main matching engine
pub struct MatchingEngine<'a> {
    catalog: &'a VersionList,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(catalog: &'a VersionList) -> Self {
        Self {
            catalog,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(catalog: &'a VersionList, config: MatchingConfig) -> Self {
        Self { catalog, config }
    }

    /// Identify the version the fetched files belong to
    #[must_use]
    pub fn identify(&self, files: &[FetchedFile]) -> Identification {
        if files.is_empty() || self.catalog.is_empty() {
            return Identification::Unknown;
        }
        self.identify_digests(&FileDigests::new(files))
    }

    /// Identify from files that were already hashed.
    ///
    /// First pass: the first version in catalog order whose signatures are all
    /// satisfied. Second pass: the version with the strictly highest number of
    /// satisfied signatures, ties going to the earlier version.
    #[must_use]
    pub fn identify_digests(&self, digests: &FileDigests) -> Identification {
        if digests.is_empty() {
            return Identification::Unknown;
        }

        let scores: Vec<VersionScore> = self
            .catalog
            .versions
            .iter()
            .map(|def| VersionScore::calculate(digests, def))
            .collect();

        // Step 1: Exact match
        if let Some(exact) = scores.iter().find(|s| s.exact) {
            debug!("Exact match: {}", exact.version);
            return Identification::Exact {
                version: exact.version.clone(),
            };
        }

        if self.config.exact_only {
            debug!("No exact match and exact-only mode is set");
            return Identification::Unknown;
        }

        // Step 2: Closest match
        let mut best: Option<&VersionScore> = None;
        for score in &scores {
            if best.map_or(true, |b| score.matched > b.matched) {
                best = Some(score);
            }
        }

        match best {
            Some(best) if best.matched > 0 => {
                debug!(
                    "Closest match: {} ({}/{} signatures)",
                    best.version, best.matched, best.total
                );
                Identification::Closest {
                    version: best.version.clone(),
                    matched: best.matched,
                    total: best.total,
                }
            }
            _ => {
                debug!("No fetched file matched any known signature");
                Identification::Unknown
            }
        }
    }

    /// Rank versions by satisfied signatures, best first.
    ///
    /// Exact matches come before partial ones, then higher counts, then catalog
    /// order. Versions with no satisfied signature are omitted.
    #[must_use]
    pub fn rank(&self, digests: &FileDigests) -> Vec<VersionScore> {
        let mut scores: Vec<VersionScore> = self
            .catalog
            .versions
            .iter()
            .map(|def| VersionScore::calculate(digests, def))
            .filter(|s| s.matched > 0)
            .collect();

        // Stable sort keeps catalog order among equals
        scores.sort_by(|a, b| b.exact.cmp(&a.exact).then(b.matched.cmp(&a.matched)));
        scores.truncate(self.config.max_candidates);
        scores
    }
}
