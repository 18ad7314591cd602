use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::signature::{DigestAlgorithm, Signature, VersionDefinition};
use crate::utils::validation::{
    check_signature_limit, is_valid_digest, normalize_digest, validate_signature_path,
};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Malformed catalog: {0}")]
    Malformed(String),
}

impl CatalogError {
    /// True when the document was reachable but not a valid catalog
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::ParseError(_) | Self::Malformed(_))
    }
}

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    /// Product identifier, e.g. "wordpress"
    pub key: String,
    pub producer: String,
    pub versions: Vec<VersionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionData {
    pub version: String,
    pub signatures: Vec<SignatureData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureData {
    pub path: String,
    pub hash: String,
    /// Defaults to SHA256 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algo: Option<String>,
}

/// The signature catalog for one product
#[derive(Debug, Clone, Default)]
pub struct VersionList {
    /// Who generated the catalog (informational)
    pub producer: String,

    /// Product identifier
    pub key: String,

    /// Version definitions in source order
    pub versions: Vec<VersionDefinition>,

    /// Distinct signature paths in first-seen order
    required_paths: Vec<String>,

    /// Index over `required_paths`
    path_set: HashSet<String>,
}

impl VersionList {
    /// Create an empty catalog
    pub fn new(producer: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            producer: producer.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    /// Load catalog from a JSON file. Files ending in `.gz` are decompressed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the file does not exist, or a
    /// read/parse/validation error otherwise.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CatalogError::NotFound(path.to_path_buf()),
            _ => CatalogError::ReadError(e),
        })?;

        let is_gzipped = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

        debug!("Loading catalog from {}", path.display());

        if is_gzipped {
            Self::from_reader(flate2::read::GzDecoder::new(file))
        } else {
            Self::from_reader(std::io::BufReader::new(file))
        }
    }

    /// Parse catalog from any reader producing JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails or the document is not a valid catalog.
    /// Bytes that cannot be decoded (corrupt gzip, invalid UTF-8) count as a
    /// malformed catalog rather than a read failure.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CatalogError> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData
            | std::io::ErrorKind::InvalidInput
            | std::io::ErrorKind::UnexpectedEof => {
                CatalogError::Malformed(format!("undecodable catalog data: {e}"))
            }
            _ => CatalogError::ReadError(e),
        })?;

        let data: CatalogData = serde_json::from_slice(&content)?;
        Self::from_data(data)
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not parse or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Validate the raw document into typed definitions
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Malformed` describing the first invalid entry.
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        if data.key.trim().is_empty() {
            return Err(CatalogError::Malformed("empty 'key' field".to_string()));
        }

        let mut catalog = Self::new(data.producer, data.key);
        for version in data.versions {
            let definition = parse_version(version)?;
            catalog.add_version(definition)?;
        }

        if catalog.is_empty() {
            warn!(
                "Catalog '{}' has no versions, identification will be inconclusive",
                catalog.key
            );
        }

        debug!(
            "Loaded catalog '{}': {} versions, {} signatures, {} required paths",
            catalog.key,
            catalog.len(),
            catalog.signature_count(),
            catalog.required_paths.len()
        );

        Ok(catalog)
    }

    /// Add a version definition to the catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Malformed` if the definition has no label or
    /// records more than one signature for the same path.
    pub fn add_version(&mut self, definition: VersionDefinition) -> Result<(), CatalogError> {
        if definition.version.trim().is_empty() {
            return Err(CatalogError::Malformed(
                "version definition with empty 'version' label".to_string(),
            ));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for signature in &definition.signatures {
            if !seen.insert(signature.path.as_str()) {
                return Err(CatalogError::Malformed(format!(
                    "version '{}' has more than one signature for '{}'",
                    definition.version, signature.path
                )));
            }
        }

        if self.get(&definition.version).is_some() {
            warn!(
                "Duplicate version '{}' in catalog, the first definition takes precedence",
                definition.version
            );
        }

        for signature in &definition.signatures {
            if self.path_set.insert(signature.path.clone()) {
                self.required_paths.push(signature.path.clone());
            }
        }

        self.versions.push(definition);
        Ok(())
    }

    /// Distinct paths that must be fetched to identify any version
    #[must_use]
    pub fn required_paths(&self) -> &[String] {
        &self.required_paths
    }

    /// Get the first definition with this version label
    #[must_use]
    pub fn get(&self, version: &str) -> Option<&VersionDefinition> {
        self.versions.iter().find(|v| v.version == version)
    }

    /// Total signatures across all versions
    #[must_use]
    pub fn signature_count(&self) -> usize {
        self.versions.iter().map(VersionDefinition::len).sum()
    }

    /// Convert back to the serializable document
    #[must_use]
    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            key: self.key.clone(),
            producer: self.producer.clone(),
            versions: self
                .versions
                .iter()
                .map(|v| VersionData {
                    version: v.version.clone(),
                    signatures: v
                        .signatures
                        .iter()
                        .map(|s| SignatureData {
                            path: s.path.clone(),
                            hash: s.hash.clone(),
                            algo: Some(s.algo.name().to_string()),
                        })
                        .collect(),
                })
                .collect(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.to_data())?)
    }

    /// Number of versions in catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Check if catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

fn parse_version(data: VersionData) -> Result<VersionDefinition, CatalogError> {
    let mut signatures = Vec::with_capacity(data.signatures.len());

    for raw in data.signatures {
        if let Some(msg) = check_signature_limit(signatures.len()) {
            return Err(CatalogError::Malformed(format!(
                "version '{}': {msg}",
                data.version
            )));
        }
        signatures.push(parse_signature(&data.version, raw)?);
    }

    Ok(VersionDefinition::new(data.version, signatures))
}

fn parse_signature(version: &str, data: SignatureData) -> Result<Signature, CatalogError> {
    validate_signature_path(&data.path).map_err(|e| {
        CatalogError::Malformed(format!("version '{version}', path '{}': {e}", data.path))
    })?;

    let algo = match data.algo.as_deref() {
        None => DigestAlgorithm::default(),
        Some(name) => name.parse::<DigestAlgorithm>().map_err(|e| {
            CatalogError::Malformed(format!("version '{version}', path '{}': {e}", data.path))
        })?,
    };

    let hash = normalize_digest(&data.hash).ok_or_else(|| {
        CatalogError::Malformed(format!("version '{version}', path '{}': empty hash", data.path))
    })?;

    if !is_valid_digest(&hash, algo) {
        warn!(
            "Version '{version}', path '{}': '{hash}' does not look like a {algo} digest",
            data.path
        );
    }

    Ok(Signature::new(data.path, hash).with_algo(algo))
}
