use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Digest;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Digest algorithm named by a catalog signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Md5,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown digest algorithm: {0}")]
pub struct UnknownAlgorithmError(pub String);

impl DigestAlgorithm {
    /// Every supported algorithm, in preference order
    pub const ALL: [Self; 2] = [Self::Sha256, Self::Md5];

    /// Canonical name as written in catalog documents
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Md5 => "MD5",
        }
    }

    /// Length of the hex-encoded digest
    #[must_use]
    pub fn hex_len(self) -> usize {
        match self {
            Self::Sha256 => 64,
            Self::Md5 => 32,
        }
    }

    /// Lowercase hex digest of `data`
    #[must_use]
    pub fn hex_digest(self, data: &[u8]) -> String {
        match self {
            Self::Sha256 => hex::encode(sha2::Sha256::digest(data)),
            Self::Md5 => format!("{:x}", md5::compute(data)),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = UnknownAlgorithmError;

    /// Accepts `SHA256`, `sha-256`, `sha_256`, `MD5`, ... in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "sha256" => Ok(Self::Sha256),
            "md5" => Ok(Self::Md5),
            _ => Err(UnknownAlgorithmError(s.to_string())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for DigestAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for DigestAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Expected digest of one file for one version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    /// Path relative to the target root, e.g. `wp-includes/js/wp-embed.js`
    pub path: String,

    /// Lowercase hex digest
    pub hash: String,

    pub algo: DigestAlgorithm,
}

impl Signature {
    /// Create a SHA-256 signature. The hash is stored lowercase.
    pub fn new(path: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hash: hash.into().to_ascii_lowercase(),
            algo: DigestAlgorithm::Sha256,
        }
    }

    #[must_use]
    pub fn with_algo(mut self, algo: DigestAlgorithm) -> Self {
        self.algo = algo;
        self
    }

    /// Case-insensitive comparison against a hex digest
    #[must_use]
    pub fn hash_matches(&self, hex_digest: &str) -> bool {
        self.hash.eq_ignore_ascii_case(hex_digest)
    }
}

/// The full signature set identifying one release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDefinition {
    /// Opaque version label, e.g. "4.9.1"
    pub version: String,

    pub signatures: Vec<Signature>,
}

impl VersionDefinition {
    pub fn new(version: impl Into<String>, signatures: Vec<Signature>) -> Self {
        Self {
            version: version.into(),
            signatures,
        }
    }

    /// Signature recorded for `path`, if any
    #[must_use]
    pub fn signature_for(&self, path: &str) -> Option<&Signature> {
        self.signatures.iter().find(|s| s.path == path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
