use serde::{Deserialize, Serialize};

/// Label reported when identification is inconclusive
pub const UNKNOWN_VERSION: &str = "unknown";

/// Type of match found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Every signature of the version matched a fetched file
    Exact,
    /// Highest count of individually matched signatures
    Closest,
    /// No fetched file matched any signature
    Unknown,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Closest => write!(f, "closest"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of a version identification.
///
/// `Unknown` is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "match_type", rename_all = "snake_case")]
pub enum Identification {
    Exact {
        version: String,
    },
    Closest {
        version: String,
        /// Signatures of `version` satisfied by a fetched file
        matched: usize,
        /// Signatures recorded for `version`
        total: usize,
    },
    Unknown,
}

impl Identification {
    /// Identified version, `None` when inconclusive
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Exact { version } | Self::Closest { version, .. } => Some(version),
            Self::Unknown => None,
        }
    }

    /// Identified version or [`UNKNOWN_VERSION`]
    #[must_use]
    pub fn label(&self) -> &str {
        self.version().unwrap_or(UNKNOWN_VERSION)
    }

    #[must_use]
    pub fn match_type(&self) -> MatchType {
        match self {
            Self::Exact { .. } => MatchType::Exact,
            Self::Closest { .. } => MatchType::Closest,
            Self::Unknown => MatchType::Unknown,
        }
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact { .. })
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for Identification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
