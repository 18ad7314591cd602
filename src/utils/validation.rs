//! Centralized validation and helper functions.

use crate::core::signature::DigestAlgorithm;

/// Maximum number of signatures allowed for a single version (DOS protection)
pub const MAX_SIGNATURES_PER_VERSION: usize = 10_000;

/// Maximum length of a signature path
pub const MAX_PATH_LENGTH: usize = 1024;

/// Validate that a string is a hex digest of the right length for `algo`.
///
/// # Examples
///
/// ```
/// use version_solver::core::signature::DigestAlgorithm;
/// use version_solver::utils::validation::is_valid_digest;
///
/// assert!(is_valid_digest("d41d8cd98f00b204e9800998ecf8427e", DigestAlgorithm::Md5));
/// assert!(!is_valid_digest("d41d8cd98f00b204e9800998ecf8427e", DigestAlgorithm::Sha256));
/// assert!(!is_valid_digest("not-a-digest", DigestAlgorithm::Md5));
/// ```
#[must_use]
pub fn is_valid_digest(s: &str, algo: DigestAlgorithm) -> bool {
    s.len() == algo.hex_len() && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalize a digest string to trimmed lowercase.
/// Returns None only for an empty or blank input; a digest of the wrong shape
/// is kept and simply never matches a computed one.
#[must_use]
pub fn normalize_digest(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_lowercase())
    }
}

/// Check if adding another signature would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new signature.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_signature_limit(count: usize) -> Option<String> {
    if count >= MAX_SIGNATURES_PER_VERSION {
        Some(format!(
            "Too many signatures: adding another would exceed maximum of {MAX_SIGNATURES_PER_VERSION}"
        ))
    } else {
        None
    }
}

/// Validation error types for catalog signature paths
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Empty path provided")]
    EmptyPath,
    #[error("Path too long: exceeds {MAX_PATH_LENGTH} characters")]
    PathTooLong,
    #[error("Invalid path: contains path traversal")]
    PathTraversal,
    #[error("Invalid path: must be relative to the target root")]
    AbsoluteUrl,
    #[error("Invalid path: contains control characters")]
    InvalidCharacters,
}

/// Validate a signature path before it is ever turned into a request.
///
/// Paths are relative to the target root. A single leading `/` is tolerated
/// since URL joining strips it, but full URLs, `..` segments, and control
/// characters are rejected so a catalog cannot point requests off the target.
///
/// # Errors
///
/// Returns the first [`ValidationError`] the path violates.
pub fn validate_signature_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::EmptyPath);
    }

    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }

    if path.contains("://") || path.starts_with("//") {
        return Err(ValidationError::AbsoluteUrl);
    }

    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(ValidationError::PathTraversal);
    }

    if path.chars().any(char::is_control) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(())
}
