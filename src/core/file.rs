use crate::core::signature::DigestAlgorithm;

/// A file retrieved from the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    /// Relative path as requested, not the final URL
    pub name: String,

    /// Raw response body
    pub data: Vec<u8>,
}

impl FetchedFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Lowercase hex digest of the file content
    #[must_use]
    pub fn digest(&self, algo: DigestAlgorithm) -> String {
        algo.hex_digest(&self.data)
    }
}
