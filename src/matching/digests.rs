use std::collections::HashMap;

use crate::core::file::FetchedFile;
use crate::core::signature::{DigestAlgorithm, Signature};

/// Fetched files with their digests computed once per algorithm.
///
/// Keyed by file name; a name may map to several bodies if the same path was
/// fetched more than once.
#[derive(Debug, Default)]
pub struct FileDigests {
    by_name: HashMap<String, Vec<HashMap<DigestAlgorithm, String>>>,
    file_count: usize,
}

impl FileDigests {
    /// Hash every file with every supported algorithm
    #[must_use]
    pub fn new(files: &[FetchedFile]) -> Self {
        Self::with_algorithms(files, &DigestAlgorithm::ALL)
    }

    /// Hash every file with only the given algorithms
    #[must_use]
    pub fn with_algorithms(files: &[FetchedFile], algorithms: &[DigestAlgorithm]) -> Self {
        let mut by_name: HashMap<String, Vec<HashMap<DigestAlgorithm, String>>> = HashMap::new();

        for file in files {
            let digests = algorithms
                .iter()
                .map(|&algo| (algo, file.digest(algo)))
                .collect();
            by_name.entry(file.name.clone()).or_default().push(digests);
        }

        Self {
            by_name,
            file_count: files.len(),
        }
    }

    /// True if some file named `signature.path` has the expected digest
    #[must_use]
    pub fn satisfies(&self, signature: &Signature) -> bool {
        self.by_name.get(&signature.path).is_some_and(|bodies| {
            bodies.iter().any(|digests| {
                digests
                    .get(&signature.algo)
                    .is_some_and(|d| signature.hash_matches(d))
            })
        })
    }

    /// Number of files hashed
    #[must_use]
    pub fn len(&self) -> usize {
        self.file_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }
}
