use serde::Serialize;

use crate::core::file::FetchedFile;
use crate::core::signature::{Signature, VersionDefinition};
use crate::matching::digests::FileDigests;

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// How many of a version's signatures the fetched files satisfy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionScore {
    pub version: String,

    /// Signatures satisfied by some fetched file
    pub matched: usize,

    /// Signatures recorded for the version
    pub total: usize,

    /// Every signature satisfied
    pub exact: bool,
}

impl VersionScore {
    /// Score `definition` against pre-hashed files
    #[must_use]
    pub fn calculate(digests: &FileDigests, definition: &VersionDefinition) -> Self {
        let matched = count_matched_signatures(digests, definition);
        let total = definition.len();

        Self {
            version: definition.version.clone(),
            matched,
            total,
            exact: total > 0 && matched == total,
        }
    }

    /// Fraction of the version's signatures that matched.
    ///
    /// Informational only; ranking uses the raw `matched` count.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count_to_f64(self.matched) / count_to_f64(self.total)
        }
    }
}

/// True iff the file has the signature's path and its digest matches
#[must_use]
pub fn file_matches_signature(file: &FetchedFile, signature: &Signature) -> bool {
    file.name == signature.path && signature.hash_matches(&file.digest(signature.algo))
}

/// True iff every signature of `definition` is matched by some file.
///
/// A definition without signatures never matches. Strictly, "every signature"
/// holds vacuously for an empty set; an empty definition carries no evidence,
/// so it is not allowed to win the exact pass.
#[must_use]
pub fn files_match_version(files: &[FetchedFile], definition: &VersionDefinition) -> bool {
    !definition.is_empty()
        && definition
            .signatures
            .iter()
            .all(|sig| files.iter().any(|file| file_matches_signature(file, sig)))
}

/// Number of signatures of `definition` satisfied by the hashed files
#[must_use]
pub fn count_matched_signatures(digests: &FileDigests, definition: &VersionDefinition) -> usize {
    definition
        .signatures
        .iter()
        .filter(|sig| digests.satisfies(sig))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::signature::DigestAlgorithm;

    fn sha256(data: &[u8]) -> String {
        DigestAlgorithm::Sha256.hex_digest(data)
    }

    fn readme() -> FetchedFile {
        FetchedFile::new("readme.html", b"This is the readme file.".to_vec())
    }

    fn style_css() -> FetchedFile {
        FetchedFile::new("style.css", b"This is the style file.".to_vec())
    }

    fn two_versions() -> (VersionDefinition, VersionDefinition) {
        let style = Signature::new("style.css", sha256(&style_css().data));
        let v1 = VersionDefinition::new(
            "1.0",
            vec![
                Signature::new("readme.html", sha256(b"ReadMe file for 1.0 version.")),
                style.clone(),
            ],
        );
        let v2 = VersionDefinition::new(
            "2.0",
            vec![
                Signature::new("readme.html", sha256(b"ReadMe file for 2.0 version.")),
                style,
            ],
        );
        (v1, v2)
    }

    #[test]
    fn test_file_matches_signature() {
        let readme_sig = Signature::new("readme.html", sha256(&readme().data));
        let style_sig = Signature::new("style.css", sha256(&style_css().data));

        assert!(file_matches_signature(&readme(), &readme_sig));
        assert!(!file_matches_signature(&readme(), &style_sig));
        assert!(file_matches_signature(&style_css(), &style_sig));
        assert!(!file_matches_signature(&style_css(), &readme_sig));
    }

    #[test]
    fn test_one_changed_byte_breaks_match() {
        let sig = Signature::new("readme.html", sha256(&readme().data));
        let mut altered = readme();
        altered.data[0] ^= 0x01;

        assert!(!file_matches_signature(&altered, &sig));
    }

    #[test]
    fn test_same_content_under_other_name_does_not_match() {
        let sig = Signature::new("readme.html", sha256(&readme().data));
        let renamed = FetchedFile::new("license.txt", readme().data);

        assert!(!file_matches_signature(&renamed, &sig));
    }

    #[test]
    fn test_md5_signature_and_uppercase_hash() {
        let hash = DigestAlgorithm::Md5.hex_digest(&readme().data).to_uppercase();
        let sig = Signature {
            path: "readme.html".to_string(),
            hash,
            algo: DigestAlgorithm::Md5,
        };
        assert!(file_matches_signature(&readme(), &sig));
    }

    #[test]
    fn test_files_match_version() {
        let (v1, v2) = two_versions();
        let readme1 = FetchedFile::new("readme.html", b"ReadMe file for 1.0 version.".to_vec());
        let readme2 = FetchedFile::new("readme.html", b"ReadMe file for 2.0 version.".to_vec());

        assert!(files_match_version(&[readme1.clone(), style_css()], &v1));
        assert!(files_match_version(&[readme2.clone(), style_css()], &v2));
        assert!(!files_match_version(&[readme1, style_css()], &v2));
        assert!(!files_match_version(&[readme2, style_css()], &v1));
    }

    #[test]
    fn test_removing_a_file_breaks_exact_match() {
        let (v1, _) = two_versions();
        let readme1 = FetchedFile::new("readme.html", b"ReadMe file for 1.0 version.".to_vec());
        let mut files = vec![readme1, style_css()];
        assert!(files_match_version(&files, &v1));

        files.pop();
        assert!(!files_match_version(&files, &v1));
    }

    #[test]
    fn test_extra_files_do_not_prevent_match() {
        let (v1, _) = two_versions();
        let files = vec![
            FetchedFile::new("unrelated.js", b"noise".to_vec()),
            style_css(),
            FetchedFile::new("readme.html", b"ReadMe file for 1.0 version.".to_vec()),
        ];
        assert!(files_match_version(&files, &v1));
    }

    #[test]
    fn test_empty_definition_never_matches() {
        let empty = VersionDefinition::new("0.0", vec![]);
        assert!(!files_match_version(&[readme()], &empty));
    }

    #[test]
    fn test_version_score() {
        let (v1, v2) = two_versions();
        let files = vec![
            FetchedFile::new("readme.html", b"ReadMe file for 1.0 version.".to_vec()),
            style_css(),
        ];
        let digests = FileDigests::new(&files);

        let s1 = VersionScore::calculate(&digests, &v1);
        assert_eq!((s1.matched, s1.total, s1.exact), (2, 2, true));
        assert!((s1.fraction() - 1.0).abs() < 0.001);

        let s2 = VersionScore::calculate(&digests, &v2);
        assert_eq!((s2.matched, s2.total, s2.exact), (1, 2, false));
        assert!((s2.fraction() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_scoring_agrees_with_predicates() {
        let (v1, v2) = two_versions();
        let files = vec![readme(), style_css()];
        let digests = FileDigests::new(&files);

        for def in [&v1, &v2] {
            let expected = def
                .signatures
                .iter()
                .filter(|s| files.iter().any(|f| file_matches_signature(f, s)))
                .count();
            assert_eq!(count_matched_signatures(&digests, def), expected);
            assert_eq!(
                VersionScore::calculate(&digests, def).exact,
                files_match_version(&files, def)
            );
        }
    }
}
