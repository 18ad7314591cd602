//! Fetching catalog files from a live target.
//!
//! The [`Fetcher`] trait is the boundary to whatever performs the HTTP work.
//! A fetcher decides on its own what counts as success; anything else is a
//! [`FetchError`], which callers treat as "file absent" rather than a failure
//! of the identification.
//!
//! [`fetch_files`] issues one request per required path and yields files in
//! completion order, up to [`Fetcher::concurrency`] requests at a time.

pub mod http;

use futures::stream::{self, Stream, StreamExt};
use std::future::Future;
use thiserror::Error;
use tracing::debug;

use crate::core::file::FetchedFile;

/// Default number of requests in flight for fetchers that do not say otherwise
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unsuccessful status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Response body for {url} exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: usize },

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Retrieves the raw body of a URL
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, returning the body of a successful response
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;

    /// Maximum number of requests to keep in flight
    fn concurrency(&self) -> usize {
        DEFAULT_CONCURRENCY
    }
}

/// Join a target base URL and a relative path with exactly one `/`
///
/// # Examples
///
/// ```
/// use version_solver::fetch::join_url;
///
/// assert_eq!(join_url("http://example.com", "readme.html"), "http://example.com/readme.html");
/// assert_eq!(join_url("http://example.com/blog/", "/readme.html"), "http://example.com/blog/readme.html");
/// ```
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Fetch every path under `base`, yielding only successful responses.
///
/// The stream is lazy and single-use. Files arrive in completion order and are
/// named by the requested relative path.
pub fn fetch_files<'a, F: Fetcher>(
    fetcher: &'a F,
    base: &'a str,
    paths: Vec<String>,
) -> impl Stream<Item = FetchedFile> + 'a {
    let concurrency = fetcher.concurrency().max(1);

    stream::iter(paths)
        .map(move |path| async move {
            let url = join_url(base, &path);
            match fetcher.fetch(&url).await {
                Ok(data) => {
                    debug!("Fetched {url} ({} bytes)", data.len());
                    Some(FetchedFile::new(path, data))
                }
                Err(e) => {
                    debug!("Skipping {path}: {e}");
                    None
                }
            }
        })
        .buffer_unordered(concurrency)
        .filter_map(futures::future::ready)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapFetcher {
        responses: HashMap<String, Vec<u8>>,
        requested: Mutex<Vec<String>>,
    }

    impl Fetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::NotFound(url.to_string()))
        }
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://t/", "a.js"), "http://t/a.js");
        assert_eq!(join_url("http://t", "a.js"), "http://t/a.js");
        assert_eq!(join_url("http://t/", "/a.js"), "http://t/a.js");
        assert_eq!(join_url("http://t/wp", "js/a.js"), "http://t/wp/js/a.js");
    }

    #[tokio::test]
    async fn test_fetch_files_skips_failures() {
        let fetcher = MapFetcher {
            responses: HashMap::from([
                ("http://t/readme.html".to_string(), b"readme".to_vec()),
                ("http://t/style.css".to_string(), b"style".to_vec()),
            ]),
            requested: Mutex::new(Vec::new()),
        };
        let paths = vec![
            "readme.html".to_string(),
            "style.css".to_string(),
            "wp-include/file.js".to_string(),
        ];

        let mut files: Vec<FetchedFile> = fetch_files(&fetcher, "http://t/", paths).collect().await;
        files.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            files,
            vec![
                FetchedFile::new("readme.html", b"readme".to_vec()),
                FetchedFile::new("style.css", b"style".to_vec()),
            ]
        );

        let mut requested = fetcher.requested.lock().unwrap().clone();
        requested.sort();
        assert_eq!(
            requested,
            [
                "http://t/readme.html",
                "http://t/style.css",
                "http://t/wp-include/file.js"
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_files_is_lazy() {
        let fetcher = MapFetcher {
            responses: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        };

        let stream = fetch_files(&fetcher, "http://t/", vec!["a.js".to_string()]);
        assert!(fetcher.requested.lock().unwrap().is_empty());

        let files: Vec<FetchedFile> = stream.collect().await;
        assert!(files.is_empty());
        assert_eq!(fetcher.requested.lock().unwrap().len(), 1);
    }
}
