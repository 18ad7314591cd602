//! HTTP fetcher backed by reqwest.

use std::time::Duration;

use reqwest::{redirect, Client};

use super::{FetchError, Fetcher, DEFAULT_CONCURRENCY};

/// Largest body accepted for a single static file (DOS protection)
pub const MAX_BODY_SIZE: usize = 16 * 1024 * 1024; // 16MB

/// Configuration for [`HttpFetcher`]
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Requests kept in flight at once
    pub concurrency: usize,
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    /// Redirects followed before giving up; 0 disables redirects
    pub max_redirects: usize,
    /// Responses larger than this are treated as failures
    pub max_body_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("version-solver/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 5,
            max_body_size: MAX_BODY_SIZE,
        }
    }
}

/// Fetches files over HTTP(S). Any 2xx response is a success.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Build a fetcher from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let redirect_policy = if config.max_redirects == 0 {
            redirect::Policy::none()
        } else {
            redirect::Policy::limited(config.max_redirects)
        };

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(redirect_policy)
            .build()?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let limit = self.config.max_body_size;
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let too_large = || FetchError::BodyTooLarge {
            url: url.to_string(),
            limit,
        };

        if response
            .content_length()
            .is_some_and(|len| usize::try_from(len).map_or(true, |len| len > limit))
        {
            return Err(too_large());
        }

        // Content-Length may be absent (chunked), so enforce the cap while streaming
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }

    fn concurrency(&self) -> usize {
        self.config.concurrency
    }
}
