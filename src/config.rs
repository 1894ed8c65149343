//! Client configuration
//!
//! [`ClientConfig`] carries everything the client needs to talk to the NCBI
//! E-utilities: the endpoint base URL, HTTP settings, the identification
//! parameters NCBI asks callers to send, and the search/fetch sizing knobs.
//! Endpoints are injected here rather than hard-coded so tests can point the
//! client at a mock server.

use std::time::Duration;

/// Default E-utilities endpoint
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default number of identifiers requested from ESearch
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// NCBI recommends batches of up to 200 IDs per EFetch request
pub const DEFAULT_BATCH_SIZE: usize = 200;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`PubMedClient`](crate::PubMedClient)
///
/// # Example
///
/// ```
/// use pubmed_fetcher::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_email("researcher@university.edu")
///     .with_max_results(25);
///
/// assert_eq!(config.max_results, 25);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the E-utilities endpoints (without trailing slash)
    pub base_url: Option<String>,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Custom User-Agent header
    pub user_agent: Option<String>,
    /// Contact email sent as the `email` parameter
    pub email: Option<String>,
    /// Tool name sent as the `tool` parameter
    pub tool: Option<String>,
    /// Default result cap passed to ESearch as `retmax` when a search does
    /// not give its own
    pub max_results: usize,
    /// Maximum number of IDs per EFetch request
    pub batch_size: usize,
    /// Maximum number of EFetch requests in flight
    pub max_concurrent_requests: usize,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            email: None,
            tool: None,
            max_results: DEFAULT_MAX_RESULTS,
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrent_requests: 1,
        }
    }

    /// Point the client at a different E-utilities host, e.g. a mock server
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the EFetch batch size. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set how many EFetch batches may run at once. Zero is treated as one.
    pub fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max.max(1);
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("pubmed-fetcher/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or("pubmed-fetcher")
    }

    /// Identification parameters appended to every request
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(ref email) = self.email {
            params.push(("email".to_string(), email.clone()));
        }

        if self.email.is_some() || self.tool.is_some() {
            params.push(("tool".to_string(), self.effective_tool().to_string()));
        }

        params
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
