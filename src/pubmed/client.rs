use futures_util::stream::{self, StreamExt, TryStreamExt};
use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::pubmed::models::ArticleOutcome;
use crate::pubmed::parser::parse_articles_from_xml;
use crate::pubmed::responses::ESearchResult;

/// Client for the PubMed ESearch and EFetch endpoints
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a new PubMed client with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_fetcher::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new PubMed client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_fetcher::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_email("researcher@university.edu")
    ///     .with_tool("my-review-pipeline");
    ///
    /// let client = PubMedClient::with_config(config);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built from `config`, for example
    /// when the user agent is not a valid header value. Use
    /// [`PubMedClient::try_with_config`] to handle that case.
    pub fn with_config(config: ClientConfig) -> Self {
        Self::try_with_config(config).expect("Failed to create HTTP client")
    }

    /// Create a new PubMed client with custom configuration, returning an
    /// error when the HTTP client cannot be built
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - If the configured user agent or TLS
    ///   backend is rejected by reqwest
    pub fn try_with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_client_and_config(client, config))
    }

    /// Create a new PubMed client around an existing reqwest client
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_fetcher::PubMedClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = PubMedClient::with_client(http_client);
    /// ```
    pub fn with_client(client: Client) -> Self {
        Self::with_client_and_config(client, ClientConfig::new())
    }

    pub fn with_client_and_config(client: Client, config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();

        Self {
            client,
            base_url,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Search PubMed and return matching PMIDs in relevance order
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text search term
    /// * `limit` - Maximum number of PMIDs to return (`retmax`)
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - If the HTTP request fails
    /// * `PubMedError::ApiError` - If the endpoint answers with a non-success status
    /// * `PubMedError::JsonError` - If the response is not an ESearch envelope
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_fetcher::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let pmids = client.search_articles("monoclonal antibody", 10).await?;
    ///     println!("Found {} articles", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(query = %query, limit = limit))]
    pub async fn search_articles(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            debug!("Empty query provided, returning empty results");
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json",
            self.base_url,
            urlencoding::encode(query),
            limit
        );

        debug!("Making ESearch API request");
        let response = self.make_request(&url).await?;
        let body = response.text().await?;

        let search_result: ESearchResult = serde_json::from_str(&body)?;
        let pmids = search_result.esearchresult.idlist;

        info!(
            results_found = pmids.len(),
            total_count = search_result.esearchresult.count.as_deref().unwrap_or("?"),
            "Search completed"
        );

        Ok(pmids)
    }

    /// Fetch and extract articles for the given PMIDs
    ///
    /// IDs are sent comma-joined, [`ClientConfig::batch_size`] per request.
    /// Batches run concurrently up to [`ClientConfig::max_concurrent_requests`]
    /// and outcomes come back in batch order, each batch in document order.
    /// An empty input makes no request.
    ///
    /// # Errors
    ///
    /// Fails on the first batch that hits a transport error, a non-success
    /// status, or an XML document that cannot be deserialized.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_fetcher::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let outcomes = client.fetch_articles(&["31978945", "33515491"]).await?;
    ///     for paper in outcomes.into_iter().filter_map(|o| o.into_paper()) {
    ///         println!("{}", paper);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, pmids), fields(pmids_count = pmids.len()))]
    pub async fn fetch_articles<S: AsRef<str>>(&self, pmids: &[S]) -> Result<Vec<ArticleOutcome>> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }

        let batches: Vec<String> = pmids
            .chunks(self.config.batch_size.max(1))
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|id| id.as_ref().trim())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();

        let concurrency = self.config.max_concurrent_requests.max(1);
        debug!(batches = batches.len(), concurrency, "Fetching article batches");

        let results: Vec<Vec<ArticleOutcome>> = stream::iter(batches)
            .map(|id_list| async move { self.fetch_batch(&id_list).await })
            .buffered(concurrency)
            .try_collect()
            .await?;

        Ok(results.into_iter().flatten().collect())
    }

    async fn fetch_batch(&self, id_list: &str) -> Result<Vec<ArticleOutcome>> {
        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url,
            urlencoding::encode(id_list)
        );

        debug!("Making EFetch API request");
        let response = self.make_request(&url).await?;
        let xml_text = response.text().await?;

        if xml_text.trim().is_empty() {
            warn!("EFetch returned an empty body");
            return Ok(Vec::new());
        }

        let outcomes = parse_articles_from_xml(&xml_text)?;
        info!(parsed = outcomes.len(), "Batch fetch completed");

        Ok(outcomes)
    }

    /// Send a GET request, appending the identification parameters
    /// (`email`, `tool`) and rejecting non-success statuses.
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);

            let param_strings: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&param_strings.join("&"));
        }

        debug!(url = %final_url, "Sending request");
        let response = self.client.get(&final_url).send().await?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(PubMedError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}
