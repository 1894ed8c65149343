//! Search → fetch stages used by the command line
//!
//! These wrap [`PubMedClient`] calls so that transport failures (connection
//! errors, timeouts, non-success statuses) are logged and degrade to an empty
//! result instead of aborting the run. Responses that arrive but cannot be
//! decoded are still returned as errors.

use tracing::{error, info, instrument, warn};

use crate::error::Result;
use crate::pubmed::{ArticleOutcome, Paper, PubMedClient};

/// Search for PMIDs matching `query`, at most `max_results` of them
///
/// `None` uses the client's configured cap ([`crate::ClientConfig::max_results`],
/// 10 unless changed). Returns an empty list when the search endpoint cannot be reached or
/// answers with an error status.
#[instrument(skip(client), fields(query = %query))]
pub async fn fetch_paper_ids(
    client: &PubMedClient,
    query: &str,
    max_results: Option<usize>,
) -> Result<Vec<String>> {
    let limit = max_results.unwrap_or(client.config().max_results);
    match client.search_articles(query, limit).await {
        Ok(ids) => Ok(ids),
        Err(e) if e.is_transport() => {
            error!(error = %e, kind = e.kind(), "Error fetching paper IDs");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Fetch and extract the papers for `paper_ids`
///
/// An empty ID list is a no-op. Articles without a PMID are logged and
/// skipped. Returns an empty list when the fetch endpoint cannot be reached or
/// answers with an error status.
#[instrument(skip(client, paper_ids), fields(ids = paper_ids.len()))]
pub async fn fetch_paper_details<S: AsRef<str>>(
    client: &PubMedClient,
    paper_ids: &[S],
) -> Result<Vec<Paper>> {
    if paper_ids.is_empty() {
        info!("No paper IDs provided");
        return Ok(Vec::new());
    }

    let outcomes = match client.fetch_articles(paper_ids).await {
        Ok(outcomes) => outcomes,
        Err(e) if e.is_transport() => {
            error!(error = %e, kind = e.kind(), "Error fetching paper details");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let papers: Vec<Paper> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            ArticleOutcome::Parsed(paper) => Some(paper),
            ArticleOutcome::Malformed { position, reason } => {
                warn!(position, reason = %reason, "Skipping malformed article");
                None
            }
        })
        .collect();

    info!(papers = papers.len(), "Extracted paper details");
    Ok(papers)
}

/// Run search then fetch for `query`
pub async fn search_and_fetch(
    client: &PubMedClient,
    query: &str,
    max_results: Option<usize>,
) -> Result<Vec<Paper>> {
    let ids = fetch_paper_ids(client, query, max_results).await?;
    fetch_paper_details(client, &ids).await
}
