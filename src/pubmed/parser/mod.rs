//! PubMed EFetch XML parser
//!
//! Turns an EFetch `PubmedArticleSet` document into one [`ArticleOutcome`] per
//! `PubmedArticle` element, in document order.
//!
//! # Module Organization
//!
//! - `preprocessing` - inline formatting tag removal
//! - `xml_types` - serde schema for the fields we read, and conversion to [`Paper`]
//! - `affiliation` - industry-affiliation and corresponding-email heuristic
//!
//! [`Paper`]: crate::pubmed::models::Paper

pub mod affiliation;
mod preprocessing;
mod xml_types;

use quick_xml::de::from_str;
use tracing::{debug, instrument};

use crate::error::{PubMedError, Result};
use crate::pubmed::models::ArticleOutcome;
use preprocessing::strip_inline_html_tags;
use xml_types::PubmedArticleSet;

/// Parse every article in an EFetch XML response
///
/// Articles without a PMID come back as [`ArticleOutcome::Malformed`] rather
/// than failing the whole document. An error is returned only when the XML
/// itself cannot be deserialized.
///
/// # Example
///
/// ```
/// use pubmed_fetcher::pubmed::parser::parse_articles_from_xml;
///
/// let xml = r#"<?xml version="1.0"?>
/// <PubmedArticleSet>
///   <PubmedArticle>
///     <MedlineCitation>
///       <PMID>12345678</PMID>
///       <Article><ArticleTitle>Example Article</ArticleTitle></Article>
///     </MedlineCitation>
///   </PubmedArticle>
/// </PubmedArticleSet>"#;
///
/// let outcomes = parse_articles_from_xml(xml)?;
/// let paper = outcomes.into_iter().next().and_then(|o| o.into_paper()).unwrap();
/// assert_eq!(paper.title.as_deref(), Some("Example Article"));
/// # Ok::<(), pubmed_fetcher::PubMedError>(())
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_articles_from_xml(xml: &str) -> Result<Vec<ArticleOutcome>> {
    let cleaned_xml = strip_inline_html_tags(xml);

    let article_set: PubmedArticleSet = from_str(&cleaned_xml)
        .map_err(|e| PubMedError::XmlError(format!("Failed to deserialize XML: {}", e)))?;

    let outcomes: Vec<ArticleOutcome> = article_set
        .articles
        .into_iter()
        .enumerate()
        .map(|(position, article)| article.into_outcome(position))
        .collect();

    debug!(articles = outcomes.len(), "Parsed EFetch document");

    Ok(outcomes)
}
