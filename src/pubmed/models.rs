use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder rendered for missing values and empty lists
pub const NOT_AVAILABLE: &str = "N/A";

/// One article extracted from an EFetch response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// PubMed ID
    pub pubmed_id: String,
    /// Article title
    pub title: Option<String>,
    /// Publication year from the journal issue's `PubDate`
    pub publication_date: Option<String>,
    /// Last names of authors with an industry affiliation, in author order
    pub non_academic_authors: Vec<String>,
    /// Industry affiliations, original casing, in author order
    pub company_affiliations: Vec<String>,
    /// Email lifted from a "corresponding ... email:" affiliation
    pub corresponding_email: Option<String>,
}

impl Paper {
    pub fn title_or_na(&self) -> &str {
        self.title.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn publication_date_or_na(&self) -> &str {
        self.publication_date.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn corresponding_email_or_na(&self) -> &str {
        self.corresponding_email.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Non-academic authors joined with `", "`, or `"N/A"` when there are none
    pub fn non_academic_authors_joined(&self) -> String {
        join_or_na(&self.non_academic_authors)
    }

    /// Company affiliations joined with `", "`, or `"N/A"` when there are none
    pub fn company_affiliations_joined(&self) -> String {
        join_or_na(&self.company_affiliations)
    }

    /// Whether at least one author was flagged by the affiliation heuristic
    pub fn has_industry_authors(&self) -> bool {
        !self.company_affiliations.is_empty()
    }
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        values.join(", ")
    }
}

impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PubmedID: {} | Title: {} | Publication Date: {} | Non-academic Author(s): {} | Company Affiliation(s): {} | Corresponding Author Email: {}",
            self.pubmed_id,
            self.title_or_na(),
            self.publication_date_or_na(),
            self.non_academic_authors_joined(),
            self.company_affiliations_joined(),
            self.corresponding_email_or_na(),
        )
    }
}

/// Result of extracting one `PubmedArticle` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleOutcome {
    /// The article carried its PMID and was extracted
    Parsed(Paper),
    /// The article could not be turned into a [`Paper`]
    Malformed {
        /// Zero-based position of the article in the response document
        position: usize,
        reason: String,
    },
}

impl ArticleOutcome {
    pub fn into_paper(self) -> Option<Paper> {
        match self {
            ArticleOutcome::Parsed(paper) => Some(paper),
            ArticleOutcome::Malformed { .. } => None,
        }
    }
}
