//! CSV sink for extracted papers
//!
//! Each [`Paper`] becomes one [`PaperRow`]; missing values and empty lists are
//! written as `N/A`, lists are joined with `", "`. Column order is fixed:
//! `PubmedID`, `Title`, `Publication Date`, `Non-academic Author(s)`,
//! `Company Affiliation(s)`, `Corresponding Author Email`.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::Result;
use crate::pubmed::Paper;

/// Flat CSV representation of a [`Paper`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRow {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

impl From<&Paper> for PaperRow {
    fn from(paper: &Paper) -> Self {
        Self {
            pubmed_id: paper.pubmed_id.clone(),
            title: paper.title_or_na().to_string(),
            publication_date: paper.publication_date_or_na().to_string(),
            non_academic_authors: paper.non_academic_authors_joined(),
            company_affiliations: paper.company_affiliations_joined(),
            corresponding_email: paper.corresponding_email_or_na().to_string(),
        }
    }
}

/// Write papers as CSV to any writer, header row first
pub fn write_csv<W: io::Write>(papers: &[Paper], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for paper in papers {
        wtr.serialize(PaperRow::from(paper))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Save papers to a CSV file at `path`
///
/// An empty slice is not an error: a notice is logged and no file is created.
///
/// # Example
///
/// ```no_run
/// use pubmed_fetcher::export::save_to_csv;
///
/// # fn run(papers: Vec<pubmed_fetcher::Paper>) -> pubmed_fetcher::Result<()> {
/// save_to_csv(&papers, "results.csv")?;
/// # Ok(())
/// # }
/// ```
#[instrument(skip_all, fields(papers = papers.len()))]
pub fn save_to_csv<P: AsRef<Path>>(papers: &[Paper], path: P) -> Result<()> {
    let path = path.as_ref();

    if papers.is_empty() {
        info!("No papers to save");
        return Ok(());
    }

    write_csv(papers, File::create(path)?)?;
    info!(rows = papers.len(), "Results saved to {}", path.display());
    Ok(())
}

/// Read rows back from a CSV file written by [`save_to_csv`], in file order
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PaperRow>> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }

    Ok(rows)
}
