//! # PubMed Fetcher
//!
//! Search PubMed for a query, fetch the matching articles, and flag authors
//! whose affiliation looks pharmaceutical or biotech.
//!
//! ## Features
//!
//! - **Search**: ESearch identifier lookup with a configurable result cap (default 10)
//! - **Fetch**: batched EFetch retrieval parsed with quick-xml serde
//! - **Affiliation heuristic**: industry keywords and corresponding-author email
//! - **Export**: CSV output with a fixed column layout
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_fetcher::{ClientConfig, PubMedClient, export, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::with_config(ClientConfig::new().with_max_results(20));
//!
//!     // `None` searches with the configured cap of 20
//!     let ids = pipeline::fetch_paper_ids(&client, "crispr therapeutics", None).await?;
//!     let papers = pipeline::fetch_paper_details(&client, &ids).await?;
//!
//!     for paper in papers.iter().filter(|p| p.has_industry_authors()) {
//!         println!("{}", paper);
//!     }
//!
//!     export::save_to_csv(&papers, "papers.csv")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod pubmed;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{PubMedError, Result};
pub use export::{PaperRow, read_csv, save_to_csv};
pub use pubmed::{ArticleOutcome, Paper, PubMedClient};
