//! PubMed client for searching and fetching article metadata
//!
//! This module talks to the ESearch and EFetch E-utilities and turns EFetch
//! XML into [`Paper`] records.

pub mod client;
pub mod models;
pub mod parser;
mod responses;

pub use client::PubMedClient;
pub use models::{ArticleOutcome, NOT_AVAILABLE, Paper};
pub use parser::parse_articles_from_xml;
