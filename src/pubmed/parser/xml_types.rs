//! Internal serde types for the parts of the EFetch schema we read

use std::fmt;
use std::result;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::affiliation::{self, AuthorAffiliation};
use crate::pubmed::models::{ArticleOutcome, Paper};

#[derive(Debug, Deserialize)]
pub(super) struct PubmedArticleSet {
    #[serde(rename = "PubmedArticle", default)]
    pub articles: Vec<PubmedArticleXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PubmedArticleXml {
    #[serde(rename = "MedlineCitation")]
    pub medline_citation: Option<MedlineCitationXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MedlineCitationXml {
    #[serde(rename = "PMID")]
    pub pmid: Option<PmidXml>,
    #[serde(rename = "Article")]
    pub article: Option<ArticleXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PmidXml {
    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ArticleXml {
    #[serde(rename = "ArticleTitle")]
    pub title: Option<XmlText>,
    #[serde(rename = "Journal")]
    pub journal: Option<JournalXml>,
    #[serde(rename = "AuthorList")]
    pub author_list: Option<AuthorListXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct JournalXml {
    #[serde(rename = "JournalIssue")]
    pub journal_issue: Option<JournalIssueXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct JournalIssueXml {
    #[serde(rename = "PubDate")]
    pub pub_date: Option<PubDateXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PubDateXml {
    #[serde(rename = "Year")]
    pub year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorListXml {
    #[serde(rename = "Author", default)]
    pub authors: Vec<AuthorXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorXml {
    #[serde(rename = "LastName")]
    pub last_name: Option<String>,
    #[serde(rename = "AffiliationInfo", default)]
    pub affiliation_info: Vec<AffiliationInfoXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AffiliationInfoXml {
    #[serde(rename = "Affiliation")]
    pub affiliation: Option<XmlText>,
}

/// Text content of an element, tolerant of attributes and stray child elements
#[derive(Debug, Default)]
pub(super) struct XmlText(pub String);

impl<'de> Deserialize<'de> for XmlText {
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct XmlTextVisitor;

        impl<'de> Visitor<'de> for XmlTextVisitor {
            type Value = XmlText;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("element text content")
            }

            fn visit_str<E>(self, value: &str) -> result::Result<XmlText, E>
            where
                E: de::Error,
            {
                Ok(XmlText(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> result::Result<XmlText, E>
            where
                E: de::Error,
            {
                Ok(XmlText(value))
            }

            fn visit_unit<E>(self) -> result::Result<XmlText, E>
            where
                E: de::Error,
            {
                Ok(XmlText::default())
            }

            fn visit_map<M>(self, mut map: M) -> result::Result<XmlText, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut parts = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "$text" {
                        parts.push(map.next_value::<String>()?);
                    } else {
                        // Attributes and unexpected child elements
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                // Text runs on either side of a child element are separate words
                let text = parts
                    .iter()
                    .flat_map(|part| part.split_whitespace())
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(XmlText(text))
            }
        }

        deserializer.deserialize_any(XmlTextVisitor)
    }
}

impl XmlText {
    /// Trimmed text, `None` when blank
    fn into_non_blank(self) -> Option<String> {
        let trimmed = self.0.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl PubmedArticleXml {
    /// Convert into a [`Paper`], or a malformed outcome when the PMID is missing
    pub(super) fn into_outcome(self, position: usize) -> ArticleOutcome {
        let Some(citation) = self.medline_citation else {
            return ArticleOutcome::Malformed {
                position,
                reason: "missing MedlineCitation element".to_string(),
            };
        };

        let pmid = citation
            .pmid
            .map(|p| p.value.trim().to_string())
            .filter(|p| !p.is_empty());
        let Some(pubmed_id) = pmid else {
            return ArticleOutcome::Malformed {
                position,
                reason: "missing PMID element".to_string(),
            };
        };

        let Some(article) = citation.article else {
            return ArticleOutcome::Parsed(Paper {
                pubmed_id,
                title: None,
                publication_date: None,
                non_academic_authors: Vec::new(),
                company_affiliations: Vec::new(),
                corresponding_email: None,
            });
        };

        let title = article.title.and_then(XmlText::into_non_blank);
        let publication_date = article
            .journal
            .and_then(|j| j.journal_issue)
            .and_then(|issue| issue.pub_date)
            .and_then(|date| date.year)
            .map(|year| year.trim().to_string())
            .filter(|year| !year.is_empty());

        let authors = article
            .author_list
            .map(|list| list.authors)
            .unwrap_or_default();

        let first_affiliations: Vec<Option<String>> = authors
            .iter()
            .map(|author| {
                author
                    .affiliation_info
                    .iter()
                    .find_map(|info| info.affiliation.as_ref())
                    .map(|text| text.0.trim().to_string())
            })
            .collect();

        let summary = affiliation::summarize(authors.iter().zip(&first_affiliations).map(
            |(author, affiliation)| AuthorAffiliation {
                last_name: author.last_name.as_deref(),
                affiliation: affiliation.as_deref(),
            },
        ));

        ArticleOutcome::Parsed(Paper {
            pubmed_id,
            title,
            publication_date,
            non_academic_authors: summary.non_academic_authors,
            company_affiliations: summary.company_affiliations,
            corresponding_email: summary.corresponding_email,
        })
    }
}
