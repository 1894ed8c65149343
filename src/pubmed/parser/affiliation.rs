//! Affiliation heuristic
//!
//! Flags authors whose affiliation text looks like industry rather than
//! academia, and lifts a corresponding-author email out of affiliation text.
//! Matching is a case-insensitive substring test, so "Biotechnology" counts
//! as "biotech" and "Pharmaceuticals" as "pharmaceutical".

/// Keywords marking an affiliation as non-academic
pub const INDUSTRY_KEYWORDS: [&str; 4] = ["pharmaceutical", "biotech", "company", "corporation"];

/// Whether the affiliation mentions any of [`INDUSTRY_KEYWORDS`]
pub fn is_industry_affiliation(affiliation: &str) -> bool {
    let lower = affiliation.to_lowercase();
    INDUSTRY_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}

/// Extract the email of a corresponding author from affiliation text
///
/// Only applies when the text mentions both "corresponding" and "email". The
/// email is whatever follows the first `email:` marker, trimmed and lower-cased.
/// Returns `None` when there is no marker or nothing follows it.
pub fn corresponding_email(affiliation: &str) -> Option<String> {
    let lower = affiliation.to_lowercase();
    if !(lower.contains("corresponding") && lower.contains("email")) {
        return None;
    }

    let (_, rest) = lower.split_once("email:")?;
    let email = rest.trim();
    (!email.is_empty()).then(|| email.to_string())
}

/// Author fields the heuristic looks at
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorAffiliation<'a> {
    pub last_name: Option<&'a str>,
    /// First affiliation listed for the author
    pub affiliation: Option<&'a str>,
}

/// Industry authors and affiliations collected across one article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffiliationSummary {
    pub non_academic_authors: Vec<String>,
    pub company_affiliations: Vec<String>,
    pub corresponding_email: Option<String>,
}

/// Run the heuristic over an article's authors, in author order
///
/// Authors without an affiliation are skipped. When several authors carry a
/// corresponding email, the last one wins.
pub fn summarize<'a, I>(authors: I) -> AffiliationSummary
where
    I: IntoIterator<Item = AuthorAffiliation<'a>>,
{
    let mut summary = AffiliationSummary::default();

    for author in authors {
        let Some(affiliation) = author.affiliation else {
            continue;
        };

        if is_industry_affiliation(affiliation) {
            if let Some(last_name) = author.last_name {
                summary.non_academic_authors.push(last_name.to_string());
            }
            summary.company_affiliations.push(affiliation.to_string());
        }

        if let Some(email) = corresponding_email(affiliation) {
            summary.corresponding_email = Some(email);
        }
    }

    summary
}
