//! XML preprocessing for EFetch responses

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Strip inline formatting tags from EFetch XML
///
/// Titles and affiliations can carry tags like `<i>`, `<sup>` or `<sub>`.
/// They are removed (keeping their text) so the serde deserializer sees plain
/// text content.
///
/// ```ignore
/// let xml = "<ArticleTitle>CO<sub>2</sub> capture</ArticleTitle>";
/// assert_eq!(strip_inline_html_tags(xml), "<ArticleTitle>CO2 capture</ArticleTitle>");
/// ```
pub(crate) fn strip_inline_html_tags(xml: &str) -> String {
    static INLINE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = INLINE_TAG_REGEX.get_or_init(|| {
        Regex::new(r"</?(?:i|b|u|sup|sub|em|strong|italic|bold)>")
            .expect("Failed to compile inline tag regex")
    });

    let cleaned = re.replace_all(xml, "");

    if cleaned.len() != xml.len() {
        debug!(
            original_bytes = xml.len(),
            cleaned_bytes = cleaned.len(),
            "Stripped inline formatting tags"
        );
    }

    cleaned.into_owned()
}
