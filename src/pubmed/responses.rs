use serde::{Deserialize, Serialize};

/// ESearch JSON envelope
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchResult {
    pub esearchresult: ESearchData,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchData {
    pub idlist: Vec<String>,
    #[serde(default)]
    pub count: Option<String>,
}
