use serde::{Deserialize, Serialize};

/// Repository metadata returned by the API entry point
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiInfo {
    pub refs: Vec<Ref>,
}

impl ApiInfo {
    pub fn master_ref(&self) -> Option<&Ref> {
        self.refs.iter().find(|r| r.is_master_ref)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ref {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

/// One page of document search results
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub results_per_page: usize,
    #[serde(default)]
    pub results_size: usize,
    #[serde(default)]
    pub total_results_size: usize,
    #[serde(default)]
    pub total_pages: usize,
    pub next_page: Option<String>,
    pub prev_page: Option<String>,
    pub results: Vec<Document>,
}

/// A content record as returned by the search endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: DocumentData,
}

/// The projected post fields; anything absent or null is `None`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentData {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
}
