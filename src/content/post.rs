//! Post summary and pagination models

use serde::{Deserialize, Serialize};

/// A render-ready summary of one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Document uid, used in the post route
    pub uid: Option<String>,

    /// Formatted publication date, e.g. "25 mar 21"
    pub first_publication_date: String,

    /// Projected document fields
    pub data: PostData,
}

/// The text fields shown for a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One page of post summaries plus the pointer to the next page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPagination {
    /// Upstream url of the next page; `None` on the last page
    pub next_page: Option<String>,

    /// Summaries in upstream order
    pub results: Vec<PostSummary>,
}

impl PostPagination {
    /// Whether the "load more" control should be offered
    pub fn has_next_page(&self) -> bool {
        self.next_page
            .as_deref()
            .is_some_and(|next| !next.is_empty())
    }

    /// Append a later page, taking over its next-page pointer
    pub fn append(&mut self, page: PostPagination) {
        self.results.extend(page.results);
        self.next_page = page.next_page;
    }
}
