//! Content loader - turns repository search results into post summaries

use anyhow::{Context, Result};

use super::{PostData, PostPagination, PostSummary};
use crate::helpers::DateFormatter;
use crate::prismic::{ContentSource, Document, Predicate, Query, SearchResponse};

/// Document type holding blog posts
pub const POST_TYPE: &str = "posts";
/// Posts per page on the home page
pub const PAGE_SIZE: usize = 5;
/// Fields projected from each post document
pub const POST_FIELDS: [&str; 3] = ["posts.title", "posts.subtitle", "posts.author"];

/// The fixed home page query
pub fn home_query() -> Query {
    Query::new()
        .predicate(Predicate::at("document.type", POST_TYPE))
        .fetch(POST_FIELDS)
        .page_size(PAGE_SIZE)
}

/// Loads the home page posts from a content source
pub struct ContentLoader<'a, S: ContentSource + ?Sized> {
    source: &'a S,
    formatter: &'a DateFormatter,
}

impl<'a, S: ContentSource + ?Sized> ContentLoader<'a, S> {
    /// Create a new content loader
    pub fn new(source: &'a S, formatter: &'a DateFormatter) -> Self {
        Self { source, formatter }
    }

    /// Query the first page of posts
    pub async fn load_home_posts(&self) -> Result<PostPagination> {
        let response = self
            .source
            .query(&home_query())
            .await
            .context("Failed to query posts")?;

        tracing::debug!(
            "Fetched page {} of {} ({} posts)",
            response.page,
            response.total_pages,
            response.results.len()
        );

        Ok(self.to_pagination(response))
    }

    /// Follow `next_page` and append its posts.
    ///
    /// Returns `false` without touching the source when there is no next page.
    pub async fn load_next_page(&self, pagination: &mut PostPagination) -> Result<bool> {
        if !pagination.has_next_page() {
            return Ok(false);
        }
        let Some(url) = pagination.next_page.clone() else {
            return Ok(false);
        };

        let response = self
            .source
            .fetch_page(&url)
            .await
            .with_context(|| format!("Failed to fetch next page {}", url))?;

        pagination.append(self.to_pagination(response));
        Ok(true)
    }

    fn to_pagination(&self, response: SearchResponse) -> PostPagination {
        let results = response
            .results
            .into_iter()
            .map(|doc| self.to_summary(doc))
            .collect();

        PostPagination {
            next_page: response.next_page,
            results,
        }
    }

    /// Map one document; absent text fields become empty strings
    fn to_summary(&self, doc: Document) -> PostSummary {
        // last_publication_date is what the home page has always shown
        let first_publication_date = match doc.last_publication_date.as_deref() {
            Some(ts) => self.formatter.format_timestamp(ts).unwrap_or_else(|| {
                tracing::warn!("Unparseable publication date {:?} on {}", ts, doc.id);
                String::new()
            }),
            None => {
                tracing::warn!("Document {} has no publication date", doc.id);
                String::new()
            }
        };

        PostSummary {
            uid: doc.uid,
            first_publication_date,
            data: PostData {
                title: doc.data.title.unwrap_or_default(),
                subtitle: doc.data.subtitle.unwrap_or_default(),
                author: doc.data.author.unwrap_or_default(),
            },
        }
    }
}
