//! Content repository API client
//!
//! A thin client for a Prismic-style repository: resolve the master ref,
//! then run document searches against it.

mod client;
mod error;
mod query;
mod response;

pub use client::{ContentSource, PrismicClient};
pub use error::Error;
pub use query::{Predicate, Query};
pub use response::{ApiInfo, Document, DocumentData, Ref, SearchResponse};
