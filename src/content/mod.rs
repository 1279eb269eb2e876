//! Content module - post summaries and the loader that builds them

pub mod loader;
mod post;

pub use loader::ContentLoader;
pub use post::{PostData, PostPagination, PostSummary};
