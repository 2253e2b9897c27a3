//! Content loading and querying.
//!
//! `ContentStore` fetches and memoizes the JSON collections; `query` holds
//! the pure filter/search functions applied to them.

pub mod fetch;
pub mod query;
pub mod store;

pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use store::{ContentError, ContentStore};
