//! Query service over the company directory: pure filters plus the async
//! [`ClientDirectory`] seam used by the search controller.

pub mod filter;
pub mod service;

pub use filter::{page_parents, parent_matches, search_nodes, ParentPage, DEFAULT_SEARCH_LIMIT};
pub use service::{ClientDirectory, InMemoryDirectory, DEFAULT_LATENCY};
