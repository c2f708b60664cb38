//! Async query service over the company directory.
//!
//! [`ClientDirectory`] is the seam the search controller talks to. The
//! in-memory implementation adds an artificial delay to every call so callers
//! behave as they would against a remote backend.

use crate::directory::{CompanyNode, CompanyUpdate, DirectoryStore, NewClientInput};
use crate::error::Result;
use crate::query::filter::{page_parents, search_nodes, ParentPage, DEFAULT_SEARCH_LIMIT};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Latency added to every in-memory call unless configured otherwise.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(120);

/// Read/write access to the client hierarchy.
///
/// Lookups that miss return `None` or an empty list; `Err` is reserved for
/// transport-level failures of the implementation.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Parents matching `query` (directly or through a child), paginated.
    async fn list_parents(&self, query: &str, page: usize, page_size: usize)
        -> Result<ParentPage>;

    /// Children of `parent_id`; empty if the parent is unknown.
    async fn list_children(&self, parent_id: &str) -> Result<Vec<CompanyNode>>;

    /// Flat search across parents and children. Empty queries return nothing.
    async fn search_companies(&self, query: &str) -> Result<Vec<CompanyNode>>;

    async fn create_company(&self, input: NewClientInput) -> Result<CompanyNode>;

    async fn get_company_by_id(&self, id: &str) -> Result<Option<CompanyNode>>;

    async fn update_company(&self, id: &str, update: CompanyUpdate)
        -> Result<Option<CompanyNode>>;
}

/// [`ClientDirectory`] backed by a shared [`DirectoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    store: Arc<DirectoryStore>,
    latency: Duration,
    search_limit: usize,
}

impl InMemoryDirectory {
    pub fn new(store: Arc<DirectoryStore>) -> Self {
        Self {
            store,
            latency: DEFAULT_LATENCY,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn store(&self) -> &Arc<DirectoryStore> {
        &self.store
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl ClientDirectory for InMemoryDirectory {
    async fn list_parents(
        &self,
        query: &str,
        page: usize,
        page_size: usize,
    ) -> Result<ParentPage> {
        self.simulate_latency().await;
        Ok(self
            .store
            .with_companies(|companies| page_parents(companies, query, page, page_size)))
    }

    async fn list_children(&self, parent_id: &str) -> Result<Vec<CompanyNode>> {
        self.simulate_latency().await;
        Ok(self.store.children_of(parent_id))
    }

    async fn search_companies(&self, query: &str) -> Result<Vec<CompanyNode>> {
        self.simulate_latency().await;
        let limit = self.search_limit;
        Ok(self
            .store
            .with_companies(|companies| search_nodes(companies, query, limit)))
    }

    async fn create_company(&self, input: NewClientInput) -> Result<CompanyNode> {
        self.simulate_latency().await;
        Ok(self.store.create(input))
    }

    async fn get_company_by_id(&self, id: &str) -> Result<Option<CompanyNode>> {
        self.simulate_latency().await;
        Ok(self.store.find(id))
    }

    async fn update_company(
        &self,
        id: &str,
        update: CompanyUpdate,
    ) -> Result<Option<CompanyNode>> {
        self.simulate_latency().await;
        Ok(self.store.update(id, &update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::DEFAULT_SEED;

    fn directory() -> InMemoryDirectory {
        InMemoryDirectory::new(Arc::new(DirectoryStore::seeded(DEFAULT_SEED)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_wait_for_simulated_latency() {
        let directory = directory();
        let started = tokio::time::Instant::now();

        directory.list_children("C0001").await.unwrap();

        assert!(started.elapsed() >= DEFAULT_LATENCY);
    }

    #[tokio::test]
    async fn test_unknown_parent_has_no_children() {
        let directory = directory().with_latency(Duration::ZERO);
        assert!(directory.list_children("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_company_by_id_finds_children() {
        let directory = directory().with_latency(Duration::ZERO);

        let child = directory.get_company_by_id("C0005-02").await.unwrap().unwrap();
        assert_eq!(child.parent_id.as_deref(), Some("C0005"));
        assert!(directory.get_company_by_id("C0099").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_limit_is_configurable() {
        let directory = directory()
            .with_latency(Duration::ZERO)
            .with_search_limit(3);
        assert_eq!(directory.search_companies("c0").await.unwrap().len(), 3);
    }
}
