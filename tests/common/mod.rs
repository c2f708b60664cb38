#![allow(dead_code)]

use async_trait::async_trait;
use clientdesk::directory::{
    CompanyNode, CompanyUpdate, DirectoryStore, NewClientInput, DEFAULT_SEED,
};
use clientdesk::error::{ClientsError, Result};
use clientdesk::query::{ClientDirectory, InMemoryDirectory, ParentPage};
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

/// Directory wrapper that records calls and can inject delays and failures.
pub struct RecordingDirectory {
    inner: InMemoryDirectory,
    parent_queries: Mutex<Vec<String>>,
    child_requests: Mutex<Vec<String>>,
    listing_delays: Mutex<VecDeque<Duration>>,
    failing_children: Mutex<HashSet<String>>,
    child_delay: Mutex<Option<Duration>>,
    fail_listing: Mutex<bool>,
}

impl RecordingDirectory {
    pub fn seeded() -> Arc<Self> {
        Self::over(Arc::new(DirectoryStore::seeded(DEFAULT_SEED)))
    }

    pub fn over(store: Arc<DirectoryStore>) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryDirectory::new(store).with_latency(Duration::ZERO),
            parent_queries: Mutex::new(Vec::new()),
            child_requests: Mutex::new(Vec::new()),
            listing_delays: Mutex::new(VecDeque::new()),
            failing_children: Mutex::new(HashSet::new()),
            child_delay: Mutex::new(None),
            fail_listing: Mutex::new(false),
        })
    }

    /// Delay the next `list_parents` calls, one entry per call.
    pub fn queue_listing_delays(&self, delays: &[Duration]) {
        self.listing_delays.lock().extend(delays.iter().copied());
    }

    pub fn fail_children_of(&self, parent_id: &str) {
        self.failing_children.lock().insert(parent_id.to_string());
    }

    /// Delay every successful `list_children` call by `delay`.
    pub fn delay_children(&self, delay: Duration) {
        *self.child_delay.lock() = Some(delay);
    }

    pub fn heal_children_of(&self, parent_id: &str) {
        self.failing_children.lock().remove(parent_id);
    }

    pub fn fail_listing(&self, fail: bool) {
        *self.fail_listing.lock() = fail;
    }

    pub fn parent_queries(&self) -> Vec<String> {
        self.parent_queries.lock().clone()
    }

    pub fn child_requests(&self) -> Vec<String> {
        self.child_requests.lock().clone()
    }

    pub fn child_requests_for(&self, parent_id: &str) -> usize {
        self.child_requests
            .lock()
            .iter()
            .filter(|id| id.as_str() == parent_id)
            .count()
    }
}

#[async_trait]
impl ClientDirectory for RecordingDirectory {
    async fn list_parents(
        &self,
        query: &str,
        page: usize,
        page_size: usize,
    ) -> Result<ParentPage> {
        self.parent_queries.lock().push(query.to_string());
        let delay = self.listing_delays.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_listing.lock() {
            return Err(ClientsError::directory("listing unavailable"));
        }
        self.inner.list_parents(query, page, page_size).await
    }

    async fn list_children(&self, parent_id: &str) -> Result<Vec<CompanyNode>> {
        self.child_requests.lock().push(parent_id.to_string());
        if self.failing_children.lock().contains(parent_id) {
            return Err(ClientsError::directory(format!(
                "children of {parent_id} unavailable"
            )));
        }
        let delay = *self.child_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.list_children(parent_id).await
    }

    async fn search_companies(&self, query: &str) -> Result<Vec<CompanyNode>> {
        self.inner.search_companies(query).await
    }

    async fn create_company(&self, input: NewClientInput) -> Result<CompanyNode> {
        self.inner.create_company(input).await
    }

    async fn get_company_by_id(&self, id: &str) -> Result<Option<CompanyNode>> {
        self.inner.get_company_by_id(id).await
    }

    async fn update_company(
        &self,
        id: &str,
        update: CompanyUpdate,
    ) -> Result<Option<CompanyNode>> {
        self.inner.update_company(id, update).await
    }
}
