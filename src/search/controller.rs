//! Search session controller.
//!
//! [`ClientSearch`] sits between a view and a [`ClientDirectory`]. It owns the
//! interactive state (query, page, expansion, selection, highlight), debounces
//! query input, loads subsidiaries lazily and exposes the flattened table.
//!
//! Every parent fetch carries a request id. A response is applied only while
//! its id is the latest issued, so a slow fetch can never overwrite the
//! results of a newer one.

use crate::directory::{CompanyId, CompanyNode};
use crate::error::Result;
use crate::query::ClientDirectory;
use crate::search::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::search::flatten::{flatten_for_table, FlatNode};
use crate::search::keys::{Focus, NavKey, NavOutcome};
use crate::search::session::{RequestId, SearchSession, DEFAULT_PAGE_SIZE};
use log::{debug, error};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// How children are loaded after a parent page arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildPrefetch {
    /// Leave children unloaded until a parent is expanded.
    None,
    /// One awaited request per parent, in listing order.
    #[default]
    Sequential,
    /// All requests issued together, merged in listing order.
    Concurrent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub page_size: usize,
    pub debounce: Duration,
    pub child_prefetch: ChildPrefetch,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            child_prefetch: ChildPrefetch::default(),
        }
    }
}

/// Result of a parent fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was issued before this one finished; its results were dropped.
    Superseded,
    /// Listing failed; the previous page stays displayed.
    Failed,
}

pub struct ClientSearch {
    directory: Arc<dyn ClientDirectory>,
    child_prefetch: ChildPrefetch,
    debouncer: Debouncer,
    session: Mutex<SearchSession>,
}

impl std::fmt::Debug for ClientSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSearch")
            .field("child_prefetch", &self.child_prefetch)
            .field("debouncer", &self.debouncer)
            .field("session", &*self.session.lock())
            .finish()
    }
}

impl ClientSearch {
    pub fn new(directory: Arc<dyn ClientDirectory>, config: SearchConfig) -> Self {
        Self {
            directory,
            child_prefetch: config.child_prefetch,
            debouncer: Debouncer::new(config.debounce),
            session: Mutex::new(SearchSession::new(config.page_size.max(1))),
        }
    }

    /// Store the query, reset to page 1 and schedule a debounced fetch.
    ///
    /// Only the last of several calls arriving within the debounce window
    /// triggers a fetch. Must be called from within a tokio runtime.
    pub fn set_query(self: &Arc<Self>, text: impl Into<String>) {
        {
            let mut session = self.session.lock();
            session.query = text.into();
            session.page = 1;
        }

        let ticket = self.debouncer.arm();
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if this.debouncer.settle(ticket).await {
                this.fetch_parents().await;
            }
        });
    }

    /// Store the query and fetch right away, dropping any pending debounced fetch.
    pub async fn submit_query(&self, text: impl Into<String>) -> FetchOutcome {
        self.debouncer.cancel();
        {
            let mut session = self.session.lock();
            session.query = text.into();
            session.page = 1;
        }
        self.fetch_parents().await
    }

    /// Drop a pending debounced fetch, if any.
    pub fn cancel_pending(&self) {
        self.debouncer.cancel();
    }

    /// Set the 1-based page for the next fetch. Page 0 is read as 1.
    pub fn set_page(&self, page: usize) {
        self.session.lock().page = page.max(1);
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&self, page_size: usize) {
        let mut session = self.session.lock();
        session.page_size = page_size.max(1);
        session.page = 1;
    }

    /// List parents for the current query and page, then prefetch children.
    pub async fn fetch_parents(&self) -> FetchOutcome {
        let (request_id, query, page, page_size) = {
            let mut session = self.session.lock();
            let request_id = session.begin_fetch();
            (
                request_id,
                session.query.clone(),
                session.page,
                session.page_size,
            )
        };
        debug!("Fetch #{request_id}: query={query:?} page={page} size={page_size}");

        let listing = match self.directory.list_parents(&query, page, page_size).await {
            Ok(listing) => listing,
            Err(err) => {
                error!("Failed to fetch parents: {err}");
                self.session.lock().finish_fetch(request_id);
                return FetchOutcome::Failed;
            }
        };

        {
            let mut session = self.session.lock();
            if !session.is_latest_fetch(request_id) {
                debug!("Fetch #{request_id} superseded before listing was applied");
                return FetchOutcome::Superseded;
            }
            session.apply_page(listing.rows, listing.total);
        }

        self.prefetch_children(request_id).await;

        let mut session = self.session.lock();
        if !session.is_latest_fetch(request_id) {
            return FetchOutcome::Superseded;
        }
        session.finish_fetch(request_id);
        FetchOutcome::Applied
    }

    async fn prefetch_children(&self, request_id: RequestId) {
        let pending = self.session.lock().parents_missing_children();

        match self.child_prefetch {
            ChildPrefetch::None => {}
            ChildPrefetch::Sequential => {
                for parent_id in pending {
                    if !self.session.lock().is_latest_fetch(request_id) {
                        return;
                    }
                    let result = self.directory.list_children(&parent_id).await;
                    self.store_prefetched(request_id, &parent_id, result);
                }
            }
            ChildPrefetch::Concurrent => {
                let requests = pending
                    .iter()
                    .map(|parent_id| self.directory.list_children(parent_id));
                let results = futures::future::join_all(requests).await;
                for (parent_id, result) in pending.iter().zip(results) {
                    self.store_prefetched(request_id, parent_id, result);
                }
            }
        }
    }

    fn store_prefetched(
        &self,
        request_id: RequestId,
        parent_id: &str,
        result: Result<Vec<CompanyNode>>,
    ) {
        match result {
            Ok(children) => {
                let mut session = self.session.lock();
                if session.is_latest_fetch(request_id) {
                    session.attach_children(parent_id, children);
                }
            }
            Err(err) => error!("Failed to load children for {parent_id}: {err}"),
        }
    }

    /// Collapse an expanded parent, or expand it, loading children first if needed.
    ///
    /// Collapsing keeps loaded children cached.
    pub async fn toggle_expand(&self, parent_id: &str) {
        {
            let mut session = self.session.lock();
            if session.expanded.remove(parent_id) {
                return;
            }
        }
        self.expand(parent_id).await;
    }

    async fn expand(&self, parent_id: &str) {
        let needs_load = {
            let mut session = self.session.lock();
            let missing = session
                .parent(parent_id)
                .is_some_and(|parent| !parent.children_loaded());
            if missing {
                session.begin_child_load();
            }
            missing
        };

        if needs_load {
            let result = self.directory.list_children(parent_id).await;
            let mut session = self.session.lock();
            session.finish_child_load();
            match result {
                Ok(children) => {
                    session.attach_children(parent_id, children);
                    session.clamp_highlight();
                }
                Err(err) => error!("Failed to load children for {parent_id}: {err}"),
            }
        }

        self.session.lock().expanded.insert(parent_id.to_string());
    }

    pub fn select(&self, node: CompanyNode) {
        self.session.lock().selection = Some(node);
    }

    pub fn clear_selection(&self) {
        self.session.lock().selection = None;
    }

    /// Handle a navigation key against the current flattened rows.
    pub fn on_key_nav(&self, key: NavKey, focus: Focus) -> NavOutcome {
        let mut session = self.session.lock();
        let rows: Vec<CompanyNode> = flatten_for_table(&session.parents, &session.expanded)
            .into_iter()
            .map(|row| row.node)
            .collect();
        session.handle_key(key, focus, &rows)
    }

    /// Fetch the first page and select the node with `id`.
    ///
    /// Parents are checked first; then each listed parent is expanded in
    /// order (loading children when missing) until a matching child turns up.
    /// Nothing is selected unless the first page fetch is applied.
    pub async fn auto_select_by_id(&self, id: &str) -> Option<CompanyNode> {
        self.set_page(1);
        let outcome = self.fetch_parents().await;
        if outcome != FetchOutcome::Applied {
            debug!("Auto-select of {id} abandoned, first page fetch {outcome:?}");
            return None;
        }

        let (direct, parent_ids): (Option<CompanyNode>, Vec<CompanyId>) = {
            let session = self.session.lock();
            (
                session.parent(id).cloned(),
                session.parents.iter().map(|parent| parent.id.clone()).collect(),
            )
        };
        if let Some(parent) = direct {
            self.select(parent.clone());
            return Some(parent);
        }

        for parent_id in parent_ids {
            let loaded = self
                .session
                .lock()
                .parent(&parent_id)
                .is_some_and(CompanyNode::children_loaded);
            if !loaded {
                self.expand(&parent_id).await;
            }

            let found = self.session.lock().parent(&parent_id).and_then(|parent| {
                parent
                    .loaded_children()
                    .iter()
                    .find(|child| child.id == id)
                    .cloned()
            });
            if let Some(child) = found {
                self.select(child.clone());
                return Some(child);
            }
        }

        debug!("Auto-select found no company {id} on the first page");
        None
    }

    pub fn query(&self) -> String {
        self.session.lock().query.clone()
    }

    pub fn page(&self) -> usize {
        self.session.lock().page
    }

    pub fn page_size(&self) -> usize {
        self.session.lock().page_size
    }

    pub fn total(&self) -> usize {
        self.session.lock().total
    }

    pub fn loading(&self) -> bool {
        self.session.lock().loading()
    }

    pub fn selection(&self) -> Option<CompanyNode> {
        self.session.lock().selection.clone()
    }

    pub fn highlight_index(&self) -> Option<usize> {
        self.session.lock().highlight
    }

    pub fn parents(&self) -> Vec<CompanyNode> {
        self.session.lock().parents.clone()
    }

    pub fn is_expanded(&self, parent_id: &str) -> bool {
        self.session.lock().expanded.contains(parent_id)
    }

    /// Parents with their loaded children, flattened for display.
    pub fn flat_nodes(&self) -> Vec<FlatNode> {
        let session = self.session.lock();
        flatten_for_table(&session.parents, &session.expanded)
    }
}
