//! Transient state of one client search session.

use crate::directory::{CompanyId, CompanyNode};
use crate::search::flatten::flat_len;
use crate::search::keys::{Focus, NavKey, NavOutcome};
use std::collections::HashSet;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Identifier attached to parent fetches so stale responses can be dropped.
pub type RequestId = u64;

/// Interactive state owned by the search controller. Never persisted.
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub query: String,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    /// Working set of displayed parents, children attached as they load
    pub parents: Vec<CompanyNode>,
    pub expanded: HashSet<CompanyId>,
    pub selection: Option<CompanyNode>,
    /// Index into the flattened rows; `None` when nothing is highlighted
    pub highlight: Option<usize>,
    next_request_id: RequestId,
    latest_fetch: Option<RequestId>,
    fetch_in_flight: bool,
    child_loads: usize,
}

impl SearchSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_size,
            total: 0,
            parents: Vec::new(),
            expanded: HashSet::new(),
            selection: None,
            highlight: None,
            next_request_id: 1,
            latest_fetch: None,
            fetch_in_flight: false,
            child_loads: 0,
        }
    }

    pub fn loading(&self) -> bool {
        self.fetch_in_flight || self.child_loads > 0
    }

    /// Register a new parent fetch; it supersedes all earlier ones.
    pub fn begin_fetch(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_fetch = Some(request_id);
        self.fetch_in_flight = true;
        request_id
    }

    pub fn is_latest_fetch(&self, request_id: RequestId) -> bool {
        self.latest_fetch == Some(request_id)
    }

    /// Mark `request_id` done. Only the latest fetch clears the loading flag.
    pub fn finish_fetch(&mut self, request_id: RequestId) {
        if self.is_latest_fetch(request_id) {
            self.fetch_in_flight = false;
        }
    }

    pub fn begin_child_load(&mut self) {
        self.child_loads += 1;
    }

    pub fn finish_child_load(&mut self) {
        self.child_loads = self.child_loads.saturating_sub(1);
    }

    /// Replace the working set with a freshly listed page.
    pub fn apply_page(&mut self, rows: Vec<CompanyNode>, total: usize) {
        self.parents = rows;
        self.total = total;
        self.clamp_highlight();
    }

    /// Attach loaded children to a displayed parent. False if the parent is gone.
    pub fn attach_children(&mut self, parent_id: &str, children: Vec<CompanyNode>) -> bool {
        match self.parent_mut(parent_id) {
            Some(parent) => {
                parent.children = Some(children);
                true
            }
            None => false,
        }
    }

    pub fn parent(&self, parent_id: &str) -> Option<&CompanyNode> {
        self.parents.iter().find(|parent| parent.id == parent_id)
    }

    fn parent_mut(&mut self, parent_id: &str) -> Option<&mut CompanyNode> {
        self.parents.iter_mut().find(|parent| parent.id == parent_id)
    }

    /// Ids of displayed parents whose children have not been loaded.
    pub fn parents_missing_children(&self) -> Vec<CompanyId> {
        self.parents
            .iter()
            .filter(|parent| parent.is_parent && !parent.children_loaded())
            .map(|parent| parent.id.clone())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        flat_len(&self.parents)
    }

    /// Keep the highlight inside the current row range.
    pub fn clamp_highlight(&mut self) {
        let rows = self.row_count();
        self.highlight = match self.highlight {
            Some(_) if rows == 0 => None,
            Some(index) if index >= rows => Some(rows - 1),
            other => other,
        };
    }

    /// Apply a navigation key against the flattened row nodes.
    pub fn handle_key(&mut self, key: NavKey, focus: Focus, rows: &[CompanyNode]) -> NavOutcome {
        match key {
            NavKey::Slash if focus != Focus::TextInput => NavOutcome::FocusSearch,
            NavKey::Down => {
                let next = match self.highlight {
                    None if !rows.is_empty() => Some(0),
                    Some(index) if index + 1 < rows.len() => Some(index + 1),
                    other => other,
                };
                self.highlight = next;
                NavOutcome::Highlighted(next)
            }
            NavKey::Up => {
                if let Some(index) = self.highlight {
                    if index > 0 {
                        self.highlight = Some(index - 1);
                    }
                }
                NavOutcome::Highlighted(self.highlight)
            }
            NavKey::Enter => match self.highlight.and_then(|index| rows.get(index)) {
                Some(node) => {
                    self.selection = Some(node.clone());
                    NavOutcome::Selected(node.clone())
                }
                None => NavOutcome::Ignored,
            },
            NavKey::Slash | NavKey::Other => NavOutcome::Ignored,
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
