//! The authoritative in-memory company directory.

use crate::directory::model::{CompanyNode, CompanyUpdate, NewClientInput, Status};
use crate::directory::seed::seed_companies;
use crate::directory::snapshot::SnapshotStore;
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::sync::Arc;

/// First identifier handed out by [`DirectoryStore::create`].
pub const FIRST_CREATED_ID: u64 = 10_000;

#[derive(Debug)]
struct DirectoryState {
    companies: Vec<CompanyNode>,
    next_id: u64,
}

/// Owns the canonical parent/child nodes and the id counter.
///
/// Callers receive clones; nothing outside the store holds references into it.
pub struct DirectoryStore {
    state: RwLock<DirectoryState>,
    snapshot: Option<Arc<dyn SnapshotStore>>,
}

impl std::fmt::Debug for DirectoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryStore")
            .field("companies", &self.state.read().companies.len())
            .field("persistent", &self.snapshot.is_some())
            .finish()
    }
}

impl DirectoryStore {
    /// Create a store holding exactly `companies`, without persistence.
    pub fn new(companies: Vec<CompanyNode>) -> Self {
        let next_id = next_free_id(&companies);
        Self {
            state: RwLock::new(DirectoryState { companies, next_id }),
            snapshot: None,
        }
    }

    /// Create a store populated from the deterministic seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(seed_companies(seed))
    }

    /// Restore from `snapshot` if it holds a directory, otherwise seed.
    ///
    /// A snapshot fully replaces seed data. Read failures are logged and fall
    /// back to seeding.
    pub fn initialize(snapshot: Arc<dyn SnapshotStore>, seed: u64) -> Self {
        let companies = match snapshot.load() {
            Ok(Some(companies)) => {
                info!("Loaded {} clients from snapshot", companies.len());
                companies
            }
            Ok(None) => {
                debug!("No client snapshot found, seeding with {seed}");
                seed_companies(seed)
            }
            Err(err) => {
                warn!("Failed to load clients from snapshot: {err}");
                seed_companies(seed)
            }
        };

        let next_id = next_free_id(&companies);
        Self {
            state: RwLock::new(DirectoryState { companies, next_id }),
            snapshot: Some(snapshot),
        }
    }

    /// Discard current content and regenerate the seed directory.
    pub fn reseed(&self, seed: u64) {
        let mut state = self.state.write();
        state.companies = seed_companies(seed);
        state.next_id = FIRST_CREATED_ID;
    }

    /// Number of parent companies.
    pub fn len(&self) -> usize {
        self.state.read().companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` against the parent list under a read lock.
    pub fn with_companies<R>(&self, f: impl FnOnce(&[CompanyNode]) -> R) -> R {
        f(&self.state.read().companies)
    }

    /// Clone of the whole directory.
    pub fn companies(&self) -> Vec<CompanyNode> {
        self.state.read().companies.clone()
    }

    /// Stored children of `parent_id`; empty for unknown parents or unloaded children.
    pub fn children_of(&self, parent_id: &str) -> Vec<CompanyNode> {
        self.state
            .read()
            .companies
            .iter()
            .find(|parent| parent.id == parent_id)
            .map(|parent| parent.loaded_children().to_vec())
            .unwrap_or_default()
    }

    /// Look a node up among parents first, then among children.
    pub fn find(&self, id: &str) -> Option<CompanyNode> {
        let state = self.state.read();
        if let Some(parent) = state.companies.iter().find(|parent| parent.id == id) {
            return Some(parent.clone());
        }
        state
            .companies
            .iter()
            .flat_map(|parent| parent.loaded_children())
            .find(|child| child.id == id)
            .cloned()
    }

    /// Insert a new parent at the front of the directory.
    ///
    /// Inline subsidiaries are created fresh. Referenced subsidiaries are
    /// copied under a new id and reparented; the original record stays where
    /// it is, so the same company can then appear twice.
    pub fn create(&self, input: NewClientInput) -> CompanyNode {
        let mut state = self.state.write();

        let new_id = format!("C{:05}", state.next_id);
        state.next_id += 1;

        let mut parent = CompanyNode::parent(
            new_id.clone(),
            input.name,
            input.status.unwrap_or(Status::Active),
        );
        parent.cr_number = input.cr_number;
        parent.contact = input.contact;
        parent.address = input.address;
        parent.census_levels = input.census_levels;

        let mut children = Vec::new();
        for (idx, sub) in input.subsidiaries.iter().enumerate() {
            let child_id = format!("{}-{:02}", new_id, idx + 1);
            if sub.created_inline {
                children.push(CompanyNode::child(
                    child_id,
                    sub.name.clone(),
                    Status::Active,
                    new_id.clone(),
                ));
            } else if let Some(existing_id) = &sub.id {
                let existing = state
                    .companies
                    .iter()
                    .flat_map(|p| std::iter::once(p).chain(p.loaded_children()))
                    .find(|node| &node.id == existing_id)
                    .cloned();
                match existing {
                    Some(mut copy) => {
                        copy.id = child_id;
                        copy.parent_id = Some(new_id.clone());
                        copy.is_parent = false;
                        // the hierarchy is two levels deep
                        copy.children = None;
                        children.push(copy);
                    }
                    None => warn!("Skipping unknown subsidiary reference {existing_id}"),
                }
            }
        }
        parent.children = Some(children);

        state.companies.insert(0, parent.clone());
        info!("Created client {} ({})", parent.name, parent.id);
        parent
    }

    /// Shallow-merge `update` into the parent or child with `id`.
    ///
    /// Children are only searched within their parent's list. The directory
    /// is saved to the snapshot afterwards; save failures are logged.
    pub fn update(&self, id: &str, update: &CompanyUpdate) -> Option<CompanyNode> {
        let updated = {
            let mut state = self.state.write();
            Self::locate_mut(&mut state.companies, id).map(|node| {
                node.apply(update);
                node.clone()
            })
        };

        if let Some(node) = &updated {
            info!(
                "Updated {} {} with {} census levels",
                if node.is_parent { "client" } else { "subsidiary" },
                node.name,
                node.census_levels.as_ref().map_or(0, Vec::len)
            );
            self.save();
        }
        updated
    }

    /// Persist the current directory. Best effort.
    pub fn save(&self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let companies = self.companies();
        match snapshot.save(&companies) {
            Ok(()) => debug!("Saved {} clients to snapshot", companies.len()),
            Err(err) => warn!("Failed to save clients to snapshot: {err}"),
        }
    }

    fn locate_mut<'a>(companies: &'a mut [CompanyNode], id: &str) -> Option<&'a mut CompanyNode> {
        if let Some(idx) = companies.iter().position(|parent| parent.id == id) {
            return companies.get_mut(idx);
        }
        companies
            .iter_mut()
            .filter_map(|parent| parent.children.as_mut())
            .flat_map(|children| children.iter_mut())
            .find(|child| child.id == id)
    }
}

/// First unused created-company number, so restored directories never reuse ids.
fn next_free_id(companies: &[CompanyNode]) -> u64 {
    companies
        .iter()
        .filter_map(|parent| parent.id.strip_prefix('C')?.parse::<u64>().ok())
        .filter(|number| *number >= FIRST_CREATED_ID)
        .map(|number| number + 1)
        .max()
        .unwrap_or(FIRST_CREATED_ID)
}
