//! Application orchestration layer
//!
//! Wires settings, the directory store, the query service and a search
//! session together, and executes one CLI command against them.

use crate::config::Settings;
use crate::directory::{
    CompanyNode, CompanyUpdate, DirectoryStore, JsonFileSnapshot, NewClientInput,
};
use crate::error::{ClientsError, Result};
use crate::query::{ClientDirectory, InMemoryDirectory};
use crate::search::{ClientSearch, FetchOutcome, FlatNode};
use std::io::Write;
use std::sync::Arc;

/// A single unit of work requested from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List {
        query: String,
        page: usize,
        page_size: Option<usize>,
    },
    Children {
        parent_id: String,
    },
    Search {
        query: String,
    },
    Show {
        id: String,
    },
    Create(NewClientInput),
    Update {
        id: String,
        update: CompanyUpdate,
    },
    /// Run a search session: query, prefetch children, optionally auto-select.
    Pick {
        query: String,
        select: Option<String>,
    },
}

/// Application orchestrator - owns the components for one process
pub struct Application {
    settings: Settings,
    store: Arc<DirectoryStore>,
    directory: Arc<InMemoryDirectory>,
    search: Arc<ClientSearch>,
}

impl Application {
    /// Build the component graph from `settings`.
    ///
    /// With a snapshot path the directory is restored from (and saved to)
    /// that file; otherwise it is seeded and lives only in memory.
    pub fn new(settings: Settings) -> Self {
        let store = Arc::new(match &settings.snapshot_path {
            Some(path) => {
                DirectoryStore::initialize(Arc::new(JsonFileSnapshot::new(path)), settings.seed)
            }
            None => DirectoryStore::seeded(settings.seed),
        });
        let directory = Arc::new(
            InMemoryDirectory::new(Arc::clone(&store))
                .with_latency(settings.latency())
                .with_search_limit(settings.search_limit),
        );
        let search = Arc::new(ClientSearch::new(
            directory.clone() as Arc<dyn ClientDirectory>,
            settings.search_config(),
        ));

        Self {
            settings,
            store,
            directory,
            search,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<DirectoryStore> {
        &self.store
    }

    pub fn search(&self) -> &Arc<ClientSearch> {
        &self.search
    }

    /// Execute `command`, writing human-readable output to `out`.
    pub async fn execute(&self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::List {
                query,
                page,
                page_size,
            } => {
                let page_size = page_size.unwrap_or(self.settings.page_size);
                if page_size == 0 {
                    return Err(ClientsError::invalid_argument("page size must be positive"));
                }
                let listing = self.directory.list_parents(&query, page, page_size).await?;
                for row in &listing.rows {
                    writeln!(out, "{}", format_node(row))?;
                }
                writeln!(
                    out,
                    "page {} - {} of {} parents",
                    page.max(1),
                    listing.rows.len(),
                    listing.total
                )?;
            }
            Command::Children { parent_id } => {
                let children = self.directory.list_children(&parent_id).await?;
                if children.is_empty() {
                    writeln!(out, "no subsidiaries for {parent_id}")?;
                }
                for child in &children {
                    writeln!(out, "{}", format_node(child))?;
                }
            }
            Command::Search { query } => {
                for hit in self.directory.search_companies(&query).await? {
                    writeln!(out, "{}", format_node(&hit))?;
                }
            }
            Command::Show { id } => match self.directory.get_company_by_id(&id).await? {
                Some(node) => write_details(out, &node)?,
                None => writeln!(out, "company {id} not found")?,
            },
            Command::Create(input) => {
                if input.name.trim().is_empty() {
                    return Err(ClientsError::invalid_argument("company name is required"));
                }
                let created = self.directory.create_company(input).await?;
                self.store.save();
                write_details(out, &created)?;
            }
            Command::Update { id, update } => {
                if update.is_empty() {
                    return Err(ClientsError::invalid_argument("nothing to update"));
                }
                match self.directory.update_company(&id, update).await? {
                    Some(node) => write_details(out, &node)?,
                    None => writeln!(out, "company {id} not found")?,
                }
            }
            Command::Pick { query, select } => {
                if self.search.submit_query(query).await == FetchOutcome::Failed {
                    return Err(ClientsError::directory("client listing failed"));
                }
                if let Some(id) = select {
                    if self.search.auto_select_by_id(&id).await.is_none() {
                        writeln!(out, "company {id} is not on the first page")?;
                    }
                }
                let selected = self.search.selection().map(|node| node.id);
                for row in self.search.flat_nodes() {
                    writeln!(out, "{}", format_row(&row, selected.as_deref()))?;
                }
                writeln!(out, "{} parents match", self.search.total())?;
            }
        }
        Ok(())
    }
}

/// One-line summary: `C0002  ACTIVE    Wilco Builders`.
pub fn format_node(node: &CompanyNode) -> String {
    format!("{:<10} {:<9} {}", node.id, node.status.as_str(), node.name)
}

/// Table row for the picker, marking the selection and child rows.
pub fn format_row(row: &FlatNode, selected: Option<&str>) -> String {
    let marker = if selected == Some(row.node.id.as_str()) {
        '*'
    } else {
        ' '
    };
    let owner = row.parent_id.as_deref().unwrap_or("");
    format!("{marker} {} {owner}", format_node(&row.node))
        .trim_end()
        .to_string()
}

fn write_details(out: &mut impl Write, node: &CompanyNode) -> Result<()> {
    writeln!(out, "{}", format_node(node))?;
    if let Some(parent_id) = &node.parent_id {
        writeln!(out, "  parent: {parent_id}")?;
    }
    if let Some(cr_number) = &node.cr_number {
        writeln!(out, "  cr number: {cr_number}")?;
    }
    for level in node.census_levels.iter().flatten() {
        writeln!(out, "  {}: {}", level.level_name, level.items.join(", "))?;
    }
    for child in node.loaded_children() {
        writeln!(out, "  - {}", format_node(child))?;
    }
    Ok(())
}
