//! Company node types shared by the store, the query service and the search session.
//!
//! Serialized field names follow the snapshot layout (`isParent`, `parentId`,
//! `censusLevels`, ...) so previously saved directories restore verbatim.

use serde::{Deserialize, Serialize};

/// Identifier of a company node (`C0001`, `C0001-02`, `C10000`, ...).
pub type CompanyId = String;

/// Activation status of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Inactive => "INACTIVE",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = crate::error::ClientsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Status::Active),
            "INACTIVE" => Ok(Status::Inactive),
            _ => Err(crate::error::ClientsError::invalid_argument(format!(
                "unknown status '{value}'"
            ))),
        }
    }
}

/// Four free-text lines used for both contact and address blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field4: Option<String>,
}

/// A named census level with its ordered category labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CensusLevel {
    pub level_name: String,
    pub items: Vec<String>,
}

impl CensusLevel {
    pub fn new(level_name: impl Into<String>, items: &[&str]) -> Self {
        Self {
            level_name: level_name.into(),
            items: items.iter().map(|item| item.to_string()).collect(),
        }
    }
}

/// A parent company or one of its subsidiaries.
///
/// `children` is `None` until the subsidiaries have been loaded; `Some(vec![])`
/// means "loaded, none exist". Parents never carry `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyNode {
    pub id: CompanyId,
    pub name: String,
    pub status: Status,
    pub is_parent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CompanyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CompanyNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cr_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<FieldBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<FieldBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub census_levels: Option<Vec<CensusLevel>>,
}

impl CompanyNode {
    /// Build a parent node with an empty, loaded child list.
    pub fn parent(id: impl Into<CompanyId>, name: impl Into<String>, status: Status) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            is_parent: true,
            parent_id: None,
            children: Some(Vec::new()),
            cr_number: None,
            contact: None,
            address: None,
            census_levels: None,
        }
    }

    /// Build a subsidiary node attached to `parent_id`.
    pub fn child(
        id: impl Into<CompanyId>,
        name: impl Into<String>,
        status: Status,
        parent_id: impl Into<CompanyId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            is_parent: false,
            parent_id: Some(parent_id.into()),
            children: None,
            cr_number: None,
            contact: None,
            address: None,
            census_levels: None,
        }
    }

    /// Case-insensitive substring match on id or name. Empty queries match everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.id.to_lowercase().contains(&needle) || self.name.to_lowercase().contains(&needle)
    }

    /// Loaded children, or an empty slice when none are loaded.
    pub fn loaded_children(&self) -> &[CompanyNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn children_loaded(&self) -> bool {
        self.children.is_some()
    }

    /// Apply a partial update, replacing only the fields it carries.
    pub fn apply(&mut self, update: &CompanyUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(cr_number) = &update.cr_number {
            self.cr_number = Some(cr_number.clone());
        }
        if let Some(contact) = &update.contact {
            self.contact = Some(contact.clone());
        }
        if let Some(address) = &update.address {
            self.address = Some(address.clone());
        }
        if let Some(levels) = &update.census_levels {
            self.census_levels = Some(levels.clone());
        }
    }
}

/// A subsidiary requested as part of [`NewClientInput`].
///
/// Either created inline under the new parent, or copied from an existing
/// company referenced by `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsidiaryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CompanyId>,
    pub name: String,
    #[serde(default)]
    pub created_inline: bool,
}

impl SubsidiaryRequest {
    pub fn inline(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            created_inline: true,
        }
    }

    pub fn existing(id: impl Into<CompanyId>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: Some(id),
            created_inline: false,
        }
    }
}

/// Input for creating a new parent company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClientInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cr_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<FieldBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<FieldBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub census_levels: Option<Vec<CensusLevel>>,
    #[serde(default)]
    pub subsidiaries: Vec<SubsidiaryRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl NewClientInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update of a company's descriptive fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cr_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<FieldBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<FieldBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub census_levels: Option<Vec<CensusLevel>>,
}

impl CompanyUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
