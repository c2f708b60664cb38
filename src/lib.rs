//! # clientdesk - Client Hierarchy Directory
//!
//! Parent companies with their subsidiaries, searchable through a paginated
//! query service and browsed through a search session that debounces input,
//! loads subsidiaries lazily and supports keyboard selection.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`directory`] - Company model, deterministic seed data, canonical store, snapshots
//! - [`query`] - Filtering/pagination and the async [`ClientDirectory`] service
//! - [`search`] - Search session controller, debouncing, flattening, key navigation
//! - [`config`] - Runtime settings
//! - [`app`] - Component wiring and command execution for the CLI

// Core modules
pub mod config;
pub mod error;

// Components, leaf-first
pub mod directory;
pub mod query;
pub mod search;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{ClientsError, Result};

// Public API surface for external usage
pub use app::{Application, Command};
pub use config::Settings;
pub use directory::{CompanyNode, DirectoryStore};
pub use query::{ClientDirectory, InMemoryDirectory};
pub use search::ClientSearch;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
