//! Company directory: node model, deterministic seed data, the canonical store
//! and snapshot persistence.

pub mod model;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use model::{
    CensusLevel, CompanyId, CompanyNode, CompanyUpdate, FieldBlock, NewClientInput, Status,
    SubsidiaryRequest,
};
pub use seed::{seed_companies, DEFAULT_SEED};
pub use snapshot::{JsonFileSnapshot, MemorySnapshot, SnapshotStore, SNAPSHOT_FILE_NAME};
pub use store::DirectoryStore;
