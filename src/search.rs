//! Client search session: debounced query input, lazy subsidiary loading,
//! tree flattening and keyboard navigation.

pub mod controller;
pub mod debounce;
pub mod flatten;
pub mod keys;
pub mod session;

pub use controller::{ChildPrefetch, ClientSearch, FetchOutcome, SearchConfig};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use flatten::{flatten_for_table, FlatNode};
pub use keys::{Focus, NavKey, NavOutcome};
pub use session::{SearchSession, DEFAULT_PAGE_SIZE};
