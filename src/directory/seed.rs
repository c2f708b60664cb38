//! Deterministic synthetic directory used when no snapshot is available.

use crate::directory::model::{CensusLevel, CompanyNode, Status};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Parent company names, in creation order.
pub const PARENT_NAMES: [&str; 18] = [
    "Company Test Ltd.",
    "Wilco Builders",
    "Apto Insurance PR Japan",
    "BUNIQUE TEST",
    "Adax Insurance Int",
    "Grant Mandela E Assist",
    "Koffels Motor Corp",
    "Stellar Holdings Group",
    "Pacific Trade Ventures",
    "Blue Horizon Technologies",
    "Metro Dynamics Ltd",
    "Crown Enterprises",
    "Summit Financial Services",
    "Apex Marketing Solutions",
    "Velocity Logistics Co",
    "Nexus Global Partners",
    "Prime Investments Ltd",
    "Quantum Retail Group",
];

const MIN_CHILDREN: usize = 2;
const MAX_CHILDREN: usize = 7;
const CHILD_ACTIVE_PROBABILITY: f64 = 0.8;

/// Generate the seed directory.
///
/// Every fourth parent (index 0, 4, 8, ...) starts INACTIVE. Child counts and
/// child statuses come from a ChaCha stream keyed by `seed`, so equal seeds
/// always produce equal directories.
pub fn seed_companies(seed: u64) -> Vec<CompanyNode> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    PARENT_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let parent_id = format!("C{:04}", idx + 1);
            let status = if idx % 4 == 0 {
                Status::Inactive
            } else {
                Status::Active
            };

            let child_count = rng.gen_range(MIN_CHILDREN..=MAX_CHILDREN);
            let children = (0..child_count)
                .map(|i| {
                    let child_status = if rng.gen_bool(CHILD_ACTIVE_PROBABILITY) {
                        Status::Active
                    } else {
                        Status::Inactive
                    };
                    let mut child = CompanyNode::child(
                        format!("{}-{:02}", parent_id, i + 1),
                        format!("{} (Subsidiary {})", name, i + 1),
                        child_status,
                        parent_id.clone(),
                    );
                    child.census_levels = Some(vec![
                        CensusLevel::new("Team", &["Development", "Design", "QA", "DevOps"]),
                        CensusLevel::new("Region", &["North", "South", "East", "West"]),
                    ]);
                    child
                })
                .collect();

            let mut parent = CompanyNode::parent(parent_id, *name, status);
            parent.children = Some(children);
            parent.census_levels = Some(vec![
                CensusLevel::new("Department", &["Engineering", "Sales", "Marketing", "Finance"]),
                CensusLevel::new("Location", &["New York", "San Francisco", "London", "Tokyo"]),
            ]);
            parent
        })
        .collect()
}
