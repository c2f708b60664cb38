//! Pure filtering and pagination over a parent list.

use crate::directory::CompanyNode;

/// Maximum number of rows returned by [`search_nodes`] unless configured otherwise.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// One page of parent rows plus the full filtered count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentPage {
    /// Parents on the requested page, with `children` stripped.
    pub rows: Vec<CompanyNode>,
    /// Number of parents matching the query across all pages.
    pub total: usize,
}

/// A parent matches if it or any of its loaded children matches.
pub fn parent_matches(parent: &CompanyNode, query: &str) -> bool {
    parent.matches(query) || parent.loaded_children().iter().any(|c| c.matches(query))
}

/// Filter parents by `query` and slice out the 1-based `page`.
///
/// Page 0 is read as page 1. Returned rows never carry children, even when
/// the stored parent has them loaded.
pub fn page_parents(
    companies: &[CompanyNode],
    query: &str,
    page: usize,
    page_size: usize,
) -> ParentPage {
    let filtered: Vec<&CompanyNode> = companies
        .iter()
        .filter(|parent| parent_matches(parent, query))
        .collect();

    let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
    let rows = filtered
        .iter()
        .skip(start)
        .take(page_size)
        .map(|parent| CompanyNode {
            children: None,
            ..(*parent).clone()
        })
        .collect();

    ParentPage {
        rows,
        total: filtered.len(),
    }
}

/// Parents and children matching `query`, interleaved in store order.
///
/// An empty query yields nothing.
pub fn search_nodes(companies: &[CompanyNode], query: &str, limit: usize) -> Vec<CompanyNode> {
    if query.is_empty() {
        return Vec::new();
    }

    companies
        .iter()
        .flat_map(|parent| std::iter::once(parent).chain(parent.loaded_children()))
        .filter(|node| node.matches(query))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{seed_companies, CompanyNode, Status, DEFAULT_SEED};

    #[test]
    fn test_empty_query_returns_everything() {
        let companies = seed_companies(DEFAULT_SEED);
        let page = page_parents(&companies, "", 1, 10);

        assert_eq!(page.total, 18);
        assert_eq!(page.rows.len(), 10);
        assert!(page.rows.iter().all(|row| row.children.is_none()));
    }

    #[test]
    fn test_last_page_is_partial() {
        let companies = seed_companies(DEFAULT_SEED);
        let page = page_parents(&companies, "", 2, 10);

        assert_eq!(page.rows.len(), 8);
        assert_eq!(page.rows[0].id, "C0011");
        assert!(page_parents(&companies, "", 3, 10).rows.is_empty());
    }

    #[test]
    fn test_page_zero_reads_as_first_page() {
        let companies = seed_companies(DEFAULT_SEED);
        assert_eq!(
            page_parents(&companies, "", 0, 5),
            page_parents(&companies, "", 1, 5)
        );
    }

    #[test]
    fn test_child_match_pulls_in_parent() {
        let mut parent = CompanyNode::parent("P1", "Holding", Status::Active);
        parent.children = Some(vec![CompanyNode::child(
            "P1-01",
            "Zephyr Shipping",
            Status::Active,
            "P1",
        )]);
        let companies = vec![parent, CompanyNode::parent("P2", "Other", Status::Active)];

        let page = page_parents(&companies, "zephyr", 1, 10);
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].id, "P1");
    }

    #[test]
    fn test_search_interleaves_and_limits() {
        let companies = seed_companies(DEFAULT_SEED);

        let hits = search_nodes(&companies, "wilco", DEFAULT_SEARCH_LIMIT);
        assert_eq!(hits[0].id, "C0002");
        assert!(hits[1..].iter().all(|hit| hit.parent_id.as_deref() == Some("C0002")));

        let capped = search_nodes(&companies, "c0", 20);
        assert_eq!(capped.len(), 20);
        assert!(search_nodes(&companies, "", 20).is_empty());
    }
}
