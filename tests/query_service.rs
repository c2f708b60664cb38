use std::sync::Arc;
use std::time::Duration;

use clientdesk::directory::{
    CompanyUpdate, DirectoryStore, JsonFileSnapshot, NewClientInput, Status, SubsidiaryRequest,
    DEFAULT_SEED,
};
use clientdesk::query::{page_parents, ClientDirectory, InMemoryDirectory};
use proptest::prelude::*;

fn directory() -> InMemoryDirectory {
    InMemoryDirectory::new(Arc::new(DirectoryStore::seeded(DEFAULT_SEED)))
        .with_latency(Duration::ZERO)
}

#[tokio::test]
async fn wilco_query_finds_exactly_one_parent() {
    let page = directory().list_parents("wilco", 1, 10).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].name, "Wilco Builders");
    assert!(page.rows[0].children.is_none());
}

#[tokio::test]
async fn empty_query_counts_every_parent() {
    let directory = directory();
    let page = directory.list_parents("", 1, 10).await.unwrap();

    assert_eq!(page.total, directory.store().len());
    assert_eq!(page.total, 18);
}

#[tokio::test]
async fn empty_search_returns_nothing() {
    assert!(directory().search_companies("").await.unwrap().is_empty());
}

#[tokio::test]
async fn subsidiary_match_includes_its_parent() {
    let directory = directory();
    directory
        .update_company(
            "C0007-01",
            CompanyUpdate {
                name: Some("Zanzibar Freight".to_string()),
                ..CompanyUpdate::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    let page = directory.list_parents("zanzibar", 1, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.rows[0].id, "C0007");
    assert_eq!(page.rows[0].name, "Koffels Motor Corp");
}

#[tokio::test]
async fn create_with_inline_subsidiary() {
    let directory = directory();
    let mut input = NewClientInput::named("New Co");
    input.subsidiaries = vec![SubsidiaryRequest::inline("Sub A")];

    let parent = directory.create_company(input).await.unwrap();

    assert!(parent.is_parent);
    assert_eq!(parent.status, Status::Active);
    let children = parent.children.as_ref().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name, "Sub A");
    assert_eq!(children[0].parent_id.as_deref(), Some(parent.id.as_str()));

    // new parents are listed first
    let first = directory.list_parents("", 1, 1).await.unwrap();
    assert_eq!(first.rows[0].id, parent.id);
    assert_eq!(directory.list_children(&parent.id).await.unwrap(), *children);
}

#[tokio::test]
async fn updates_persist_to_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clients_data.json");

    let store = Arc::new(DirectoryStore::initialize(
        Arc::new(JsonFileSnapshot::new(&path)),
        DEFAULT_SEED,
    ));
    let directory = InMemoryDirectory::new(store).with_latency(Duration::ZERO);
    directory
        .update_company(
            "C0001",
            CompanyUpdate {
                status: Some(Status::Active),
                cr_number: Some("CR-778".to_string()),
                ..CompanyUpdate::default()
            },
        )
        .await
        .unwrap();

    let restored = DirectoryStore::initialize(Arc::new(JsonFileSnapshot::new(&path)), 999);
    let parent = restored.find("C0001").unwrap();
    assert_eq!(parent.status, Status::Active);
    assert_eq!(parent.cr_number.as_deref(), Some("CR-778"));
    // restored data replaces seeding entirely, whatever the seed
    let reseeded = DirectoryStore::initialize(Arc::new(JsonFileSnapshot::new(&path)), 1);
    assert_eq!(restored.companies(), reseeded.companies());
}

#[tokio::test]
async fn update_of_unknown_id_is_none() {
    let result = directory()
        .update_company(
            "C7777",
            CompanyUpdate {
                name: Some("Ghost".to_string()),
                ..CompanyUpdate::default()
            },
        )
        .await
        .unwrap();
    assert!(result.is_none());
}

proptest! {
    #[test]
    fn page_never_exceeds_page_size(
        query in "[a-z0-9 ]{0,4}",
        page in 0usize..5,
        page_size in 0usize..25,
    ) {
        let companies = clientdesk::directory::seed_companies(DEFAULT_SEED);
        let listing = page_parents(&companies, &query, page, page_size);

        prop_assert!(listing.rows.len() <= page_size);
        prop_assert!(listing.total <= companies.len());
        prop_assert!(listing.rows.iter().all(|row| row.children.is_none()));
    }

    #[test]
    fn parents_with_matching_children_are_included(
        parent_idx in 0usize..18,
        child_no in 1usize..3,
    ) {
        let companies = clientdesk::directory::seed_companies(DEFAULT_SEED);
        let child_id = format!("C{:04}-{:02}", parent_idx + 1, child_no);

        let listing = page_parents(&companies, &child_id.to_lowercase(), 1, 100);
        let parent_id = format!("C{:04}", parent_idx + 1);
        prop_assert!(listing.rows.iter().any(|row| row.id == parent_id));
    }
}
