use clientdesk::directory::{DirectoryStore, NewClientInput, SubsidiaryRequest, DEFAULT_SEED};
use clientdesk::query::{page_parents, ClientDirectory, InMemoryDirectory};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Seed directory grown with `extra` created parents of three subsidiaries each.
fn grown_store(extra: usize) -> Arc<DirectoryStore> {
    let store = DirectoryStore::seeded(DEFAULT_SEED);
    for i in 0..extra {
        let mut input = NewClientInput::named(format!("Bench Holding {i}"));
        input.subsidiaries = (0..3)
            .map(|j| SubsidiaryRequest::inline(format!("Bench Sub {i}-{j}")))
            .collect();
        store.create(input);
    }
    Arc::new(store)
}

fn bench_page_parents(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_parents");

    for &extra in &[0usize, 1_000, 10_000] {
        let store = grown_store(extra);
        for query in ["", "wilco", "sub 9"] {
            group.bench_with_input(
                BenchmarkId::new(format!("{}_parents", store.len()), query),
                &query,
                |b, query| {
                    b.iter(|| {
                        store.with_companies(|companies| {
                            black_box(page_parents(companies, query, 1, 10))
                        })
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_list_parents_async(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let directory =
        InMemoryDirectory::new(grown_store(1_000)).with_latency(Duration::ZERO);

    c.bench_function("list_parents_async", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(directory.list_parents("bench", 3, 10).await.unwrap()) })
    });
}

criterion_group!(benches, bench_page_parents, bench_list_parents_async);
criterion_main!(benches);
