use catalog_api::models::ProductDraft;
use catalog_api::store::{MemoryStore, ProductStore};
use std::collections::HashSet;
use std::sync::Arc;

// --- Helper Functions ---

fn draft(name: &str, price: f64) -> ProductDraft {
    ProductDraft {
        id: None,
        name: name.to_string(),
        price,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_empty_store_lists_empty_sequence() {
    let store = MemoryStore::new();
    assert!(store.list().await.is_empty());
    assert!(store.get(1).await.is_none());
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let store = MemoryStore::new();

    let created = store.create(draft("Widget", 9.99)).await;
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Widget");
    assert_eq!(created.price, 9.99);

    let fetched = store.get(created.id).await.expect("created product must be retrievable");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_ids_are_monotonic_and_never_reused() {
    let store = MemoryStore::new();

    let first = store.create(draft("A", 1.0)).await;
    let second = store.create(draft("B", 2.0)).await;
    assert!(second.id > first.id);

    // Deleting the newest entry must not free its id for the next create.
    assert!(store.delete(second.id).await);
    let third = store.create(draft("C", 3.0)).await;
    assert!(third.id > second.id);
}

#[tokio::test]
async fn test_update_preserves_stored_id() {
    let store = MemoryStore::new();
    let created = store.create(draft("Widget", 9.99)).await;

    // The draft tries to smuggle in a different id; the stored one wins.
    let mut update = draft("Gadget", 19.99);
    update.id = Some(9000);

    let updated = store
        .update(created.id, update)
        .await
        .expect("update of existing entry must succeed");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Gadget");
    assert_eq!(updated.price, 19.99);

    assert!(store.get(9000).await.is_none());
    assert_eq!(store.get(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_unknown_id_is_absent() {
    let store = MemoryStore::new();
    assert!(store.update(42, draft("Ghost", 1.0)).await.is_none());
}

#[tokio::test]
async fn test_delete_removes_entry_and_preserves_order() {
    let store = MemoryStore::new();

    let a = store.create(draft("A", 1.0)).await;
    let b = store.create(draft("B", 2.0)).await;
    let c = store.create(draft("C", 3.0)).await;

    assert!(store.delete(b.id).await);
    assert!(store.get(b.id).await.is_none());

    // The surviving entries keep their relative order.
    let names: Vec<String> = store.list().await.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["A", "C"]);
    assert_eq!(store.get(a.id).await.unwrap().name, "A");
    assert_eq!(store.get(c.id).await.unwrap().name, "C");
}

#[tokio::test]
async fn test_delete_unknown_id_reports_absent() {
    let store = MemoryStore::new();
    assert!(!store.delete(7).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_creates_assign_distinct_ids() {
    const WRITERS: usize = 32;

    let store = Arc::new(MemoryStore::new());

    let mut handles = Vec::with_capacity(WRITERS);
    for n in 0..WRITERS {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.create(draft(&format!("item-{n}"), n as f64)).await
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let product = handle.await.expect("writer task must not panic");
        // No two writers may observe the same id.
        assert!(ids.insert(product.id), "duplicate id {}", product.id);
    }

    // No lost updates: every create landed exactly once.
    let listed = store.list().await;
    assert_eq!(listed.len(), WRITERS);
    let listed_ids: HashSet<i64> = listed.iter().map(|p| p.id).collect();
    assert_eq!(listed_ids, ids);
}
