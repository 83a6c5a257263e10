//! Concurrency tests for MemoryStore and the search fan-out

use std::sync::Arc;
use std::thread;

use onto_core::{
    CoreConfig, LoadRequest, MemoryLogger, MemoryStore, OntologyBuilder, OntologyError,
    OntologyService, OntologyStore, RawElement, SearchFilters,
};

#[test]
fn test_concurrent_adds_with_one_winner_per_id() {
    let store = Arc::new(MemoryStore::with_logger(Arc::new(MemoryLogger::new())));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut duplicates = 0;
                for i in 0..25 {
                    let ontology = OntologyBuilder::new()
                        .id(format!("onto_{}", i))
                        .name(format!("worker-{}", worker))
                        .build();
                    if let Err(OntologyError::Duplicate(_)) = store.add(ontology) {
                        duplicates += 1;
                    }
                    let _ = store.list();
                }
                duplicates
            })
        })
        .collect();

    let duplicates: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(store.count(), 25);
    assert_eq!(duplicates, 8 * 25 - 25);
}

#[test]
fn test_snapshot_survives_delete() {
    let store = MemoryStore::with_logger(Arc::new(MemoryLogger::new()));
    store
        .add(OntologyBuilder::new().id("onto_1").name("kept").build())
        .unwrap();

    let snapshot = store.get("onto_1").unwrap();
    store.delete("onto_1").unwrap();

    assert_eq!(snapshot.name, "kept");
    assert!(matches!(
        store.get("onto_1"),
        Err(OntologyError::NotFound { .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_search_while_loading() {
    let service = Arc::new(OntologyService::with_config(
        CoreConfig::default(),
        Arc::new(MemoryLogger::new()),
    ));

    let loader = {
        let service = Arc::clone(&service);
        tokio::task::spawn_blocking(move || {
            for i in 0..50 {
                service
                    .load_ontology(
                        LoadRequest::new(vec![RawElement::new("Prune", "Fruit", "", vec![i])])
                            .id(format!("onto_{:02}", i)),
                    )
                    .unwrap();
            }
        })
    };

    // every intermediate search sees whole ontologies only
    for _ in 0..10 {
        let results = service.search("prune", &SearchFilters::new()).await.unwrap();
        assert!(results.iter().all(|r| r.relevance == 1.0));
        assert!(results.len() <= 50);
    }

    loader.await.unwrap();
    let results = service.search("prune", &SearchFilters::new()).await.unwrap();
    assert_eq!(results.len(), 50);
    assert_eq!(results[0].ontology_id, "onto_00");
}
