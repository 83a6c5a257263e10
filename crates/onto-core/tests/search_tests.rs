//! End-to-end search tests through OntologyService

use std::sync::Arc;

use onto_core::{
    fuzzy, CoreConfig, LoadRequest, MemoryLogger, OntologyService, RawElement, SearchFilters,
};

fn service() -> OntologyService {
    OntologyService::with_config(CoreConfig::default(), Arc::new(MemoryLogger::new()))
}

/// Helper to load a small category ontology
fn load_categories(service: &OntologyService) {
    service
        .load_ontology(
            LoadRequest::new(vec![
                RawElement::new("Fruit", "Category", "", vec![]),
                RawElement::new("Frut", "Category", "", vec![]),
            ])
            .id("onto_categories"),
        )
        .unwrap();
}

#[tokio::test]
async fn test_exact_match_ranks_above_typo() {
    let service = service();
    load_categories(&service);

    let results = service.search("fruit", &SearchFilters::new()).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].element_name, "Fruit");
    assert_eq!(results[0].relevance, 1.0);
    assert_eq!(results[1].element_name, "Frut");
    assert!(results[1].relevance > 0.6 && results[1].relevance < 0.9);
}

#[tokio::test]
async fn test_type_filter_without_match_is_empty() {
    let service = service();
    load_categories(&service);

    let results = service
        .search("fruit", &SearchFilters::new().element_type("Person"))
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_type_filter_ignores_case_and_underscores() {
    let service = service();
    service
        .load_ontology(
            LoadRequest::new(vec![
                RawElement::new("Chene", "Living_Thing/Arbre", "", vec![]),
                RawElement::new("Chien", "Animal", "", vec![]),
            ])
            .id("onto_nature"),
        )
        .unwrap();

    let results = service
        .search("chene", &SearchFilters::new().element_type("living thing"))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].element_name, "Chene");
}

#[tokio::test]
async fn test_no_match_is_empty_not_error() {
    let service = service();
    load_categories(&service);

    let results = service
        .search("zzzzzzzz", &SearchFilters::new())
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_empty_store() {
    let results = service().search("fruit", &SearchFilters::new()).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_results_span_ontologies() {
    let service = service();
    load_categories(&service);
    service
        .load_ontology(
            LoadRequest::new(vec![RawElement::new("Fruit", "Aliment", "", vec![4])])
                .id("onto_food"),
        )
        .unwrap();

    let results = service.search("fruit", &SearchFilters::new()).await.unwrap();
    let rows: Vec<(&str, &str)> = results
        .iter()
        .map(|r| (r.element_name.as_str(), r.ontology_id.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Fruit", "onto_categories"),
            ("Fruit", "onto_food"),
            ("Frut", "onto_categories"),
        ]
    );
}

#[test]
fn test_fuzzy_reference_values() {
    assert_eq!(fuzzy("apple", "apple", 0.3), 1.0);
    assert_eq!(fuzzy("apple", "banana", 0.3), 0.0);
    assert_eq!(fuzzy("apple", "appl", 0.3), 0.8);
    // containment only runs one way
    assert_eq!(fuzzy("appl", "apple", 0.3), 1.0);
}
