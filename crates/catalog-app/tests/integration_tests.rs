//! End-to-end tests for the catalog driver.
//!
//! Each test runs every stage over the built-in sample catalog and index
//! extras with its own configuration and inspects the resulting report.

use serde_json::Value;

use catalog_app::report::Report;
use catalog_app::{run, sample};
use catalog_core::config::CatalogConfig;
use catalog_core::error::CatalogError;
use catalog_core::types::{IndexStrategy, SortAlgorithm, SortField};

// =============================================================================
// Helpers
// =============================================================================

fn run_with(config: &CatalogConfig) -> Report {
    run(
        config,
        sample::sample_items().unwrap(),
        &sample::index_extras().unwrap(),
    )
    .unwrap()
}

fn default_report() -> Report {
    run_with(&CatalogConfig::default())
}

const BY_PRICE: [u64; 9] = [106, 109, 108, 105, 104, 103, 110, 107, 101];

// =============================================================================
// Store
// =============================================================================

#[test]
fn test_store_stage() {
    let report = default_report();
    let store = &report.store;
    assert_eq!(store.loaded, 10);
    assert_eq!(store.capacity_after_load, 10);
    assert_eq!(store.updated_fields, Some(vec!["price", "stock"]));
    assert!(store.unknown_fields.is_empty());
    assert!(store.deleted);
    assert_eq!(store.len, 9);
    assert_eq!(store.capacity, 10);
    assert!((store.total_value - 297_388.8).abs() < 1e-6);
    assert_eq!(store.order, BY_PRICE.to_vec());
}

#[test]
fn test_small_initial_capacity_doubles() {
    let mut config = CatalogConfig::default();
    config.store.initial_capacity = 3;
    let report = run_with(&config);
    assert_eq!(report.store.capacity_after_load, 12);
}

#[test]
fn test_store_order_follows_config() {
    let mut config = CatalogConfig::default();
    config.order.algorithm = SortAlgorithm::Quick;
    config.order.field = SortField::Id;
    let report = run_with(&config);
    assert_eq!(
        report.store.order,
        vec![101, 103, 104, 105, 106, 107, 108, 109, 110]
    );
}

// =============================================================================
// Combinations
// =============================================================================

#[test]
fn test_combinations_within_budget() {
    let report = default_report();
    let combinations = &report.combinations;
    assert!(!combinations.skipped);
    assert!(combinations.count > 1);
    assert_eq!(combinations.top.len(), 5);
    assert!(combinations.top.iter().all(|c| c.total_price <= 700.0));
    assert!(combinations
        .top
        .windows(2)
        .all(|w| w[0].total_price >= w[1].total_price));
}

#[test]
fn test_combinations_skipped_for_large_store() {
    let mut config = CatalogConfig::default();
    config.combinations.max_items = 4;
    let report = run_with(&config);
    assert!(report.combinations.skipped);
    assert_eq!(report.combinations.count, 0);
}

#[test]
fn test_zero_budget_only_empty_combination() {
    let mut config = CatalogConfig::default();
    config.combinations.budget = 0.0;
    let report = run_with(&config);
    assert_eq!(report.combinations.count, 1);
    assert!(report.combinations.top[0].names.is_empty());
}

// =============================================================================
// Searches and sorts
// =============================================================================

#[test]
fn test_searches() {
    let searches = default_report().searches;
    assert_eq!(searches.linear_by_name, Some(101));
    assert_eq!(searches.binary_by_id, Some(103));
    assert_eq!(searches.interpolation_by_price, Some(103));
    assert_eq!(searches.exponential_by_rating, Some(104));
}

#[test]
fn test_sorts() {
    let report = default_report();
    assert_eq!(report.sorts.len(), 4);
    for sort in &report.sorts {
        match sort.algorithm {
            SortAlgorithm::KWay => {
                assert_eq!(sort.field, SortField::SalesVolume);
                assert_eq!(sort.ids, vec![105, 104, 106, 109, 108, 103, 110, 107, 101]);
            }
            SortAlgorithm::Merge => assert_eq!(sort.ids, BY_PRICE.to_vec()),
            _ => {
                assert_eq!(sort.field, SortField::Price);
                // Only the two 49.99 items may swap.
                assert_eq!(sort.ids[2..], BY_PRICE[2..]);
            }
        }
    }
}

// =============================================================================
// Graphs
// =============================================================================

#[test]
fn test_supplier_graph_mst() {
    let graph = default_report().supplier_graph;
    assert_eq!(graph.suppliers, 4);
    assert_eq!(graph.prim, vec![(1, 2), (1, 4), (2, 3)]);
    assert_eq!(graph.kruskal, vec![(1, 2), (1, 4), (2, 3)]);
    assert_eq!(graph.prim_weight, graph.kruskal_weight);
}

#[test]
fn test_catalog_graph_is_disconnected() {
    let graph = default_report().catalog_graph;
    assert_eq!(graph.suppliers, 5);
    assert_eq!(graph.edges.len(), 4);
    assert_eq!(graph.prim, vec![(201, 205)]);
    assert_eq!(graph.kruskal, vec![(201, 205), (202, 203), (202, 204)]);
    assert_eq!(graph.kruskal_weight, 3);
}

// =============================================================================
// Index
// =============================================================================

#[test]
fn test_chaining_index() {
    let report = default_report();
    assert_eq!(report.index.len(), 2);
    let index = &report.index[0];
    assert_eq!(index.strategy, IndexStrategy::Chaining);
    assert_eq!(index.buckets.len(), 10);
    assert_eq!(index.found.as_deref(), Some("Smart TV 50 inch"));
    assert!(index.rejected.is_empty());
    assert_eq!(index.stats.len, 12);
    // 201 and 202 land in the buckets of 101 and 102.
    assert_eq!(index.stats.collisions, 2);
    // Twelve inserts plus the search for 101, first in its chain.
    assert_eq!(index.stats.probes, 13);
}

#[test]
fn test_probing_index_side_by_side() {
    let report = default_report();
    let index = &report.index[1];
    assert_eq!(index.strategy, IndexStrategy::Probing);
    assert_eq!(index.stats.len, 10);
    assert_eq!(index.rejected, vec![201, 202]);
    // Each extra walks the whole full table before being refused.
    assert_eq!(index.stats.collisions, 20);
    assert_eq!(index.stats.probes, 10 + 11 + 11 + 1);
    assert_eq!(index.found.as_deref(), Some("Smart TV 50 inch"));
}

#[test]
fn test_configured_strategy_comes_first() {
    let mut config = CatalogConfig::default();
    config.index.strategy = IndexStrategy::Probing;
    let report = run_with(&config);
    assert_eq!(report.index[0].strategy, IndexStrategy::Probing);
    assert_eq!(report.index[1].strategy, IndexStrategy::Chaining);
}

#[test]
fn test_chaining_index_with_collisions() {
    let mut config = CatalogConfig::default();
    config.index.bucket_count = 7;
    let report = run_with(&config);
    let index = &report.index[0];
    assert_eq!(index.stats.len, 12);
    assert_eq!(index.stats.collisions, 5);
    assert_eq!(index.found.as_deref(), Some("Smart TV 50 inch"));
    assert_eq!(report.index[1].rejected, vec![108, 109, 110, 201, 202]);
}

#[test]
fn test_full_probing_index_rejects_keys() {
    let mut config = CatalogConfig::default();
    config.index.strategy = IndexStrategy::Probing;
    config.index.bucket_count = 5;
    let report = run_with(&config);
    let index = &report.index[0];
    assert_eq!(index.stats.len, 5);
    assert_eq!(index.rejected, vec![106, 107, 108, 109, 110, 201, 202]);
    assert_eq!(index.found.as_deref(), Some("Smart TV 50 inch"));
}

#[test]
fn test_user_catalog_without_extras() {
    let report = run(&CatalogConfig::default(), sample::sample_items().unwrap(), &[]).unwrap();
    assert_eq!(report.index[0].stats.collisions, 0);
    assert_eq!(report.index[0].stats.probes, 11);
    assert_eq!(report.index[1].stats.len, 10);
    assert!(report.index[1].rejected.is_empty());
}

#[test]
fn test_zero_buckets_is_config_error() {
    let mut config = CatalogConfig::default();
    config.index.bucket_count = 0;
    let err = run(&config, sample::sample_items().unwrap(), &[]).unwrap_err();
    assert!(matches!(err, CatalogError::Config(_)));
}

// =============================================================================
// Report serialization
// =============================================================================

#[test]
fn test_report_serializes() {
    let json = serde_json::to_value(default_report()).unwrap();
    assert_eq!(json["store"]["len"], Value::from(9));
    assert_eq!(json["index"][0]["strategy"], Value::from("chaining"));
    assert_eq!(json["index"][1]["strategy"], Value::from("probing"));
    assert_eq!(json["sorts"][3]["algorithm"], Value::from("k_way"));
    assert_eq!(json["searches"]["binary_by_id"], Value::from(103));
}
