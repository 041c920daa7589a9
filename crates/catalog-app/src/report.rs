//! Runs every catalog stage over one item set and gathers the results.
//!
//! Stages run in a fixed order: store maintenance, budget combinations,
//! searches, sorts, similarity graphs, then the index table. The middle
//! stages read a snapshot of the store taken after its update and delete.
//! The index stage builds one table per collision strategy, the configured
//! one first, over the items as loaded followed by the index extras.

use serde::Serialize;
use tracing::{info, warn};

use catalog_core::config::CatalogConfig;
use catalog_core::error::{CatalogError, Result};
use catalog_core::types::{IndexStrategy, Item, ItemId, ItemUpdate, SortAlgorithm, SortField};
use catalog_graph::{SimilarityGraph, WeightedEdge};
use catalog_index::{build_table, Bucket, TableStats};
use catalog_order::{
    binary_search_by_id, exponential_search_by_rating, find_by_name,
    interpolation_search_by_price, sort_items, sort_store,
};
use catalog_store::GrowableStore;

use crate::sample;

const UPDATE_ID: ItemId = 101;
const DELETE_ID: ItemId = 102;
const SEARCH_NAME: &str = "Smart TV 50 inch";
const SEARCH_ID: ItemId = 103;
const SEARCH_PRICE: f64 = 129.99;
const SEARCH_RATING: f64 = 4.7;
const TOP_COMBINATIONS: usize = 5;

/// Full driver output.
#[derive(Debug, Serialize)]
pub struct Report {
    pub store: StoreReport,
    pub combinations: CombinationReport,
    pub searches: SearchReport,
    pub sorts: Vec<SortReport>,
    pub supplier_graph: GraphReport,
    pub catalog_graph: GraphReport,
    /// Configured strategy first, then the other one.
    pub index: Vec<IndexReport>,
}

#[derive(Debug, Serialize)]
pub struct StoreReport {
    pub loaded: usize,
    pub capacity_after_load: usize,
    pub updated_id: ItemId,
    /// `None` when no item had the id.
    pub updated_fields: Option<Vec<&'static str>>,
    pub unknown_fields: Vec<String>,
    pub deleted_id: ItemId,
    pub deleted: bool,
    pub len: usize,
    pub capacity: usize,
    pub total_value: f64,
    pub algorithm: SortAlgorithm,
    pub field: SortField,
    /// Store order after the configured sort.
    pub order: Vec<ItemId>,
}

#[derive(Debug, Serialize)]
pub struct CombinationSummary {
    pub names: Vec<String>,
    pub total_price: f64,
}

#[derive(Debug, Serialize)]
pub struct CombinationReport {
    pub budget: f64,
    /// Set when the store exceeds `combinations.max_items`.
    pub skipped: bool,
    pub count: usize,
    /// Highest-priced combinations, most expensive first.
    pub top: Vec<CombinationSummary>,
}

#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub linear_by_name: Option<ItemId>,
    pub binary_by_id: Option<ItemId>,
    pub interpolation_by_price: Option<ItemId>,
    pub exponential_by_rating: Option<ItemId>,
}

#[derive(Debug, Serialize)]
pub struct SortReport {
    pub algorithm: SortAlgorithm,
    pub field: SortField,
    pub ids: Vec<ItemId>,
}

#[derive(Debug, Serialize)]
pub struct GraphReport {
    pub suppliers: usize,
    pub edges: Vec<WeightedEdge>,
    pub prim: Vec<(u64, u64)>,
    pub prim_weight: usize,
    pub kruskal: Vec<(u64, u64)>,
    pub kruskal_weight: usize,
}

#[derive(Debug, Serialize)]
pub struct IndexReport {
    pub strategy: IndexStrategy,
    pub buckets: Vec<Bucket<String>>,
    /// Keys refused because every slot was taken.
    pub rejected: Vec<ItemId>,
    pub search_key: ItemId,
    pub found: Option<String>,
    pub stats: TableStats,
}

/// Run every stage over `items` with `config`.
///
/// `index_extras` are indexed after `items` but take no part in the other
/// stages.
pub fn run(config: &CatalogConfig, items: Vec<Item>, index_extras: &[Item]) -> Result<Report> {
    let mut store = GrowableStore::from_config(&config.store);
    let loaded = items.len();
    store.extend(items.iter().cloned());
    let capacity_after_load = store.capacity();

    let raw_update = serde_json::json!({ "price": 450.0, "stock": 100 });
    let (update, unknown_fields) = ItemUpdate::from_json(&raw_update)?;
    let updated_fields = store.update(UPDATE_ID, &update);
    let deleted = store.delete(DELETE_ID).is_some();
    let total_value = store.total_value();
    info!(len = store.len(), total_value, "Store stage complete");

    let live = store.as_slice().to_vec();
    let combinations = combination_stage(config, &store);
    let searches = search_stage(&live);
    let sorts = sort_stage(config, &live);
    let supplier_graph = graph_report(&sample::supplier_graph());
    let mut catalog_graph = SimilarityGraph::from_items(&live);
    catalog_graph.create_graph();
    let catalog_graph = graph_report(&catalog_graph);

    let indexed: Vec<&Item> = items.iter().chain(index_extras).collect();
    let index = [config.index.strategy, config.index.strategy.other()]
        .into_iter()
        .map(|strategy| index_stage(strategy, config.index.bucket_count, &indexed))
        .collect::<Result<Vec<_>>>()?;

    sort_store(
        &mut store,
        config.order.algorithm,
        config.order.field,
        config.order.k_way_parts,
    );

    Ok(Report {
        store: StoreReport {
            loaded,
            capacity_after_load,
            updated_id: UPDATE_ID,
            updated_fields,
            unknown_fields,
            deleted_id: DELETE_ID,
            deleted,
            len: store.len(),
            capacity: store.capacity(),
            total_value,
            algorithm: config.order.algorithm,
            field: config.order.field,
            order: ids(store.as_slice()),
        },
        combinations,
        searches,
        sorts,
        supplier_graph,
        catalog_graph,
        index,
    })
}

fn ids(items: &[Item]) -> Vec<ItemId> {
    items.iter().map(|item| item.id).collect()
}

fn combination_stage(config: &CatalogConfig, store: &GrowableStore) -> CombinationReport {
    let budget = config.combinations.budget;
    if store.len() > config.combinations.max_items {
        warn!(
            len = store.len(),
            max_items = config.combinations.max_items,
            "Combination search skipped: store too large"
        );
        return CombinationReport {
            budget,
            skipped: true,
            count: 0,
            top: Vec::new(),
        };
    }

    let mut found = store.combinations_within_budget(budget);
    let count = found.len();
    found.sort_by(|a, b| b.total_price.total_cmp(&a.total_price));
    let top = found
        .into_iter()
        .take(TOP_COMBINATIONS)
        .map(|combination| CombinationSummary {
            names: combination.names().into_iter().map(String::from).collect(),
            total_price: combination.total_price,
        })
        .collect();

    CombinationReport {
        budget,
        skipped: false,
        count,
        top,
    }
}

fn search_stage(live: &[Item]) -> SearchReport {
    let sorted_by = |field: SortField| {
        let mut items = live.to_vec();
        sort_items(&mut items, SortAlgorithm::Merge, field, 2);
        items
    };

    let by_id = sorted_by(SortField::Id);
    let by_price = sorted_by(SortField::Price);
    let by_rating = sorted_by(SortField::Rating);

    SearchReport {
        linear_by_name: find_by_name(live, SEARCH_NAME).map(|item| item.id),
        binary_by_id: binary_search_by_id(&by_id, SEARCH_ID).map(|item| item.id),
        interpolation_by_price: interpolation_search_by_price(&by_price, SEARCH_PRICE)
            .map(|item| item.id),
        exponential_by_rating: exponential_search_by_rating(&by_rating, SEARCH_RATING)
            .map(|item| item.id),
    }
}

fn sort_stage(config: &CatalogConfig, live: &[Item]) -> Vec<SortReport> {
    SortAlgorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let field = match algorithm {
                SortAlgorithm::KWay => config.order.k_way_field,
                _ => config.order.field,
            };
            let mut items = live.to_vec();
            sort_items(&mut items, algorithm, field, config.order.k_way_parts);
            SortReport {
                algorithm,
                field,
                ids: ids(&items),
            }
        })
        .collect()
}

fn graph_report(graph: &SimilarityGraph) -> GraphReport {
    let prim = graph.prim_mst();
    let kruskal = graph.kruskal_mst();
    GraphReport {
        suppliers: graph.supplier_count(),
        edges: graph.edges(),
        prim_weight: graph.total_weight(&prim),
        kruskal_weight: graph.total_weight(&kruskal),
        prim,
        kruskal,
    }
}

/// Index every item's name by id. A full probing table refuses further keys
/// without aborting the run.
fn index_stage(
    strategy: IndexStrategy,
    bucket_count: usize,
    items: &[&Item],
) -> Result<IndexReport> {
    let mut table = build_table::<String>(strategy, bucket_count)?;

    let mut rejected = Vec::new();
    for item in items {
        match table.insert(item.id, item.name.clone()) {
            Ok(()) => {}
            Err(CatalogError::TableFull { .. }) => rejected.push(item.id),
            Err(e) => return Err(e),
        }
    }
    if !rejected.is_empty() {
        warn!(count = rejected.len(), %strategy, "Index table rejected keys");
    }

    let found = table.search(UPDATE_ID).cloned();
    let stats = table.stats();
    info!(
        %strategy,
        collisions = stats.collisions,
        probes = stats.probes,
        "Index stage complete"
    );

    Ok(IndexReport {
        strategy,
        buckets: table.display(),
        rejected,
        search_key: UPDATE_ID,
        found,
        stats,
    })
}
