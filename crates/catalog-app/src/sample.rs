//! Built-in sample data and catalog file loading.

use std::path::Path;

use tracing::info;

use catalog_core::error::Result;
use catalog_core::types::{Item, SupplierId};
use catalog_graph::SimilarityGraph;

const SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.json");
const INDEX_EXTRAS: &str = include_str!("../data/index_extras.json");

/// Category seeds for the supplier similarity demo.
pub const SUPPLIER_CATEGORIES: &[(SupplierId, &str)] = &[
    (1, "Electronics"),
    (1, "Home Appliances"),
    (2, "Electronics"),
    (2, "Apparel"),
    (3, "Apparel"),
    (4, "Home Appliances"),
];

/// The ten-product sample catalog.
pub fn sample_items() -> Result<Vec<Item>> {
    Ok(serde_json::from_str(SAMPLE_CATALOG)?)
}

/// Two products whose ids land in already-used buckets of a ten-bucket table.
/// The driver indexes them next to the sample catalog so both collision
/// strategies have work to do.
pub fn index_extras() -> Result<Vec<Item>> {
    Ok(serde_json::from_str(INDEX_EXTRAS)?)
}

/// Read a JSON array of items from `path`.
pub fn load_catalog(path: &Path) -> Result<Vec<Item>> {
    let content = std::fs::read_to_string(path)?;
    let items: Vec<Item> = serde_json::from_str(&content)?;
    info!(path = %path.display(), count = items.len(), "Catalog loaded");
    Ok(items)
}

/// Graph over [`SUPPLIER_CATEGORIES`], edges already built.
pub fn supplier_graph() -> SimilarityGraph {
    let mut graph = SimilarityGraph::new();
    for &(supplier, category) in SUPPLIER_CATEGORIES {
        graph.add_category(supplier, category);
    }
    graph.create_graph();
    graph
}
