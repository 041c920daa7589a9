//! Supplier similarity graph built from shared category sets.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};

use catalog_core::types::{Item, SupplierId};

/// An undirected edge and its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightedEdge {
    pub u: SupplierId,
    pub v: SupplierId,
    pub weight: usize,
}

/// Undirected weighted graph over supplier ids.
///
/// Ordered maps keep every traversal deterministic: suppliers are visited in
/// ascending id order, which fixes the Prim start node and the Kruskal edge
/// discovery order.
#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    pub(crate) categories: BTreeMap<SupplierId, BTreeSet<String>>,
    pub(crate) adjacency: BTreeMap<SupplierId, BTreeMap<SupplierId, usize>>,
}

impl SimilarityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the category pairs of `items`. Edges are not built until
    /// [`create_graph`](Self::create_graph) runs.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut graph = Self::new();
        for item in items {
            graph.add_category(item.supplier_id, item.category.clone());
        }
        graph
    }

    /// Record that `supplier_id` stocks `category`. Idempotent.
    pub fn add_category(&mut self, supplier_id: SupplierId, category: impl Into<String>) {
        self.categories
            .entry(supplier_id)
            .or_default()
            .insert(category.into());
    }

    /// Categories known for `supplier_id`.
    pub fn categories(&self, supplier_id: SupplierId) -> Option<&BTreeSet<String>> {
        self.categories.get(&supplier_id)
    }

    /// Number of categories two suppliers have in common.
    pub fn shared_categories(&self, a: SupplierId, b: SupplierId) -> usize {
        match (self.categories.get(&a), self.categories.get(&b)) {
            (Some(left), Some(right)) => left.intersection(right).count(),
            _ => 0,
        }
    }

    /// Rebuild every edge from the current category sets.
    ///
    /// Prior edges are discarded. Each unordered pair of distinct suppliers
    /// is compared once; pairs with no shared category get no edge.
    pub fn create_graph(&mut self) {
        self.adjacency.clear();

        let suppliers: Vec<SupplierId> = self.categories.keys().copied().collect();
        for (i, &a) in suppliers.iter().enumerate() {
            for &b in &suppliers[i + 1..] {
                let weight = self.shared_categories(a, b);
                if weight > 0 {
                    self.add_edge(a, b, weight);
                }
            }
        }

        info!(
            suppliers = suppliers.len(),
            edges = self.edge_count(),
            "Similarity graph built"
        );
    }

    fn add_edge(&mut self, a: SupplierId, b: SupplierId, weight: usize) {
        debug!(a, b, weight, "Edge added");
        self.adjacency.entry(a).or_default().insert(b, weight);
        self.adjacency.entry(b).or_default().insert(a, weight);
    }

    /// Weight of the edge between `a` and `b`, if one exists.
    pub fn weight(&self, a: SupplierId, b: SupplierId) -> Option<usize> {
        self.adjacency.get(&a)?.get(&b).copied()
    }

    /// Neighbors of `supplier_id` with edge weights, in ascending id order.
    pub fn neighbors(
        &self,
        supplier_id: SupplierId,
    ) -> impl Iterator<Item = (SupplierId, usize)> + '_ {
        self.adjacency
            .get(&supplier_id)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(v, w)| (*v, *w)))
    }

    /// Every edge once, as `u < v`, in discovery order.
    pub fn edges(&self) -> Vec<WeightedEdge> {
        self.adjacency
            .iter()
            .flat_map(|(&u, edges)| {
                edges
                    .iter()
                    .filter(move |(v, _)| u < **v)
                    .map(move |(&v, &weight)| WeightedEdge { u, v, weight })
            })
            .collect()
    }

    /// Suppliers with at least one registered category.
    pub fn supplier_count(&self) -> usize {
        self.categories.len()
    }

    /// Suppliers that have at least one edge.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Sum of the weights of `edges`. Pairs with no edge contribute nothing.
    pub fn total_weight(&self, edges: &[(SupplierId, SupplierId)]) -> usize {
        edges
            .iter()
            .filter_map(|&(u, v)| self.weight(u, v))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> SimilarityGraph {
        let mut graph = SimilarityGraph::new();
        graph.add_category(1, "Electronics");
        graph.add_category(1, "Home Appliances");
        graph.add_category(2, "Electronics");
        graph.add_category(2, "Apparel");
        graph.add_category(3, "Apparel");
        graph.add_category(4, "Home Appliances");
        graph.create_graph();
        graph
    }

    #[test]
    fn test_edges_from_shared_categories() {
        let graph = sample_graph();
        assert_eq!(graph.weight(1, 2), Some(1));
        assert_eq!(graph.weight(1, 4), Some(1));
        assert_eq!(graph.weight(2, 3), Some(1));
        assert_eq!(graph.weight(1, 3), None);
        assert_eq!(graph.weight(3, 4), None);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_weights_are_symmetric() {
        let mut graph = SimilarityGraph::new();
        for c in ["a", "b", "c"] {
            graph.add_category(10, c);
        }
        for c in ["b", "c", "d"] {
            graph.add_category(20, c);
        }
        graph.create_graph();
        assert_eq!(graph.weight(10, 20), Some(2));
        assert_eq!(graph.weight(20, 10), Some(2));
    }

    #[test]
    fn test_add_category_idempotent() {
        let mut graph = SimilarityGraph::new();
        graph.add_category(1, "Apparel");
        graph.add_category(1, "Apparel");
        assert_eq!(graph.categories(1).unwrap().len(), 1);
    }

    #[test]
    fn test_create_graph_rebuilds() {
        let mut graph = sample_graph();
        graph.add_category(3, "Electronics");
        graph.create_graph();
        assert_eq!(graph.weight(1, 3), Some(1));
        assert_eq!(graph.weight(2, 3), Some(2));
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_isolated_supplier_has_no_node() {
        let mut graph = sample_graph();
        graph.add_category(9, "Garden");
        graph.create_graph();
        assert_eq!(graph.supplier_count(), 5);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.neighbors(9).count(), 0);
    }

    #[test]
    fn test_edges_listed_once_in_order() {
        let graph = sample_graph();
        let edges: Vec<(SupplierId, SupplierId)> =
            graph.edges().iter().map(|e| (e.u, e.v)).collect();
        assert_eq!(edges, vec![(1, 2), (1, 4), (2, 3)]);
    }

    #[test]
    fn test_from_items() {
        let items = vec![
            Item {
                supplier_id: 201,
                ..Item::new(1, "TV", "Electronics", 10.0)
            },
            Item {
                supplier_id: 202,
                ..Item::new(2, "Phone", "Electronics", 10.0)
            },
            Item {
                supplier_id: 202,
                ..Item::new(3, "Jacket", "Apparel", 10.0)
            },
        ];
        let mut graph = SimilarityGraph::from_items(&items);
        graph.create_graph();
        assert_eq!(graph.categories(202).unwrap().len(), 2);
        assert_eq!(graph.weight(201, 202), Some(1));
    }

    #[test]
    fn test_total_weight() {
        let graph = sample_graph();
        assert_eq!(graph.total_weight(&[(1, 2), (2, 3)]), 2);
        assert_eq!(graph.total_weight(&[(3, 4)]), 0);
    }
}
