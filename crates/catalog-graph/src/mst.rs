//! Minimum spanning trees over a [`SimilarityGraph`].
//!
//! Both algorithms only consider suppliers that have at least one edge.
//! Prim requires a connected graph: on a disconnected graph it stops once
//! the start component is exhausted, so its result does not span every
//! supplier. Kruskal yields a spanning forest instead.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use catalog_core::types::SupplierId;

use crate::similarity::{SimilarityGraph, WeightedEdge};
use crate::union_find::DisjointSet;

impl SimilarityGraph {
    /// Prim's algorithm from the lowest supplier id that has an edge.
    ///
    /// Each round scans visited suppliers in visit order and their neighbors
    /// in ascending id order, taking the first crossing edge of minimum
    /// weight.
    pub fn prim_mst(&self) -> Vec<(SupplierId, SupplierId)> {
        let Some(&start) = self.adjacency.keys().next() else {
            return Vec::new();
        };

        let mut order = vec![start];
        let mut visited = BTreeSet::from([start]);
        let mut tree = Vec::with_capacity(self.adjacency.len().saturating_sub(1));

        while visited.len() < self.adjacency.len() {
            let mut best: Option<WeightedEdge> = None;
            for &u in &order {
                for (v, weight) in self.neighbors(u) {
                    if visited.contains(&v) {
                        continue;
                    }
                    if best.map_or(true, |b| weight < b.weight) {
                        best = Some(WeightedEdge { u, v, weight });
                    }
                }
            }

            let Some(edge) = best else {
                warn!(
                    visited = visited.len(),
                    nodes = self.adjacency.len(),
                    "Prim stopped: graph is disconnected"
                );
                break;
            };

            debug!(u = edge.u, v = edge.v, weight = edge.weight, "Prim edge");
            tree.push((edge.u, edge.v));
            visited.insert(edge.v);
            order.push(edge.v);
        }

        tree
    }

    /// Kruskal's algorithm over a union-find.
    ///
    /// Edges are stably sorted by weight, so equal weights keep discovery
    /// order. On a disconnected graph the result is a minimum spanning forest.
    pub fn kruskal_mst(&self) -> Vec<(SupplierId, SupplierId)> {
        let mut edges = self.edges();
        edges.sort_by_key(|edge| edge.weight);

        // Adjacency keys are sorted, so a node's dense index is its rank.
        let nodes: Vec<SupplierId> = self.adjacency.keys().copied().collect();
        let index_of = |id: SupplierId| nodes.binary_search(&id).ok();

        let mut components = DisjointSet::new(nodes.len());
        let mut forest = Vec::with_capacity(nodes.len().saturating_sub(1));

        for edge in edges {
            let (Some(a), Some(b)) = (index_of(edge.u), index_of(edge.v)) else {
                continue;
            };
            if components.union(a, b) {
                debug!(u = edge.u, v = edge.v, weight = edge.weight, "Kruskal edge");
                forest.push((edge.u, edge.v));
            }
        }

        forest
    }
}
