//! Catalog Graph crate - supplier similarity graph and spanning trees.
//!
//! Suppliers are linked when they stock at least one common category; the
//! edge weight is the number of shared categories. Two independent minimum
//! spanning tree algorithms run over the result:
//! - Prim, growing a single tree from the lowest supplier id
//! - Kruskal, over a union-find, yielding a forest on disconnected graphs

pub mod mst;
pub mod similarity;
pub mod union_find;

pub use similarity::{SimilarityGraph, WeightedEdge};
pub use union_find::DisjointSet;
