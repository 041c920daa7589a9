//! Catalog Index crate - fixed-size hash tables keyed by non-negative integers.
//!
//! Two collision strategies share the [`IndexTable`] contract:
//! - [`ChainedTable`]: separate chaining, duplicate keys coexist
//! - [`ProbingTable`]: open addressing with linear probing, duplicates overwrite
//!
//! Both hash with `key % bucket_count` and keep cumulative collision and
//! probe counters for diagnostics.

pub mod chaining;
pub mod probing;
pub mod table;

pub use chaining::ChainedTable;
pub use probing::ProbingTable;
pub use table::{build_table, Bucket, IndexTable, TableStats};
