//! Catalog Store crate - growable item storage with doubling capacity.
//!
//! Provides the [`GrowableStore`] container: append with amortized doubling,
//! delete with eager compaction, typed field updates, linear scans, revenue
//! aggregation and exhaustive budget-combination search.

pub mod combinations;
pub mod store;

pub use combinations::Combination;
pub use store::GrowableStore;
