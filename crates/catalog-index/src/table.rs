use serde::Serialize;

use catalog_core::error::{CatalogError, Result};
use catalog_core::types::IndexStrategy;

use crate::chaining::ChainedTable;
use crate::probing::ProbingTable;

/// Contents of one non-empty bucket, as returned by [`IndexTable::display`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket<V> {
    /// Bucket position in `0..bucket_count`.
    pub index: usize,
    /// Pairs stored in the bucket, in chain order.
    pub entries: Vec<(u64, V)>,
}

/// Snapshot of a table's diagnostic counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableStats {
    pub bucket_count: usize,
    pub len: usize,
    pub collisions: u64,
    pub probes: u64,
    pub load_factor: f64,
}

/// Fixed-bucket-count associative index from `u64` keys to values.
///
/// The bucket count never changes after construction. Counters only grow,
/// and `search` takes `&mut self` because it updates the probe counter.
pub trait IndexTable<V: Clone> {
    /// Insert a pair. Duplicate-key behavior is strategy specific.
    fn insert(&mut self, key: u64, value: V) -> Result<()>;

    /// Look up `key`, returning `None` if it was never inserted.
    fn search(&mut self, key: u64) -> Option<&V>;

    /// Non-empty buckets in ascending bucket order.
    fn display(&self) -> Vec<Bucket<V>>;

    fn bucket_count(&self) -> usize;

    /// Number of stored pairs.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts that landed on an occupied bucket or slot.
    fn collisions(&self) -> u64;

    /// Buckets, nodes or slots examined across all inserts and searches.
    fn probes(&self) -> u64;

    fn stats(&self) -> TableStats {
        TableStats {
            bucket_count: self.bucket_count(),
            len: self.len(),
            collisions: self.collisions(),
            probes: self.probes(),
            load_factor: self.len() as f64 / self.bucket_count() as f64,
        }
    }
}

/// Home bucket of `key`.
pub(crate) fn home_bucket(key: u64, bucket_count: usize) -> usize {
    (key % bucket_count as u64) as usize
}

pub(crate) fn check_bucket_count(bucket_count: usize) -> Result<()> {
    if bucket_count == 0 {
        return Err(CatalogError::Config(
            "index table needs at least one bucket".to_string(),
        ));
    }
    Ok(())
}

/// Build an empty table for the configured strategy.
pub fn build_table<V: Clone + 'static>(
    strategy: IndexStrategy,
    bucket_count: usize,
) -> Result<Box<dyn IndexTable<V>>> {
    Ok(match strategy {
        IndexStrategy::Chaining => Box::new(ChainedTable::new(bucket_count)?),
        IndexStrategy::Probing => Box::new(ProbingTable::new(bucket_count)?),
    })
}
