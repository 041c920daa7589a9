//! Separate-chaining hash table.
//!
//! Each bucket owns a `Vec` of pairs in insertion order. Inserts always
//! append, so duplicate keys coexist and a search returns the earliest one.

use tracing::debug;

use catalog_core::error::Result;

use crate::table::{check_bucket_count, home_bucket, Bucket, IndexTable};

#[derive(Debug, Clone)]
pub struct ChainedTable<V> {
    buckets: Vec<Vec<(u64, V)>>,
    len: usize,
    collisions: u64,
    probes: u64,
}

impl<V> ChainedTable<V> {
    /// Create a table with `bucket_count` empty chains.
    pub fn new(bucket_count: usize) -> Result<Self> {
        check_bucket_count(bucket_count)?;
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);
        Ok(Self {
            buckets,
            len: 0,
            collisions: 0,
            probes: 0,
        })
    }

    /// Length of the chain in bucket `index`, or `None` if out of range.
    pub fn chain_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(Vec::len)
    }

    /// Walk the home chain of `key`. Counts the bucket touch plus one probe
    /// for every node passed before the match (or the end of the chain).
    fn locate(&mut self, key: u64) -> Option<(usize, usize)> {
        let bucket = home_bucket(key, self.buckets.len());
        self.probes += 1;

        for (position, (stored, _)) in self.buckets[bucket].iter().enumerate() {
            if *stored == key {
                return Some((bucket, position));
            }
            self.probes += 1;
        }
        None
    }
}

impl<V: Clone> IndexTable<V> for ChainedTable<V> {
    fn insert(&mut self, key: u64, value: V) -> Result<()> {
        let bucket = home_bucket(key, self.buckets.len());
        self.probes += 1;

        let chain = &mut self.buckets[bucket];
        if !chain.is_empty() {
            self.collisions += 1;
            debug!(key, bucket, chain_len = chain.len(), "Chain collision");
        }
        chain.push((key, value));
        self.len += 1;
        Ok(())
    }

    fn search(&mut self, key: u64) -> Option<&V> {
        let (bucket, position) = self.locate(key)?;
        Some(&self.buckets[bucket][position].1)
    }

    fn display(&self) -> Vec<Bucket<V>> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, chain)| !chain.is_empty())
            .map(|(index, chain)| Bucket {
                index,
                entries: chain.clone(),
            })
            .collect()
    }

    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn collisions(&self) -> u64 {
        self.collisions
    }

    fn probes(&self) -> u64 {
        self.probes
    }
}
