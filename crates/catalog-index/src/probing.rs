//! Open-addressing hash table with linear probing.
//!
//! A full table has no empty slot to terminate a probe sequence. Instead of
//! looping, inserts of a new key into a full table fail with
//! [`CatalogError::TableFull`] after one complete sweep, and searches give up
//! after one sweep. The table never resizes: callers size it with headroom
//! above the expected key count.

use tracing::{debug, warn};

use catalog_core::error::{CatalogError, Result};

use crate::table::{check_bucket_count, home_bucket, Bucket, IndexTable};

#[derive(Debug, Clone)]
pub struct ProbingTable<V> {
    slots: Vec<Option<(u64, V)>>,
    len: usize,
    collisions: u64,
    probes: u64,
}

impl<V> ProbingTable<V> {
    pub fn new(bucket_count: usize) -> Result<Self> {
        check_bucket_count(bucket_count)?;
        let mut slots = Vec::with_capacity(bucket_count);
        slots.resize_with(bucket_count, || None);
        Ok(Self {
            slots,
            len: 0,
            collisions: 0,
            probes: 0,
        })
    }

    /// Key stored in slot `index`, if occupied.
    pub fn slot_key(&self, index: usize) -> Option<u64> {
        self.slots.get(index)?.as_ref().map(|(key, _)| *key)
    }

    fn locate(&mut self, key: u64) -> Option<usize> {
        let bucket_count = self.slots.len();
        let mut index = home_bucket(key, bucket_count);
        self.probes += 1;

        for _ in 0..bucket_count {
            match &self.slots[index] {
                None => return None,
                Some((stored, _)) if *stored == key => return Some(index),
                Some(_) => {
                    self.probes += 1;
                    index = (index + 1) % bucket_count;
                }
            }
        }
        None
    }
}

impl<V: Clone> IndexTable<V> for ProbingTable<V> {
    /// Insert or overwrite. An existing pair with the same key has its value
    /// replaced in place.
    fn insert(&mut self, key: u64, value: V) -> Result<()> {
        let bucket_count = self.slots.len();
        let mut index = home_bucket(key, bucket_count);
        self.probes += 1;

        for _ in 0..bucket_count {
            match &mut self.slots[index] {
                Some((stored, existing)) if *stored == key => {
                    self.probes += 1;
                    *existing = value;
                    debug!(key, slot = index, "Value overwritten");
                    return Ok(());
                }
                Some(_) => {
                    self.probes += 1;
                    self.collisions += 1;
                    index = (index + 1) % bucket_count;
                }
                None => {
                    self.slots[index] = Some((key, value));
                    self.len += 1;
                    return Ok(());
                }
            }
        }

        warn!(key, bucket_count, "Probe sweep found no free slot");
        Err(CatalogError::TableFull { bucket_count })
    }

    fn search(&mut self, key: u64) -> Option<&V> {
        let index = self.locate(key)?;
        self.slots[index].as_ref().map(|(_, value)| value)
    }

    fn display(&self) -> Vec<Bucket<V>> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.as_ref().map(|(key, value)| Bucket {
                    index,
                    entries: vec![(*key, value.clone())],
                })
            })
            .collect()
    }

    fn bucket_count(&self) -> usize {
        self.slots.len()
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
