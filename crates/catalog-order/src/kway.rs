//! Multi-way merge sort.
//!
//! The input is cut into `k` contiguous runs, each run is sorted with the
//! same routine, then every run head competes in a min-heap until all runs
//! are drained.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

/// Head of one sorted run, ordered so that `BinaryHeap` pops the smallest key.
struct HeapEntry<K> {
    key: K,
    run: usize,
}

impl<K: PartialOrd> Ord for HeapEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap. Equal keys yield to the earlier run.
        other
            .key
            .partial_cmp(&self.key)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.run.cmp(&self.run))
    }
}

impl<K: PartialOrd> PartialOrd for HeapEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> PartialEq for HeapEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> Eq for HeapEntry<K> {}

/// Sort `items` ascending by `key`, splitting into `k` runs per level.
///
/// Each run has `n / k` items and the last one absorbs the remainder. `k` is
/// clamped to `2..=n` so every level makes progress. Stable: equal keys keep
/// their input order.
pub fn k_way_merge_sort<T, K, F>(items: Vec<T>, k: usize, key: F) -> Vec<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    sort_runs(items, k, &key)
}

fn sort_runs<T, K, F>(mut items: Vec<T>, k: usize, key: &F) -> Vec<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let n = items.len();
    if n < 2 {
        return items;
    }

    let k = k.clamp(2, n);
    let run_len = n / k;

    let mut runs = Vec::with_capacity(k);
    for _ in 1..k {
        let tail = items.split_off(run_len);
        runs.push(sort_runs(items, k, key));
        items = tail;
    }
    runs.push(sort_runs(items, k, key));

    trace!(n, k, run_len, "Merging sorted runs");
    merge_runs(runs, n, key)
}

fn merge_runs<T, K, F>(runs: Vec<Vec<T>>, n: usize, key: &F) -> Vec<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut sources: Vec<std::vec::IntoIter<T>> = runs.into_iter().map(Vec::into_iter).collect();
    let mut heads: Vec<Option<T>> = sources.iter_mut().map(Iterator::next).collect();

    let mut heap = BinaryHeap::with_capacity(heads.len());
    for (run, head) in heads.iter().enumerate() {
        if let Some(item) = head {
            heap.push(HeapEntry { key: key(item), run });
        }
    }

    let mut merged = Vec::with_capacity(n);
    while let Some(HeapEntry { run, .. }) = heap.pop() {
        let Some(item) = heads[run].take() else {
            continue;
        };
        merged.push(item);
        if let Some(next) = sources[run].next() {
            heap.push(HeapEntry { key: key(&next), run });
            heads[run] = Some(next);
        }
    }
    merged
}
