//! Comparison sorts driven by a key selector.
//!
//! Only [`merge_sort`] (and the k-way variant) is stable. Bubble and quick
//! sort may reorder items with equal keys.

use tracing::debug;

use catalog_core::types::{Item, SortAlgorithm, SortField};
use catalog_store::GrowableStore;

use crate::kway::k_way_merge_sort;

/// Adjacent-swap sort, in place. O(n²).
///
/// Stops early once a full pass makes no swap.
pub fn bubble_sort<T, K, F>(items: &mut [T], key: F)
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let n = items.len();
    for pass in 0..n {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            if key(&items[j]) > key(&items[j + 1]) {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Top-down merge sort. Stable: on equal keys the left half wins.
pub fn merge_sort<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    merge_sort_by(items, &key)
}

fn merge_sort_by<T, K, F>(mut items: Vec<T>, key: &F) -> Vec<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    if items.len() < 2 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, key);
    let right = merge_sort_by(right, key);
    merge(left, right, key)
}

fn merge<T, K, F>(left: Vec<T>, right: Vec<T>, key: &F) -> Vec<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let take_right = key(r) < key(l);
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

/// Quick sort with the Lomuto partition scheme, pivoting on the last
/// element. In place, not stable. O(n log n) on average, O(n²) worst case.
///
/// Recurses into the smaller partition and loops on the larger one, so
/// stack depth stays logarithmic even on already-sorted input.
pub fn quick_sort<T, K, F>(items: &mut [T], key: F)
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    quick_sort_by(items, &key);
}

fn quick_sort_by<T, K, F>(mut items: &mut [T], key: &F)
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    while items.len() > 1 {
        let current = std::mem::take(&mut items);
        let pivot = partition(current, key);
        let (left, rest) = current.split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quick_sort_by(left, key);
            items = right;
        } else {
            quick_sort_by(right, key);
            items = left;
        }
    }
}

/// Move every item keyed below the last element to the front, then place the
/// pivot right after them. Returns the pivot's final position.
fn partition<T, K, F>(items: &mut [T], key: &F) -> usize
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let high = items.len() - 1;
    let pivot = key(&items[high]);
    let mut boundary = 0;
    for j in 0..high {
        if key(&items[j]) < pivot {
            items.swap(boundary, j);
            boundary += 1;
        }
    }
    items.swap(boundary, high);
    boundary
}

/// Sort `items` ascending by `field` with the chosen algorithm.
///
/// Ids are compared as `u64`, every other field through [`SortField::key`].
/// `k_way_parts` is only used by [`SortAlgorithm::KWay`].
pub fn sort_items(
    items: &mut Vec<Item>,
    algorithm: SortAlgorithm,
    field: SortField,
    k_way_parts: usize,
) {
    match field {
        SortField::Id => sort_by_key(items, algorithm, k_way_parts, |item: &Item| item.id),
        _ => sort_by_key(items, algorithm, k_way_parts, |item: &Item| field.key(item)),
    }
    debug!(%algorithm, %field, len = items.len(), "Items sorted");
}

fn sort_by_key<K, F>(items: &mut Vec<Item>, algorithm: SortAlgorithm, k_way_parts: usize, key: F)
where
    K: PartialOrd,
    F: Fn(&Item) -> K,
{
    match algorithm {
        SortAlgorithm::Bubble => bubble_sort(items, key),
        SortAlgorithm::Quick => quick_sort(items, key),
        SortAlgorithm::Merge => {
            let owned = std::mem::take(items);
            *items = merge_sort(owned, key);
        }
        SortAlgorithm::KWay => {
            let owned = std::mem::take(items);
            *items = k_way_merge_sort(owned, k_way_parts, key);
        }
    }
}

/// Sort a store's contents in place, keeping its capacity.
pub fn sort_store(
    store: &mut GrowableStore,
    algorithm: SortAlgorithm,
    field: SortField,
    k_way_parts: usize,
) {
    let mut items = store.take_items();
    sort_items(&mut items, algorithm, field, k_way_parts);
    store.replace_all(items);
}
