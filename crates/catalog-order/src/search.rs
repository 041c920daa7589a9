//! Linear, binary, interpolation and exponential search.
//!
//! Except for [`linear_search`] and [`find_by_name`], each search expects
//! input sorted ascending by the key it probes. Nothing here sorts.

use std::cmp::Ordering;

use tracing::trace;

use catalog_core::types::{Item, ItemId};

/// First item matching `predicate`, in sequence order.
pub fn linear_search<T, P>(items: &[T], predicate: P) -> Option<&T>
where
    P: Fn(&T) -> bool,
{
    items.iter().find(|item| predicate(item))
}

/// First item whose name equals `name`, ignoring case.
pub fn find_by_name<'a>(items: &'a [Item], name: &str) -> Option<&'a Item> {
    let needle = name.to_lowercase();
    linear_search(items, |item| item.name.to_lowercase() == needle)
}

/// Index of an item keyed `target` in `items`, sorted ascending by `key`.
///
/// With duplicate keys any matching index may be returned. An incomparable
/// key (NaN) ends the search as not found.
pub fn binary_search_by<T, K, F>(items: &[T], target: &K, key: F) -> Option<usize>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let (mut low, mut high) = (0, items.len());
    while low < high {
        let mid = low + (high - low) / 2;
        match key(&items[mid]).partial_cmp(target)? {
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
            Ordering::Equal => return Some(mid),
        }
    }
    None
}

/// Item with `id` in a slice sorted by id.
pub fn binary_search_by_id(items: &[Item], id: ItemId) -> Option<&Item> {
    binary_search_by(items, &id, |item| item.id).map(|index| &items[index])
}

/// Index of an item keyed `target`, probing where the target would sit if
/// keys were evenly spread between the bracket ends.
///
/// When both bracket ends share a key the bracket is scanned instead, so
/// runs of equal keys never divide by zero.
pub fn interpolation_search_by<T, F>(items: &[T], target: f64, key: F) -> Option<usize>
where
    F: Fn(&T) -> f64,
{
    if items.is_empty() {
        return None;
    }

    let (mut low, mut high) = (0, items.len() - 1);
    while low <= high {
        let low_key = key(&items[low]);
        let high_key = key(&items[high]);
        if !(low_key..=high_key).contains(&target) {
            return None;
        }

        if high_key == low_key {
            return items[low..=high]
                .iter()
                .position(|item| key(item) == target)
                .map(|offset| low + offset);
        }

        let fraction = (target - low_key) / (high_key - low_key);
        let pos = (low + (fraction * (high - low) as f64) as usize).min(high);
        trace!(low, high, pos, "Interpolation probe");

        let probe = key(&items[pos]);
        if probe == target {
            return Some(pos);
        }
        if probe < target {
            low = pos + 1;
        } else if pos == 0 {
            return None;
        } else {
            high = pos - 1;
        }
    }
    None
}

/// Item priced exactly `price` in a slice sorted by price.
pub fn interpolation_search_by_price(items: &[Item], price: f64) -> Option<&Item> {
    interpolation_search_by(items, price, |item| item.price).map(|index| &items[index])
}

/// Index of an item keyed `target`: double a bound while its key stays at or
/// below the target, then binary-search `[bound / 2, min(bound, n))`.
pub fn exponential_search_by<T, F>(items: &[T], target: f64, key: F) -> Option<usize>
where
    F: Fn(&T) -> f64,
{
    let n = items.len();
    if n == 0 {
        return None;
    }
    if key(&items[0]) == target {
        return Some(0);
    }

    let mut bound = 1;
    while bound < n && key(&items[bound]) <= target {
        bound *= 2;
    }

    let low = bound / 2;
    let high = bound.min(n);
    trace!(low, high, "Exponential bracket");
    binary_search_by(&items[low..high], &target, &key).map(|offset| low + offset)
}

/// Item rated exactly `rating` in a slice sorted by rating.
pub fn exponential_search_by_rating(items: &[Item], rating: f64) -> Option<&Item> {
    exponential_search_by(items, rating, |item| item.rating).map(|index| &items[index])
}
