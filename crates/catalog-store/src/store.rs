//! Contiguous item storage with amortized doubling growth.
//!
//! The store tracks its own logical capacity rather than relying on `Vec`'s
//! growth policy, so growth is observable and deterministic: capacity starts
//! at the configured value and only ever doubles. The initial capacity is
//! bookkeeping only; memory is reserved as items arrive.

use tracing::{debug, info, warn};

use catalog_core::config::StoreConfig;
use catalog_core::types::{Item, ItemId, ItemUpdate};

/// Default logical capacity of a new store.
pub const DEFAULT_CAPACITY: usize = 5;

/// Dynamic array of items.
///
/// Invariants: `len() <= capacity()`, capacity never shrinks, and every
/// position below `len()` holds a live item.
#[derive(Debug, Clone)]
pub struct GrowableStore {
    items: Vec<Item>,
    capacity: usize,
}

impl GrowableStore {
    /// Create an empty store with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty store with `capacity` slots. A zero capacity is raised
    /// to one so that doubling can make progress.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Create an empty store sized from configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// Append an item, doubling capacity first when the store is full.
    pub fn add(&mut self, item: Item) {
        if self.items.len() >= self.capacity {
            self.grow();
        }
        debug!(id = item.id, name = %item.name, "Item added");
        self.items.push(item);
    }

    fn grow(&mut self) {
        self.capacity = self.capacity.saturating_mul(2);
        self.items
            .reserve_exact(self.capacity.saturating_sub(self.items.len()));
        info!(capacity = self.capacity, "Store reallocated");
    }

    /// Remove the first item with `id`, shifting every later item one slot
    /// left. Returns the removed item, or `None` if no item has that id.
    pub fn delete(&mut self, id: ItemId) -> Option<Item> {
        match self.position(id) {
            Some(index) => {
                let removed = self.items.remove(index);
                debug!(id, "Item deleted");
                Some(removed)
            }
            None => {
                warn!(id, "Delete skipped: item not found");
                None
            }
        }
    }

    /// Apply `update` to the item with `id`.
    ///
    /// Returns the names of the fields written, or `None` if no item has
    /// that id.
    pub fn update(&mut self, id: ItemId, update: &ItemUpdate) -> Option<Vec<&'static str>> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            warn!(id, "Update skipped: item not found");
            return None;
        };
        let applied = update.apply(item);
        for field in &applied {
            debug!(id, field = *field, "Item field updated");
        }
        Some(applied)
    }

    /// Sum of `sales_volume * price` over every live item. Zero when empty.
    pub fn total_value(&self) -> f64 {
        self.items
            .iter()
            .fold(0.0, |total, item| total + item.revenue())
    }

    /// Look up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// First item whose name equals `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        let needle = name.to_lowercase();
        self.items
            .iter()
            .find(|item| item.name.to_lowercase() == needle)
    }

    /// Position of the first item with `id`.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Live items in store order.
    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Live items, mutably, for in-place reordering by the sort kit.
    pub fn as_mut_slice(&mut self) -> &mut [Item] {
        &mut self.items
    }

    /// Move every item out, leaving the store empty with its capacity intact.
    pub fn take_items(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }

    /// Replace the contents with `items` in the given order, growing as needed.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        while self.capacity < items.len() {
            self.grow();
        }
        self.items = items;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for GrowableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Item> for GrowableStore {
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a> IntoIterator for &'a GrowableStore {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
