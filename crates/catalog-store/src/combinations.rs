//! Exhaustive budget-combination search over a store.
//!
//! Backtracking visits subsets in index order and never revisits an earlier
//! index, so each combination is produced once. The search is exponential in
//! the number of items; callers bound the store size before invoking it.

use serde::Serialize;
use tracing::debug;

use catalog_core::types::Item;

use crate::store::GrowableStore;

/// A subset of store items whose prices sum to at most the budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combination {
    pub items: Vec<Item>,
    pub total_price: f64,
}

impl Combination {
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}

impl GrowableStore {
    /// Call `visit` with every combination whose total price is within
    /// `budget`, in discovery order. The empty combination comes first
    /// whenever `budget` is non-negative.
    pub fn for_each_combination_within_budget<F>(&self, budget: f64, mut visit: F)
    where
        F: FnMut(&[&Item], f64),
    {
        let mut current = Vec::new();
        backtrack(self.as_slice(), 0, budget, &mut current, 0.0, &mut visit);
    }

    /// Collect every combination whose total price is within `budget`.
    pub fn combinations_within_budget(&self, budget: f64) -> Vec<Combination> {
        let mut found = Vec::new();
        self.for_each_combination_within_budget(budget, |items, total_price| {
            found.push(Combination {
                items: items.iter().map(|item| (*item).clone()).collect(),
                total_price,
            });
        });
        debug!(budget, count = found.len(), "Budget combinations enumerated");
        found
    }
}

fn backtrack<'a, F>(
    items: &'a [Item],
    start: usize,
    budget: f64,
    current: &mut Vec<&'a Item>,
    price: f64,
    visit: &mut F,
) where
    F: FnMut(&[&Item], f64),
{
    if price <= budget {
        visit(current.as_slice(), price);
    }
    for (offset, item) in items[start..].iter().enumerate() {
        let next_price = price + item.price;
        if next_price <= budget {
            current.push(item);
            backtrack(items, start + offset + 1, budget, current, next_price, visit);
            current.pop();
        }
    }
}
