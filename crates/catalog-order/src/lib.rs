//! Catalog Order crate - sorting and searching over item sequences.
//!
//! Every algorithm takes a caller-supplied key selector, so the same code
//! orders by price, rating, sales volume or id. Searches other than the
//! linear scan require input already sorted ascending by their key; they
//! never sort implicitly, and unsorted input gives unspecified results.

pub mod kway;
pub mod search;
pub mod sort;

pub use kway::k_way_merge_sort;
pub use search::{
    binary_search_by, binary_search_by_id, exponential_search_by, exponential_search_by_rating,
    find_by_name, interpolation_search_by, interpolation_search_by_price, linear_search,
};
pub use sort::{bubble_sort, merge_sort, quick_sort, sort_items, sort_store};
