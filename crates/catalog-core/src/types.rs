use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CatalogError, Result};

// =============================================================================
// Identity
// =============================================================================

/// Unique identifier of an item within a store.
pub type ItemId = u64;

/// Identifier of the supplier an item is sourced from.
pub type SupplierId = u64;

// =============================================================================
// Enums
// =============================================================================

/// Item attribute used as the ordering key by sorts and searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    #[default]
    Price,
    Rating,
    SalesVolume,
    Stock,
    Discount,
}

impl SortField {
    /// Numeric key of `item` for this field.
    ///
    /// Integer attributes are widened to `f64` so every field shares one key
    /// type. Ids above 2^53 lose precision here; order by `item.id` directly
    /// when exact id order matters.
    pub fn key(&self, item: &Item) -> f64 {
        match self {
            SortField::Id => item.id as f64,
            SortField::Price => item.price,
            SortField::Rating => item.rating,
            SortField::SalesVolume => f64::from(item.sales_volume),
            SortField::Stock => f64::from(item.stock),
            SortField::Discount => item.discount,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Price => "price",
            SortField::Rating => "rating",
            SortField::SalesVolume => "sales_volume",
            SortField::Stock => "stock",
            SortField::Discount => "discount",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "id" => Ok(SortField::Id),
            "price" => Ok(SortField::Price),
            "rating" => Ok(SortField::Rating),
            "sales_volume" => Ok(SortField::SalesVolume),
            "stock" => Ok(SortField::Stock),
            "discount" => Ok(SortField::Discount),
            other => Err(CatalogError::Config(format!("unknown sort field: {other}"))),
        }
    }
}

/// Sorting algorithm selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    Bubble,
    #[default]
    Merge,
    Quick,
    KWay,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 4] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::KWay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::KWay => "k_way",
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortAlgorithm {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "bubble" => Ok(SortAlgorithm::Bubble),
            "merge" => Ok(SortAlgorithm::Merge),
            "quick" => Ok(SortAlgorithm::Quick),
            "k_way" | "kway" => Ok(SortAlgorithm::KWay),
            other => Err(CatalogError::Config(format!(
                "unknown sort algorithm: {other}"
            ))),
        }
    }
}

/// Collision strategy of an index table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStrategy {
    /// Separate chaining: each bucket holds every pair hashed to it.
    #[default]
    Chaining,
    /// Open addressing with linear probing.
    Probing,
}

impl IndexStrategy {
    /// The strategy this one is compared against.
    pub fn other(self) -> Self {
        match self {
            IndexStrategy::Chaining => IndexStrategy::Probing,
            IndexStrategy::Probing => IndexStrategy::Chaining,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexStrategy::Chaining => "chaining",
            IndexStrategy::Probing => "probing",
        }
    }
}

impl fmt::Display for IndexStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexStrategy {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "chaining" => Ok(IndexStrategy::Chaining),
            "probing" | "open_addressing" | "linear" => Ok(IndexStrategy::Probing),
            other => Err(CatalogError::Config(format!(
                "unknown index strategy: {other}"
            ))),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// A catalog record.
///
/// `discount` is a percentage in `0.0..=100.0` and `rating` lies in
/// `0.0..=5.0`; every other numeric attribute is non-negative.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub discount: f64,
    pub rating: f64,
    pub reviews: u32,
    pub sales_volume: u32,
    pub return_rate: f64,
    pub supplier_id: SupplierId,
    /// Shipping time in days.
    pub shipping_time: u32,
    pub is_premium_supplier: bool,
    pub customer_segment: String,
    pub purchase_frequency: u32,
    pub profit_margin: f64,
    pub last_restocked: NaiveDate,
}

impl Item {
    /// Create an item with the identifying fields set and every other
    /// attribute at its default.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            ..Default::default()
        }
    }

    /// Revenue contributed by this item: `sales_volume * price`.
    pub fn revenue(&self) -> f64 {
        f64::from(self.sales_volume) * self.price
    }
}

/// Typed partial update of an [`Item`].
///
/// Every mutable attribute is an `Option`; only present fields are applied.
/// The identifier is deliberately absent: an item keeps its id for life.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub discount: Option<f64>,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    pub sales_volume: Option<u32>,
    pub return_rate: Option<f64>,
    pub supplier_id: Option<SupplierId>,
    pub shipping_time: Option<u32>,
    pub is_premium_supplier: Option<bool>,
    pub customer_segment: Option<String>,
    pub purchase_frequency: Option<u32>,
    pub profit_margin: Option<f64>,
    pub last_restocked: Option<NaiveDate>,
}

impl ItemUpdate {
    /// Return true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == ItemUpdate::default()
    }

    /// Apply every present field to `item`, returning the names of the
    /// fields that were written.
    pub fn apply(&self, item: &mut Item) -> Vec<&'static str> {
        let mut applied = Vec::new();

        fn set<T: Clone>(
            slot: &mut T,
            value: &Option<T>,
            name: &'static str,
            applied: &mut Vec<&'static str>,
        ) {
            if let Some(v) = value {
                *slot = v.clone();
                applied.push(name);
            }
        }

        set(&mut item.name, &self.name, "name", &mut applied);
        set(&mut item.category, &self.category, "category", &mut applied);
        set(&mut item.price, &self.price, "price", &mut applied);
        set(&mut item.stock, &self.stock, "stock", &mut applied);
        set(&mut item.discount, &self.discount, "discount", &mut applied);
        set(&mut item.rating, &self.rating, "rating", &mut applied);
        set(&mut item.reviews, &self.reviews, "reviews", &mut applied);
        set(
            &mut item.sales_volume,
            &self.sales_volume,
            "sales_volume",
            &mut applied,
        );
        set(
            &mut item.return_rate,
            &self.return_rate,
            "return_rate",
            &mut applied,
        );
        set(
            &mut item.supplier_id,
            &self.supplier_id,
            "supplier_id",
            &mut applied,
        );
        set(
            &mut item.shipping_time,
            &self.shipping_time,
            "shipping_time",
            &mut applied,
        );
        set(
            &mut item.is_premium_supplier,
            &self.is_premium_supplier,
            "is_premium_supplier",
            &mut applied,
        );
        set(
            &mut item.customer_segment,
            &self.customer_segment,
            "customer_segment",
            &mut applied,
        );
        set(
            &mut item.purchase_frequency,
            &self.purchase_frequency,
            "purchase_frequency",
            &mut applied,
        );
        set(
            &mut item.profit_margin,
            &self.profit_margin,
            "profit_margin",
            &mut applied,
        );
        set(
            &mut item.last_restocked,
            &self.last_restocked,
            "last_restocked",
            &mut applied,
        );

        applied
    }

    /// Build an update from a loosely-typed JSON object.
    ///
    /// Keys that do not name a mutable item field are collected and returned
    /// alongside the update instead of aborting the parse, so one bad key
    /// does not discard the rest. A known key with a value of the wrong type
    /// is an error.
    pub fn from_json(value: &Value) -> Result<(ItemUpdate, Vec<String>)> {
        let object = value.as_object().ok_or_else(|| {
            CatalogError::Serialization("item update must be a JSON object".to_string())
        })?;

        let mut update = ItemUpdate::default();
        let mut unknown = Vec::new();

        for (key, raw) in object {
            match key.as_str() {
                "name" => update.name = Some(parse_field(key, raw)?),
                "category" => update.category = Some(parse_field(key, raw)?),
                "price" => update.price = Some(parse_field(key, raw)?),
                "stock" => update.stock = Some(parse_field(key, raw)?),
                "discount" => update.discount = Some(parse_field(key, raw)?),
                "rating" => update.rating = Some(parse_field(key, raw)?),
                "reviews" => update.reviews = Some(parse_field(key, raw)?),
                "sales_volume" => update.sales_volume = Some(parse_field(key, raw)?),
                "return_rate" => update.return_rate = Some(parse_field(key, raw)?),
                "supplier_id" => update.supplier_id = Some(parse_field(key, raw)?),
                "shipping_time" => update.shipping_time = Some(parse_field(key, raw)?),
                "is_premium_supplier" => {
                    update.is_premium_supplier = Some(parse_field(key, raw)?)
                }
                "customer_segment" => update.customer_segment = Some(parse_field(key, raw)?),
                "purchase_frequency" => {
                    update.purchase_frequency = Some(parse_field(key, raw)?)
                }
                "profit_margin" => update.profit_margin = Some(parse_field(key, raw)?),
                "last_restocked" => update.last_restocked = Some(parse_field(key, raw)?),
                _ => {
                    tracing::warn!(field = %key, "Field does not exist on item");
                    unknown.push(key.clone());
                }
            }
        }

        Ok((update, unknown))
    }
}

fn parse_field<T: DeserializeOwned>(field: &str, raw: &Value) -> Result<T> {
    serde_json::from_value(raw.clone()).map_err(|e| CatalogError::InvalidField {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Item {
        Item {
            id: 101,
            name: "Smart TV 50 inch".into(),
            category: "Electronics".into(),
            price: 499.99,
            stock: 120,
            discount: 10.0,
            rating: 4.5,
            reviews: 350,
            sales_volume: 300,
            return_rate: 2.5,
            supplier_id: 201,
            shipping_time: 5,
            is_premium_supplier: true,
            customer_segment: "Premium".into(),
            purchase_frequency: 10,
            profit_margin: 15.0,
            last_restocked: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
        }
    }

    #[test]
    fn test_item_revenue() {
        let item = sample_item();
        assert!((item.revenue() - 149_997.0).abs() < 1e-6);
    }

    #[test]
    fn test_item_new_defaults() {
        let item = Item::new(7, "Blender", "Home Appliances", 49.99);
        assert_eq!(item.id, 7);
        assert_eq!(item.category, "Home Appliances");
        assert_eq!(item.stock, 0);
        assert!(!item.is_premium_supplier);
    }

    #[test]
    fn test_item_serde_round_trip() {
        let item = sample_item();
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"last_restocked\":\"2023-09-01\""));
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut item = sample_item();
        let update = ItemUpdate {
            price: Some(450.0),
            stock: Some(100),
            ..Default::default()
        };
        let applied = update.apply(&mut item);
        assert_eq!(applied, vec!["price", "stock"]);
        assert_eq!(item.price, 450.0);
        assert_eq!(item.stock, 100);
        assert_eq!(item.name, "Smart TV 50 inch");
    }

    #[test]
    fn test_empty_update() {
        let mut item = sample_item();
        let update = ItemUpdate::default();
        assert!(update.is_empty());
        assert!(update.apply(&mut item).is_empty());
        assert_eq!(item, sample_item());
    }

    #[test]
    fn test_update_from_json_reports_unknown_fields() {
        let raw = serde_json::json!({
            "price": 450.0,
            "colour": "black",
            "stock": 100,
            "id": 5
        });
        let (update, unknown) = ItemUpdate::from_json(&raw).unwrap();
        assert_eq!(update.price, Some(450.0));
        assert_eq!(update.stock, Some(100));
        assert_eq!(unknown.len(), 2);
        assert!(unknown.contains(&"colour".to_string()));
        assert!(unknown.contains(&"id".to_string()));
    }

    #[test]
    fn test_update_from_json_rejects_wrong_type() {
        let raw = serde_json::json!({ "stock": "lots" });
        let err = ItemUpdate::from_json(&raw).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidField { ref field, .. } if field == "stock"));
    }

    #[test]
    fn test_update_from_json_requires_object() {
        let raw = serde_json::json!([1, 2, 3]);
        assert!(ItemUpdate::from_json(&raw).is_err());
    }

    #[test]
    fn test_update_from_json_parses_date() {
        let raw = serde_json::json!({ "last_restocked": "2024-01-15" });
        let (update, unknown) = ItemUpdate::from_json(&raw).unwrap();
        assert!(unknown.is_empty());
        assert_eq!(update.last_restocked, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_sort_field_keys() {
        let item = sample_item();
        assert_eq!(SortField::Id.key(&item), 101.0);
        assert_eq!(SortField::Price.key(&item), 499.99);
        assert_eq!(SortField::SalesVolume.key(&item), 300.0);
        assert_eq!(SortField::Rating.key(&item), 4.5);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("sales-volume".parse::<SortField>().unwrap(), SortField::SalesVolume);
        assert_eq!("kway".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::KWay);
        assert_eq!("Probing".parse::<IndexStrategy>().unwrap(), IndexStrategy::Probing);
        assert!("heap".parse::<SortAlgorithm>().is_err());
    }

    #[test]
    fn test_index_strategy_other() {
        assert_eq!(IndexStrategy::Chaining.other(), IndexStrategy::Probing);
        assert_eq!(IndexStrategy::Probing.other(), IndexStrategy::Chaining);
    }

    #[test]
    fn test_enum_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&SortAlgorithm::KWay).unwrap(),
            "\"k_way\""
        );
        assert_eq!(
            serde_json::to_string(&SortField::SalesVolume).unwrap(),
            "\"sales_volume\""
        );
    }
}
