use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CatalogError, Result};
use crate::types::{IndexStrategy, SortAlgorithm, SortField};

/// Top-level configuration for the catalog engine.
///
/// Loaded from `catalog.toml` by default. Every section is optional; missing
/// sections and keys fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub order: OrderConfig,
    #[serde(default)]
    pub combinations: CombinationConfig,
}

impl CatalogConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CatalogConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CatalogError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Growable store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Slots allocated before the first doubling.
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 5,
        }
    }
}

/// Index table settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Number of buckets. Fixed for the lifetime of a table; probing tables
    /// need more buckets than keys.
    pub bucket_count: usize,
    /// Collision strategy.
    pub strategy: IndexStrategy,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            bucket_count: 10,
            strategy: IndexStrategy::Chaining,
        }
    }
}

/// Ordering kit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Number of parts each k-way merge sort level splits into.
    pub k_way_parts: usize,
    /// Algorithm used when a single sort is requested.
    pub algorithm: SortAlgorithm,
    /// Field used by the price-style sorts.
    pub field: SortField,
    /// Field used by the k-way merge sort.
    pub k_way_field: SortField,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            k_way_parts: 3,
            algorithm: SortAlgorithm::Merge,
            field: SortField::Price,
            k_way_field: SortField::SalesVolume,
        }
    }
}

/// Budget combination search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinationConfig {
    /// Budget ceiling for a combination's total price.
    pub budget: f64,
    /// Largest store the driver will run the exhaustive search over.
    pub max_items: usize,
}

impl Default for CombinationConfig {
    fn default() -> Self {
        Self {
            budget: 700.0,
            max_items: 16,
        }
    }
}
