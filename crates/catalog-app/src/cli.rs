//! CLI argument definitions for the catalog driver.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use catalog_core::config::CatalogConfig;
use catalog_core::types::{IndexStrategy, SortAlgorithm, SortField};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CATALOG_CONFIG";

/// Config file used when neither `--config` nor `CATALOG_CONFIG` is set.
pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

/// Catalog: run the store, index, graph and ordering stages over a product
/// catalog and print a JSON report.
#[derive(Parser, Debug)]
#[command(name = "catalog", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// JSON array of items to load instead of the built-in sample catalog.
    #[arg(long = "catalog")]
    pub catalog: Option<PathBuf>,

    /// Log level or filter directive (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Budget ceiling for the combination search.
    #[arg(short = 'b', long = "budget")]
    pub budget: Option<f64>,

    /// Bucket count of the index table.
    #[arg(long = "buckets")]
    pub buckets: Option<usize>,

    /// Index collision strategy (chaining, probing).
    #[arg(short = 's', long = "strategy")]
    pub strategy: Option<IndexStrategy>,

    /// Parts per level of the k-way merge sort.
    #[arg(short = 'k', long = "k")]
    pub k: Option<usize>,

    /// Algorithm used to reorder the store (bubble, merge, quick, k_way).
    #[arg(short = 'a', long = "algorithm")]
    pub algorithm: Option<SortAlgorithm>,

    /// Field the store is ordered by.
    #[arg(short = 'f', long = "field")]
    pub field: Option<SortField>,

    /// Print the report on a single line.
    #[arg(long = "compact")]
    pub compact: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > CATALOG_CONFIG env var > ./catalog.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    /// Returns `None` if not overridden.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }

    /// Write every flag that was given over the loaded configuration.
    pub fn apply_overrides(&self, config: &mut CatalogConfig) {
        if let Some(level) = self.resolve_log_level() {
            config.general.log_level = level;
        }
        if let Some(budget) = self.budget {
            config.combinations.budget = budget;
        }
        if let Some(buckets) = self.buckets {
            config.index.bucket_count = buckets;
        }
        if let Some(strategy) = self.strategy {
            config.index.strategy = strategy;
        }
        if let Some(k) = self.k {
            config.order.k_way_parts = k;
        }
        if let Some(algorithm) = self.algorithm {
            config.order.algorithm = algorithm;
        }
        if let Some(field) = self.field {
            config.order.field = field;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = CliArgs::parse_from(["catalog"]);
        assert!(args.config.is_none());
        assert!(args.strategy.is_none());
        assert!(!args.compact);
    }

    #[test]
    fn test_parse_typed_flags() {
        let args = CliArgs::parse_from([
            "catalog",
            "--strategy",
            "probing",
            "--algorithm",
            "k_way",
            "--field",
            "sales-volume",
            "-k",
            "4",
            "--budget",
            "350.5",
        ]);
        assert_eq!(args.strategy, Some(IndexStrategy::Probing));
        assert_eq!(args.algorithm, Some(SortAlgorithm::KWay));
        assert_eq!(args.field, Some(SortField::SalesVolume));
        assert_eq!(args.k, Some(4));
        assert_eq!(args.budget, Some(350.5));
    }

    #[test]
    fn test_invalid_strategy_rejected() {
        assert!(CliArgs::try_parse_from(["catalog", "--strategy", "cuckoo"]).is_err());
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let args = CliArgs::parse_from(["catalog", "--config", "/tmp/custom.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn test_apply_overrides() {
        let args = CliArgs::parse_from([
            "catalog",
            "--log-level",
            "debug",
            "--buckets",
            "23",
        ]);
        let mut config = CatalogConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.index.bucket_count, 23);
        // Untouched values keep their defaults.
        assert_eq!(config.order.k_way_parts, 3);
        assert_eq!(config.index.strategy, IndexStrategy::Chaining);
    }
}
