//! Catalog application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing on stderr
//! 3. Load the item catalog (built-in sample plus index extras, or `--catalog` file)
//! 4. Run every stage and print the JSON report on stdout

use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_app::cli::CliArgs;
use catalog_app::{run, sample};
use catalog_core::config::CatalogConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliArgs::parse();

    // Config.
    let config_file = cli.resolve_config_path();
    let mut config = CatalogConfig::load_or_default(&config_file);
    cli.apply_overrides(&mut config);

    // Tracing. --log-level > RUST_LOG > config file.
    let filter = match cli.resolve_log_level() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting catalog v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    let (items, index_extras) = match &cli.catalog {
        Some(path) => (sample::load_catalog(path)?, Vec::new()),
        None => (sample::sample_items()?, sample::index_extras()?),
    };

    let report = run(&config, items, &index_extras)?;
    let json = if cli.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{json}");

    Ok(())
}
