//! Catalog App crate - demonstration driver for the catalog engine.
//!
//! The `catalog` binary parses [`cli::CliArgs`], loads [`CatalogConfig`]
//! and prints the [`report::Report`] produced by [`report::run`].
//!
//! [`CatalogConfig`]: catalog_core::CatalogConfig

pub mod cli;
pub mod report;
pub mod sample;

pub use report::{run, Report};
