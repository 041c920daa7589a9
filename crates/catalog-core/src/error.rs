use thiserror::Error;

/// Top-level error type for the catalog engine.
///
/// Lookups that miss are not errors: stores, tables and searches report them
/// as `None`. This type covers configuration, parsing and the one capacity
/// condition the engine refuses to paper over (a full probing table).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Index table full: all {bucket_count} buckets occupied")]
    TableFull { bucket_count: usize },

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CatalogError {
    fn from(err: toml::ser::Error) -> Self {
        CatalogError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
