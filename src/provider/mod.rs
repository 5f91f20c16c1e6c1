//! Catalog providers: produce a complete metadata snapshot or fail.
//!
//! A provider owns every catalog round-trip and any per-object fan-out;
//! the rest of the pipeline only ever sees a finished, validated model.
//! There are no retries and no partial results.

mod sqlite;

pub use sqlite::SqliteProvider;

use crate::model::DatabaseMetadata;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("failed to open catalog: {0}")]
    Connect(String),
    #[error("catalog query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("malformed model: {0}")]
    MalformedModel(String),
}

pub trait CatalogProvider {
    fn name(&self) -> &'static str;

    /// Build one complete snapshot from the given connection string.
    fn load(&self, connection: &str) -> Result<DatabaseMetadata, ProviderError>;
}
