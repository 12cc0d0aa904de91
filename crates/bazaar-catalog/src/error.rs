//! Catalog error types.

use bazaar_store::StoreError;
use thiserror::Error;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Persisting the product collection failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}
