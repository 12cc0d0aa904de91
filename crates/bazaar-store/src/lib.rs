//! Type-safe Key-Value persistence layer for SacredBazaar.
//!
//! Every collection the portal keeps (vendors, the active session, products)
//! is a single JSON value under one key. Writes replace the whole value.
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_store::Store;
//!
//! let store = Store::open("./.bazaar")?;
//!
//! // Store a value
//! store.set("products", &products)?;
//!
//! // Retrieve a value
//! let products: Option<Vec<Product>> = store.get("products")?;
//!
//! // Delete a value
//! store.delete("currentVendor")?;
//! ```

mod error;
mod kv;

pub use error::StoreError;
pub use kv::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Store, StoreError};
}
