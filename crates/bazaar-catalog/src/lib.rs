//! Product catalog for the SacredBazaar vendor portal.
//!
//! - **Categories**: the fixed table of categories and their measurement rules
//! - **Listing**: the add-product form and its category-driven validation
//! - **Store**: every vendor's products, persisted under one key
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_catalog::prelude::*;
//! use bazaar_store::Store;
//!
//! let mut catalog = CatalogStore::open(Store::open("./.bazaar")?);
//!
//! let mut form = ProductForm::new();
//! form.set(ListingField::Category, "Rudraksha & Malas");
//! form.set(ListingField::Weight, "25");
//! // ...
//!
//! match form.validate() {
//!     Ok(listing) => { catalog.create(listing, vendor_id)?; }
//!     Err(errors) => println!("{}", errors),
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod ids;
pub mod validation;

pub use error::CatalogError;
pub use ids::*;
pub use validation::FieldErrors;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::validation::FieldErrors;

    pub use crate::catalog::{
        CatalogStore, CategoryRule, ImageUpload, ListingField, NewProduct, Product, ProductForm,
        ProductPatch, VendorSummary,
    };
}
