//! Product catalog module.
//!
//! Contains product records, category rules, the listing form and the
//! persisted product collection.

mod category;
mod listing;
mod product;
mod store;

pub use category::{CategoryRule, CATEGORY_RULES};
pub use listing::{check_patch, ImageUpload, ListingField, ProductForm, MAX_IMAGE_BYTES};
pub use product::{NewProduct, Product, ProductPatch};
pub use store::{CatalogStore, VendorSummary, PRODUCTS_KEY};
