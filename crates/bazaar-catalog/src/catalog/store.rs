//! The persisted product collection.

use bazaar_store::Store;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{NewProduct, Product, ProductPatch};
use crate::ids::{ProductId, VendorId};
use crate::CatalogError;

/// Storage key holding every product.
pub const PRODUCTS_KEY: &str = "products";

/// Counts shown on a vendor's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSummary {
    pub total: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
}

/// In-memory product collection mirrored to the `products` key.
///
/// Every mutation writes the whole collection before the in-memory copy is
/// replaced, so a failed write leaves the catalog unchanged.
#[derive(Debug)]
pub struct CatalogStore {
    store: Store,
    products: Vec<Product>,
}

impl CatalogStore {
    /// Load the catalog. Missing or unreadable data starts an empty catalog.
    pub fn open(store: Store) -> Self {
        let products = match store.get::<Vec<Product>>(PRODUCTS_KEY) {
            Ok(Some(products)) => products,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "stored products unreadable, starting empty");
                Vec::new()
            }
        };
        debug!(count = products.len(), "catalog loaded");
        Self { store, products }
    }

    /// Stamp and store a new listing for `owner`.
    pub fn create(&mut self, input: NewProduct, owner: VendorId) -> Result<Product, CatalogError> {
        let product = Product::from_new(input, owner);
        let mut next = self.products.clone();
        next.push(product.clone());
        self.commit(next)?;
        info!(product = %product.id, vendor = %product.vendor_id, "product created");
        Ok(product)
    }

    /// Merge `patch` into the product with `id`. Unknown IDs change nothing
    /// and return `None`.
    pub fn update(
        &mut self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, CatalogError> {
        let Some(index) = self.position(id) else {
            debug!(product = %id, "update skipped, no such product");
            return Ok(None);
        };
        let mut next = self.products.clone();
        patch.apply(&mut next[index]);
        let updated = next[index].clone();
        self.commit(next)?;
        info!(product = %id, "product updated");
        Ok(Some(updated))
    }

    /// Flip the stock flag. Returns the new flag, or `None` for unknown IDs.
    pub fn toggle_stock(&mut self, id: &ProductId) -> Result<Option<bool>, CatalogError> {
        let Some(product) = self.get(id) else {
            return Ok(None);
        };
        let patch = ProductPatch::in_stock(!product.in_stock);
        Ok(self.update(id, &patch)?.map(|p| p.in_stock))
    }

    /// Remove the product with `id`, returning it.
    pub fn delete(&mut self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let Some(index) = self.position(id) else {
            debug!(product = %id, "delete skipped, no such product");
            return Ok(None);
        };
        let mut next = self.products.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        info!(product = %id, "product deleted");
        Ok(Some(removed))
    }

    /// Products owned by `owner`, in insertion order.
    pub fn list_by_owner(&self, owner: &VendorId) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_owned_by(owner))
            .collect()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Every product regardless of owner.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Stock counts for `owner`'s products.
    pub fn summary_for(&self, owner: &VendorId) -> VendorSummary {
        self.list_by_owner(owner)
            .into_iter()
            .fold(VendorSummary::default(), |mut summary, product| {
                summary.total += 1;
                if product.in_stock {
                    summary.in_stock += 1;
                } else {
                    summary.out_of_stock += 1;
                }
                summary
            })
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }

    fn commit(&mut self, next: Vec<Product>) -> Result<(), CatalogError> {
        self.store.set(PRODUCTS_KEY, &next)?;
        self.products = next;
        Ok(())
    }
}
