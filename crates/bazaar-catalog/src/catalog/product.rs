//! Product records and partial updates.

use crate::ids::{ProductId, VendorId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product listed by a vendor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Owning vendor. Not checked against the vendor collection.
    pub vendor_id: VendorId,
    pub name: String,
    pub description: String,
    /// Price the vendor sells at.
    pub seller_price: f64,
    /// Maximum retail price shown for comparison.
    pub mrp: f64,
    /// Category name from the rule table.
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_unit: Option<String>,
    /// Image URL or an embedded `data:` URL.
    pub image_url: String,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Stamp a new listing with an ID, owner and creation time.
    pub fn from_new(input: NewProduct, owner: VendorId) -> Self {
        Self {
            id: ProductId::generate(),
            vendor_id: owner,
            name: input.name,
            description: input.description,
            seller_price: input.seller_price,
            mrp: input.mrp,
            category: input.category,
            weight: input.weight,
            weight_unit: input.weight_unit,
            quantity: input.quantity,
            quantity_unit: input.quantity_unit,
            image_url: input.image_url,
            in_stock: input.in_stock,
            created_at: Utc::now(),
        }
    }

    /// Check if `vendor` owns this product.
    pub fn is_owned_by(&self, vendor: &VendorId) -> bool {
        &self.vendor_id == vendor
    }

    /// Percentage saved against MRP, when the seller price is lower.
    pub fn discount_percentage(&self) -> Option<f64> {
        if self.mrp > self.seller_price && self.mrp > 0.0 {
            Some((self.mrp - self.seller_price) / self.mrp * 100.0)
        } else {
            None
        }
    }

    /// "25 g", when both weight and unit are present.
    pub fn weight_label(&self) -> Option<String> {
        match (self.weight, self.weight_unit.as_deref()) {
            (Some(weight), Some(unit)) => Some(format!("{} {}", weight, unit)),
            _ => None,
        }
    }

    /// "108 beads", when both quantity and unit are present.
    pub fn quantity_label(&self) -> Option<String> {
        match (self.quantity, self.quantity_unit.as_deref()) {
            (Some(quantity), Some(unit)) => Some(format!("{} {}", quantity, unit)),
            _ => None,
        }
    }

    /// Whether the image is embedded rather than linked.
    pub fn has_embedded_image(&self) -> bool {
        self.image_url.starts_with("data:")
    }
}

/// A product before it is stored: everything except ID, owner and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub seller_price: f64,
    pub mrp: f64,
    pub category: String,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
    pub quantity: Option<u32>,
    pub quantity_unit: Option<String>,
    pub image_url: String,
    pub in_stock: bool,
}

/// Fields to merge into an existing product. `None` leaves a field as is.
///
/// The identifier, owner and creation time are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub seller_price: Option<f64>,
    pub mrp: Option<f64>,
    pub category: Option<String>,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
    pub quantity: Option<u32>,
    pub quantity_unit: Option<String>,
    pub image_url: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductPatch {
    /// Patch that only sets the stock flag.
    pub fn in_stock(in_stock: bool) -> Self {
        Self {
            in_stock: Some(in_stock),
            ..Self::default()
        }
    }

    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into `product`.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.seller_price {
            product.seller_price = price;
        }
        if let Some(mrp) = self.mrp {
            product.mrp = mrp;
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(weight) = self.weight {
            product.weight = Some(weight);
        }
        if let Some(unit) = &self.weight_unit {
            product.weight_unit = Some(unit.clone());
        }
        if let Some(quantity) = self.quantity {
            product.quantity = Some(quantity);
        }
        if let Some(unit) = &self.quantity_unit {
            product.quantity_unit = Some(unit.clone());
        }
        if let Some(image_url) = &self.image_url {
            product.image_url = image_url.clone();
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
    }
}
