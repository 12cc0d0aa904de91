//! The product listing form and its category-driven validation.

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

use crate::catalog::{CategoryRule, NewProduct, Product, ProductPatch};
use crate::validation::{parse_number, parse_positive, FieldErrors};

/// Largest accepted image upload: 5 MiB.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Inputs on the listing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    Name,
    Description,
    SellerPrice,
    Mrp,
    Category,
    Weight,
    Quantity,
    ImageUrl,
}

impl ListingField {
    /// Key used in [`FieldErrors`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingField::Name => "name",
            ListingField::Description => "description",
            ListingField::SellerPrice => "sellerPrice",
            ListingField::Mrp => "mrp",
            ListingField::Category => "category",
            ListingField::Weight => "weight",
            ListingField::Quantity => "quantity",
            ListingField::ImageUrl => "imageUrl",
        }
    }
}

/// An image file picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    /// Embed the file as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.bytes))
    }
}

/// State of the "add product" form: raw inputs plus inline errors.
///
/// Inputs are kept as entered. Editing a field clears its error; choosing a
/// different category also wipes weight and quantity, since their units and
/// ranges belong to the previous category.
#[derive(Debug, Clone)]
pub struct ProductForm {
    name: String,
    description: String,
    seller_price: String,
    mrp: String,
    category: String,
    weight: String,
    quantity: String,
    image_url: String,
    in_stock: bool,
    image: Option<ImageUpload>,
    errors: FieldErrors,
    max_image_bytes: u64,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            seller_price: String::new(),
            mrp: String::new(),
            category: String::new(),
            weight: String::new(),
            quantity: String::new(),
            image_url: String::new(),
            in_stock: true,
            image: None,
            errors: FieldErrors::new(),
            max_image_bytes: MAX_IMAGE_BYTES,
        }
    }
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the upload size limit.
    pub fn with_max_image_bytes(mut self, max: u64) -> Self {
        self.max_image_bytes = max;
        self
    }

    /// Current raw value of a field.
    pub fn value(&self, field: ListingField) -> &str {
        match field {
            ListingField::Name => &self.name,
            ListingField::Description => &self.description,
            ListingField::SellerPrice => &self.seller_price,
            ListingField::Mrp => &self.mrp,
            ListingField::Category => &self.category,
            ListingField::Weight => &self.weight,
            ListingField::Quantity => &self.quantity,
            ListingField::ImageUrl => &self.image_url,
        }
    }

    /// Edit a field, clearing its error.
    pub fn set(&mut self, field: ListingField, value: impl Into<String>) {
        let value = value.into();
        self.errors.clear(field.as_str());

        let slot = match field {
            ListingField::Category => return self.select_category(value),
            ListingField::Name => &mut self.name,
            ListingField::Description => &mut self.description,
            ListingField::SellerPrice => &mut self.seller_price,
            ListingField::Mrp => &mut self.mrp,
            ListingField::Weight => &mut self.weight,
            ListingField::Quantity => &mut self.quantity,
            ListingField::ImageUrl => &mut self.image_url,
        };
        *slot = value;
    }

    fn select_category(&mut self, category: String) {
        if category != self.category {
            self.weight.clear();
            self.quantity.clear();
            self.errors.clear(ListingField::Weight.as_str());
            self.errors.clear(ListingField::Quantity.as_str());
        }
        self.category = category;
    }

    pub fn set_in_stock(&mut self, in_stock: bool) {
        self.in_stock = in_stock;
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    /// Attach an uploaded image. Rejected files are not attached and leave an
    /// `imageUrl` error behind.
    pub fn attach_image(&mut self, upload: ImageUpload) -> Result<(), String> {
        let key = ListingField::ImageUrl.as_str();
        if !upload.is_image() {
            let message = "Please select a valid image file".to_string();
            self.errors.insert(key, message.clone());
            return Err(message);
        }
        if upload.size() > self.max_image_bytes {
            let message = format!(
                "Image size must be less than {}",
                human_size(self.max_image_bytes)
            );
            self.errors.insert(key, message.clone());
            return Err(message);
        }

        debug!(file = %upload.file_name, size = upload.size(), "image attached");
        self.image = Some(upload);
        self.errors.clear(key);
        Ok(())
    }

    /// Drop the attached image and any image URL.
    pub fn remove_image(&mut self) {
        self.image = None;
        self.image_url.clear();
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Rule for the selected category, or the fallback rule.
    pub fn rule(&self) -> &'static CategoryRule {
        CategoryRule::lookup(&self.category)
    }

    /// Validate every field. On success returns the listing to store; on
    /// failure the errors are also kept on the form.
    pub fn validate(&mut self) -> Result<NewProduct, FieldErrors> {
        let rule = self.rule();
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert(ListingField::Name.as_str(), "Product name is required");
        }
        if self.description.trim().is_empty() {
            errors.insert(ListingField::Description.as_str(), "Description is required");
        }

        let seller_price = required_price(
            &self.seller_price,
            ListingField::SellerPrice,
            "Seller price",
            &mut errors,
        );
        let mrp = required_price(&self.mrp, ListingField::Mrp, "MRP", &mut errors);

        if self.category.is_empty() {
            errors.insert(ListingField::Category.as_str(), "Category is required");
        } else if !CategoryRule::is_known(&self.category) {
            errors.insert(ListingField::Category.as_str(), "Unknown category");
        }

        let weight = if rule.has_weight {
            check_weight(&self.weight, rule, &mut errors)
        } else {
            None
        };
        let quantity = if rule.has_quantity {
            check_quantity(&self.quantity, rule, &mut errors)
        } else {
            None
        };

        if self.image.is_none() && self.image_url.trim().is_empty() {
            errors.insert(
                ListingField::ImageUrl.as_str(),
                "Product image is required (upload file or provide URL)",
            );
        }

        self.errors = errors.clone();
        if !errors.is_empty() {
            debug!(errors = %errors, "listing rejected");
            return Err(errors);
        }

        let image_url = match &self.image {
            Some(upload) => upload.to_data_url(),
            None => self.image_url.trim().to_string(),
        };

        Ok(NewProduct {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            seller_price: seller_price.unwrap_or_default(),
            mrp: mrp.unwrap_or_default(),
            category: self.category.clone(),
            weight,
            weight_unit: weight.map(|_| rule.weight_unit.to_string()),
            quantity,
            quantity_unit: quantity.map(|_| rule.quantity_unit.to_string()),
            image_url,
            in_stock: self.in_stock,
        })
    }

    /// Clear every input, error and attachment; keeps the upload limit.
    pub fn reset(&mut self) {
        *self = Self {
            max_image_bytes: self.max_image_bytes,
            ..Self::default()
        };
    }
}

fn required_price(
    raw: &str,
    field: ListingField,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    if raw.is_empty() {
        errors.insert(field.as_str(), format!("{} is required", label));
        return None;
    }
    let price = parse_positive(raw);
    if price.is_none() {
        errors.insert(field.as_str(), format!("{} must be a positive number", label));
    }
    price
}

fn check_weight(raw: &str, rule: &CategoryRule, errors: &mut FieldErrors) -> Option<f64> {
    let key = ListingField::Weight.as_str();
    if raw.is_empty() {
        errors.insert(key, "Weight is required for this category");
        return None;
    }
    match parse_positive(raw) {
        None => {
            errors.insert(key, "Weight must be a positive number");
            None
        }
        Some(weight) if !rule.weight_in_range(weight) => {
            errors.insert(key, rule.weight_range_message());
            None
        }
        Some(weight) => Some(weight),
    }
}

fn check_quantity(raw: &str, rule: &CategoryRule, errors: &mut FieldErrors) -> Option<u32> {
    let key = ListingField::Quantity.as_str();
    if raw.is_empty() {
        errors.insert(key, "Quantity is required for this category");
        return None;
    }
    let whole = parse_number(raw).filter(|v| *v > 0.0 && v.fract() == 0.0);
    match whole {
        None => {
            errors.insert(key, "Quantity must be a positive whole number");
            None
        }
        Some(value) => {
            // Anything past u32 is far outside every rule's range anyway.
            let quantity = if value > u32::MAX as f64 { u32::MAX } else { value as u32 };
            if rule.quantity_in_range(quantity) {
                Some(quantity)
            } else {
                errors.insert(key, rule.quantity_range_message());
                None
            }
        }
    }
}

/// Check a patch against the product it will be merged into.
///
/// Applies the same rules as the listing form to the fields the patch sets,
/// using the category the product will have afterwards. When the category
/// changes, the product's existing weight and quantity must also fit the new
/// category unless the patch replaces them.
pub fn check_patch(patch: &ProductPatch, current: &Product) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        errors.insert(ListingField::Name.as_str(), "Product name is required");
    }
    if patch.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
        errors.insert(ListingField::Description.as_str(), "Description is required");
    }
    if patch.seller_price.is_some_and(|p| !(p.is_finite() && p > 0.0)) {
        errors.insert(
            ListingField::SellerPrice.as_str(),
            "Seller price must be a positive number",
        );
    }
    if patch.mrp.is_some_and(|p| !(p.is_finite() && p > 0.0)) {
        errors.insert(ListingField::Mrp.as_str(), "MRP must be a positive number");
    }
    if let Some(category) = &patch.category {
        if !CategoryRule::is_known(category) {
            errors.insert(ListingField::Category.as_str(), "Unknown category");
        }
    }
    if patch.image_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
        errors.insert(
            ListingField::ImageUrl.as_str(),
            "Product image is required (upload file or provide URL)",
        );
    }

    // A category change re-checks the stored measurements against the new rule.
    let moved = patch
        .category
        .as_deref()
        .is_some_and(|category| category != current.category);
    let rule = CategoryRule::lookup(patch.category.as_deref().unwrap_or(&current.category));
    let (weight, quantity) = if moved {
        (
            patch.weight.or(current.weight),
            patch.quantity.or(current.quantity),
        )
    } else {
        (patch.weight, patch.quantity)
    };

    match weight {
        Some(weight) if !(weight.is_finite() && weight > 0.0) => {
            errors.insert(ListingField::Weight.as_str(), "Weight must be a positive number");
        }
        Some(weight) if !rule.weight_in_range(weight) => {
            errors.insert(ListingField::Weight.as_str(), rule.weight_range_message());
        }
        None if moved && rule.has_weight => {
            errors.insert(
                ListingField::Weight.as_str(),
                "Weight is required for this category",
            );
        }
        _ => {}
    }
    match quantity {
        Some(0) => {
            errors.insert(
                ListingField::Quantity.as_str(),
                "Quantity must be a positive whole number",
            );
        }
        Some(quantity) if !rule.quantity_in_range(quantity) => {
            errors.insert(ListingField::Quantity.as_str(), rule.quantity_range_message());
        }
        None if moved && rule.has_quantity => {
            errors.insert(
                ListingField::Quantity.as_str(),
                "Quantity is required for this category",
            );
        }
        _ => {}
    }

    errors.into_result(())
}

fn human_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(category: &str) -> ProductForm {
        let mut form = ProductForm::new();
        form.set(ListingField::Name, "Rudraksha Mala");
        form.set(ListingField::Description, "Five mukhi, 108 beads");
        form.set(ListingField::SellerPrice, "899");
        form.set(ListingField::Mrp, "1199");
        form.set(ListingField::Category, category);
        form.set(ListingField::Weight, "25");
        form.set(ListingField::Quantity, "108");
        form.set(ListingField::ImageUrl, "https://example.com/mala.jpg");
        form
    }

    #[test]
    fn test_valid_listing() {
        let mut form = filled("Rudraksha & Malas");
        let listing = form.validate().unwrap();
        assert_eq!(listing.weight, Some(25.0));
        assert_eq!(listing.weight_unit.as_deref(), Some("g"));
        assert_eq!(listing.quantity, Some(108));
        assert_eq!(listing.quantity_unit.as_deref(), Some("beads"));
        assert!(listing.in_stock);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_weight_below_minimum_cites_bounds() {
        let mut form = filled("Rudraksha & Malas");
        form.set(ListingField::Weight, "3");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("weight"), Some("Weight must be between 5 and 500 g"));
        assert_eq!(errors.len(), 1);
        assert_eq!(form.errors(), &errors);
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let mut form = ProductForm::new();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Product name is required"));
        assert_eq!(errors.get("description"), Some("Description is required"));
        assert_eq!(errors.get("sellerPrice"), Some("Seller price is required"));
        assert_eq!(errors.get("mrp"), Some("MRP is required"));
        assert_eq!(errors.get("category"), Some("Category is required"));
        // Fallback rule still demands measurements
        assert_eq!(errors.get("weight"), Some("Weight is required for this category"));
        assert_eq!(
            errors.get("quantity"),
            Some("Quantity is required for this category")
        );
        assert_eq!(
            errors.get("imageUrl"),
            Some("Product image is required (upload file or provide URL)")
        );
    }

    #[test]
    fn test_prices_must_be_positive_numbers() {
        let mut form = filled("Incense & Dhoop");
        form.set(ListingField::Weight, "50");
        form.set(ListingField::Quantity, "20");
        form.set(ListingField::SellerPrice, "abc");
        form.set(ListingField::Mrp, "0");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("sellerPrice"),
            Some("Seller price must be a positive number")
        );
        assert_eq!(errors.get("mrp"), Some("MRP must be a positive number"));
    }

    #[test]
    fn test_seller_price_may_exceed_mrp() {
        let mut form = filled("Rudraksha & Malas");
        form.set(ListingField::SellerPrice, "5000");
        form.set(ListingField::Mrp, "10");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_quantity_must_be_whole() {
        let mut form = filled("Rudraksha & Malas");
        form.set(ListingField::Quantity, "10.5");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("quantity"),
            Some("Quantity must be a positive whole number")
        );

        form.set(ListingField::Quantity, "2000");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("quantity"),
            Some("Quantity must be between 1 and 1008 beads")
        );
    }

    #[test]
    fn test_weight_bounds_inclusive() {
        let mut form = filled("Rudraksha & Malas");
        form.set(ListingField::Weight, "500");
        assert!(form.validate().is_ok());
        form.set(ListingField::Weight, "500.5");
        assert!(form.validate().is_err());
        form.set(ListingField::Weight, "-1");
        assert_eq!(
            form.validate().unwrap_err().get("weight"),
            Some("Weight must be a positive number")
        );
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut form = filled("Rudraksha & Malas");
        form.set(ListingField::Category, "Crystals");
        form.set(ListingField::Weight, "25");
        form.set(ListingField::Quantity, "10");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("category"), Some("Unknown category"));
    }

    #[test]
    fn test_category_change_resets_measurements_and_errors() {
        let mut form = filled("Rudraksha & Malas");
        form.set(ListingField::Weight, "3");
        form.set(ListingField::Quantity, "0");
        assert!(form.validate().is_err());
        assert!(form.errors().contains("weight"));
        assert!(form.errors().contains("quantity"));

        form.set(ListingField::Category, "Idols & Murtis");
        assert_eq!(form.value(ListingField::Weight), "");
        assert_eq!(form.value(ListingField::Quantity), "");
        assert!(!form.errors().contains("weight"));
        assert!(!form.errors().contains("quantity"));
        assert_eq!(form.rule().category, "Idols & Murtis");
    }

    #[test]
    fn test_reselecting_same_category_keeps_measurements() {
        let mut form = filled("Rudraksha & Malas");
        form.set(ListingField::Category, "Rudraksha & Malas");
        assert_eq!(form.value(ListingField::Weight), "25");
    }

    #[test]
    fn test_editing_clears_field_error() {
        let mut form = ProductForm::new();
        let _ = form.validate();
        assert!(form.errors().contains("name"));
        form.set(ListingField::Name, "Tulsi Mala");
        assert!(!form.errors().contains("name"));
        assert!(form.errors().contains("description"));
    }

    #[test]
    fn test_upload_embeds_data_url() {
        let mut form = filled("Rudraksha & Malas");
        form.set(ListingField::ImageUrl, "");
        form.attach_image(ImageUpload::new("mala.png", "image/png", vec![1, 2, 3]))
            .unwrap();
        let listing = form.validate().unwrap();
        assert_eq!(listing.image_url, "data:image/png;base64,AQID");
    }

    #[test]
    fn test_upload_rejects_non_images_and_large_files() {
        let mut form = ProductForm::new();
        let err = form
            .attach_image(ImageUpload::new("notes.txt", "text/plain", vec![0; 4]))
            .unwrap_err();
        assert_eq!(err, "Please select a valid image file");
        assert!(form.image().is_none());
        assert_eq!(form.errors().get("imageUrl"), Some("Please select a valid image file"));

        let big = vec![0u8; (MAX_IMAGE_BYTES + 1) as usize];
        let err = form
            .attach_image(ImageUpload::new("huge.jpg", "image/jpeg", big))
            .unwrap_err();
        assert_eq!(err, "Image size must be less than 5MB");
        assert!(form.image().is_none());

        let exact = vec![0u8; MAX_IMAGE_BYTES as usize];
        form.attach_image(ImageUpload::new("ok.jpg", "image/jpeg", exact))
            .unwrap();
        assert!(form.image().is_some());
        assert!(!form.errors().contains("imageUrl"));
    }

    #[test]
    fn test_custom_upload_limit() {
        let mut form = ProductForm::new().with_max_image_bytes(2);
        assert!(form
            .attach_image(ImageUpload::new("a.gif", "image/gif", vec![0; 3]))
            .is_err());
        form.reset();
        assert!(form
            .attach_image(ImageUpload::new("a.gif", "image/gif", vec![0; 3]))
            .is_err());
    }

    #[test]
    fn test_remove_image() {
        let mut form = filled("Rudraksha & Malas");
        form.attach_image(ImageUpload::new("a.png", "image/png", vec![1]))
            .unwrap();
        form.remove_image();
        assert!(form.image().is_none());
        assert_eq!(form.value(ListingField::ImageUrl), "");
        assert!(form.validate().unwrap_err().contains("imageUrl"));
    }

    #[test]
    fn test_out_of_stock_listing() {
        let mut form = filled("Rudraksha & Malas");
        form.set_in_stock(false);
        assert!(!form.validate().unwrap().in_stock);
    }

    #[test]
    fn test_check_patch() {
        let mut form = filled("Rudraksha & Malas");
        let product = Product::from_new(form.validate().unwrap(), "v".into());

        assert!(check_patch(&ProductPatch::in_stock(false), &product).is_ok());

        let patch = ProductPatch {
            weight: Some(3.0),
            mrp: Some(-1.0),
            ..ProductPatch::default()
        };
        let errors = check_patch(&patch, &product).unwrap_err();
        assert_eq!(errors.get("weight"), Some("Weight must be between 5 and 500 g"));
        assert_eq!(errors.get("mrp"), Some("MRP must be a positive number"));

        // Weight is checked against the category the product moves to
        let patch = ProductPatch {
            category: Some("Idols & Murtis".to_string()),
            weight: Some(25.0),
            ..ProductPatch::default()
        };
        let errors = check_patch(&patch, &product).unwrap_err();
        assert_eq!(
            errors.get("weight"),
            Some("Weight must be between 50 and 10000 g")
        );
    }

    #[test]
    fn test_category_change_rechecks_stored_measurements() {
        let mut form = filled("Rudraksha & Malas");
        let product = Product::from_new(form.validate().unwrap(), "v".into());
        assert_eq!(product.weight, Some(25.0));
        assert_eq!(product.quantity, Some(108));

        let moved = ProductPatch {
            category: Some("Idols & Murtis".to_string()),
            ..ProductPatch::default()
        };
        let errors = check_patch(&moved, &product).unwrap_err();
        assert_eq!(
            errors.get("weight"),
            Some("Weight must be between 50 and 10000 g")
        );
        assert_eq!(
            errors.get("quantity"),
            Some("Quantity must be between 1 and 10 pieces")
        );

        // Supplying in-range replacements clears both errors
        let moved = ProductPatch {
            category: Some("Idols & Murtis".to_string()),
            weight: Some(250.0),
            quantity: Some(1),
            ..ProductPatch::default()
        };
        assert!(check_patch(&moved, &product).is_ok());

        // Re-selecting the current category leaves stored values alone
        let same = ProductPatch {
            category: Some("Rudraksha & Malas".to_string()),
            ..ProductPatch::default()
        };
        assert!(check_patch(&same, &product).is_ok());

        let mut bare = product.clone();
        bare.weight = None;
        bare.quantity = None;
        let errors = check_patch(&moved_only("Idols & Murtis"), &bare).unwrap_err();
        assert_eq!(errors.get("weight"), Some("Weight is required for this category"));
        assert_eq!(
            errors.get("quantity"),
            Some("Quantity is required for this category")
        );
    }

    fn moved_only(category: &str) -> ProductPatch {
        ProductPatch {
            category: Some(category.to_string()),
            ..ProductPatch::default()
        }
    }
}
