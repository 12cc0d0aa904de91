//! End-to-end listing flow against a directory-backed store.

use bazaar_catalog::catalog::PRODUCTS_KEY;
use bazaar_catalog::prelude::*;
use bazaar_store::Store;

fn mala_form() -> ProductForm {
    let mut form = ProductForm::new();
    form.set(ListingField::Name, "Panchmukhi Rudraksha Mala");
    form.set(ListingField::Description, "Five mukhi beads on cotton thread");
    form.set(ListingField::SellerPrice, "899");
    form.set(ListingField::Mrp, "1199");
    form.set(ListingField::Category, "Rudraksha & Malas");
    form.set(ListingField::Weight, "25");
    form.set(ListingField::Quantity, "108");
    form.set(ListingField::ImageUrl, "https://example.com/mala.jpg");
    form
}

#[test]
fn listing_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let vendor = VendorId::new("1718000000000");

    let created = {
        let mut catalog = CatalogStore::open(Store::open(dir.path()).unwrap());
        let listing = mala_form().validate().unwrap();
        catalog.create(listing, vendor.clone()).unwrap()
    };

    let catalog = CatalogStore::open(Store::open(dir.path()).unwrap());
    let owned = catalog.list_by_owner(&vendor);
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0], &created);
    assert_eq!(owned[0].weight_unit.as_deref(), Some("g"));
    assert_eq!(owned[0].quantity_unit.as_deref(), Some("beads"));
    assert!(dir.path().join("products.json").exists());
}

#[test]
fn rejected_listing_is_not_stored() {
    let store = Store::in_memory();
    let mut catalog = CatalogStore::open(store.clone());

    let mut form = mala_form();
    form.set(ListingField::Weight, "3");
    let errors = form.validate().unwrap_err();
    assert_eq!(
        errors.get("weight"),
        Some("Weight must be between 5 and 500 g")
    );

    // Fix the field and resubmit
    form.set(ListingField::Weight, "30");
    assert!(form.errors().is_empty());
    catalog
        .create(form.validate().unwrap(), VendorId::new("v"))
        .unwrap();
    assert_eq!(catalog.len(), 1);
}

#[test]
fn vendors_see_only_their_own_products() {
    let mut catalog = CatalogStore::open(Store::in_memory());
    let asha = VendorId::new("asha");
    let ravi = VendorId::new("ravi");

    let mine = catalog
        .create(mala_form().validate().unwrap(), asha.clone())
        .unwrap();
    let theirs = catalog
        .create(mala_form().validate().unwrap(), ravi.clone())
        .unwrap();

    let listed: Vec<_> = catalog.list_by_owner(&asha).into_iter().cloned().collect();
    assert!(listed.contains(&mine));
    assert!(!listed.contains(&theirs));
    assert_eq!(catalog.all().len(), 2);
}

#[test]
fn stock_toggle_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let vendor = VendorId::new("asha");
    let mut catalog = CatalogStore::open(Store::open(dir.path()).unwrap());
    let product = catalog
        .create(mala_form().validate().unwrap(), vendor.clone())
        .unwrap();

    catalog.toggle_stock(&product.id).unwrap();
    let summary = catalog.summary_for(&vendor);
    assert_eq!((summary.total, summary.in_stock, summary.out_of_stock), (1, 0, 1));

    catalog.toggle_stock(&product.id).unwrap();
    let current = catalog.get(&product.id).unwrap();
    assert_eq!(current.id, product.id);
    assert_eq!(current.created_at, product.created_at);

    let store = Store::open(dir.path()).unwrap();
    let stored: Vec<Product> = store.get(PRODUCTS_KEY).unwrap().unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].in_stock);
    assert_eq!(stored[0].id, product.id);
    assert_eq!(stored[0].created_at, product.created_at);

    let reopened = CatalogStore::open(store);
    let restored = reopened.get(&product.id).unwrap();
    assert!(restored.in_stock);
    assert_eq!(restored.created_at, product.created_at);
}

#[test]
fn corrupt_products_start_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("products.json"), "[{\"id\":").unwrap();

    let store = Store::open(dir.path()).unwrap();
    let catalog = CatalogStore::open(store.clone());
    assert!(catalog.is_empty());
    assert!(store.exists(PRODUCTS_KEY).unwrap());
}

#[test]
fn uploaded_image_is_embedded() {
    let mut catalog = CatalogStore::open(Store::in_memory());
    let mut form = mala_form();
    form.set(ListingField::ImageUrl, "");
    form.attach_image(ImageUpload::new("mala.png", "image/png", b"png".to_vec()))
        .unwrap();

    let product = catalog
        .create(form.validate().unwrap(), VendorId::new("v"))
        .unwrap();
    assert!(product.has_embedded_image());
    assert!(product.image_url.starts_with("data:image/png;base64,"));
}
