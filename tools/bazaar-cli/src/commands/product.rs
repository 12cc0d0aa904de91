//! Product listing commands.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use bazaar_auth::Vendor;
use bazaar_catalog::catalog::{
    check_patch, CatalogStore, CategoryRule, ImageUpload, ListingField, Product, ProductForm,
    ProductPatch,
};
use bazaar_catalog::{FieldErrors, ProductId};
use dialoguer::Confirm;

use super::vendor::rejected;
use super::{AddProductArgs, ProductArgs, ProductCommand, UpdateProductArgs};
use crate::context::Context;
use crate::output::{format_bytes, format_price, stock_badge};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let vendor = ctx.require_vendor()?;
    let mut catalog = ctx.catalog()?;

    match args.command {
        ProductCommand::Add(args) => add(args, &vendor, &mut catalog, ctx).await,
        ProductCommand::List => list(&vendor, &catalog, ctx).await,
        ProductCommand::ToggleStock { id } => toggle_stock(&id, &vendor, &mut catalog, ctx).await,
        ProductCommand::Update(args) => update(args, &vendor, &mut catalog, ctx).await,
        ProductCommand::Delete { id, yes } => delete(&id, yes, &vendor, &mut catalog, ctx).await,
    }
}

async fn add(
    args: AddProductArgs,
    vendor: &Vendor,
    catalog: &mut CatalogStore,
    ctx: &Context,
) -> Result<()> {
    let mut form = ProductForm::new().with_max_image_bytes(ctx.config.catalog.max_image_bytes);
    form.set(ListingField::Name, args.name);
    form.set(ListingField::Description, args.description);
    form.set(ListingField::SellerPrice, args.seller_price);
    form.set(ListingField::Mrp, args.mrp);
    form.set(ListingField::Category, args.category);
    form.set(ListingField::Weight, args.weight.unwrap_or_default());
    form.set(ListingField::Quantity, args.quantity.unwrap_or_default());
    form.set(ListingField::ImageUrl, args.image_url.unwrap_or_default());
    form.set_in_stock(!args.out_of_stock);

    let upload_error = match &args.image_file {
        Some(path) => {
            let upload = read_image(&ctx.resolve_path(path))?;
            ctx.output.debug(&format!(
                "Image {} ({}, {})",
                upload.file_name,
                upload.media_type,
                format_bytes(upload.size())
            ));
            form.attach_image(upload).err()
        }
        None => None,
    };

    let listing = match (form.validate(), upload_error) {
        (Ok(listing), None) => listing,
        (Ok(_), Some(message)) => {
            return rejected(FieldErrors::single(ListingField::ImageUrl.as_str(), message), ctx)
        }
        (Err(mut errors), Some(message)) => {
            errors.insert(ListingField::ImageUrl.as_str(), message);
            return rejected(errors, ctx);
        }
        (Err(errors), None) => return rejected(errors, ctx),
    };

    let product = catalog.create(listing, vendor.id.clone())?;
    if ctx.output.is_json() {
        ctx.output.json(&product);
    } else {
        ctx.output.success(&format!("Listed {}", product.name));
        show_product(&product, ctx);
    }
    Ok(())
}

async fn list(vendor: &Vendor, catalog: &CatalogStore, ctx: &Context) -> Result<()> {
    let products = catalog.list_by_owner(&vendor.id);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Products for {}", vendor.business_name));
    if products.is_empty() {
        ctx.output.info("No products yet.");
        ctx.output.info("Run `bazaar product add` to list your first product.");
        return Ok(());
    }

    let widths = [22, 28, 26, 12, 12];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    for product in &products {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.category,
                &format_price(product.seller_price),
                &stock_badge(product.in_stock),
            ],
            &widths,
        );
    }

    let summary = catalog.summary_for(&vendor.id);
    ctx.output.info("");
    ctx.output.info(&format!(
        "{} products, {} in stock, {} out of stock",
        summary.total, summary.in_stock, summary.out_of_stock
    ));
    Ok(())
}

async fn toggle_stock(
    id: &str,
    vendor: &Vendor,
    catalog: &mut CatalogStore,
    ctx: &Context,
) -> Result<()> {
    let id = owned_product(id, vendor, catalog)?;
    match catalog.toggle_stock(&id)? {
        Some(in_stock) => {
            if ctx.output.is_json() {
                ctx.output
                    .json(&serde_json::json!({ "id": id, "inStock": in_stock }));
            } else {
                ctx.output
                    .success(&format!("{} is now {}", id, stock_badge(in_stock)));
            }
            Ok(())
        }
        None => bail!("No product with ID {}", id),
    }
}

async fn update(
    args: UpdateProductArgs,
    vendor: &Vendor,
    catalog: &mut CatalogStore,
    ctx: &Context,
) -> Result<()> {
    let id = owned_product(&args.id, vendor, catalog)?;
    let Some(current) = catalog.get(&id).cloned() else {
        bail!("No product with ID {}", id);
    };

    let patch = build_patch(args, &current);
    if patch.is_empty() {
        bail!("Nothing to update. Pass at least one field to change.");
    }
    if let Err(errors) = check_patch(&patch, &current) {
        return rejected(errors, ctx);
    }

    match catalog.update(&id, &patch)? {
        Some(product) => {
            if ctx.output.is_json() {
                ctx.output.json(&product);
            } else {
                ctx.output.success(&format!("Updated {}", product.name));
                show_product(&product, ctx);
            }
            Ok(())
        }
        None => bail!("No product with ID {}", id),
    }
}

async fn delete(
    id: &str,
    yes: bool,
    vendor: &Vendor,
    catalog: &mut CatalogStore,
    ctx: &Context,
) -> Result<()> {
    let id = owned_product(id, vendor, catalog)?;
    let name = catalog
        .get(&id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| id.to_string());

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}?", name))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Delete cancelled");
            return Ok(());
        }
    }

    match catalog.delete(&id)? {
        Some(product) => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "deleted": product.id }));
            } else {
                ctx.output.success(&format!("Deleted {}", product.name));
            }
            Ok(())
        }
        None => bail!("No product with ID {}", id),
    }
}

/// Resolve `id` to a product the vendor owns. Other vendors' products are
/// reported as missing.
fn owned_product(id: &str, vendor: &Vendor, catalog: &CatalogStore) -> Result<ProductId> {
    let id = ProductId::new(id);
    match catalog.get(&id) {
        Some(product) if product.is_owned_by(&vendor.id) => Ok(id),
        _ => bail!("No product with ID {}", id),
    }
}

/// Turn update flags into a patch. Units follow the category the product
/// ends up in.
fn build_patch(args: UpdateProductArgs, current: &Product) -> ProductPatch {
    let category_changed = args
        .category
        .as_deref()
        .is_some_and(|category| category != current.category);
    let rule = CategoryRule::lookup(args.category.as_deref().unwrap_or(&current.category));

    let weight_unit = (args.weight.is_some() || (category_changed && current.weight.is_some()))
        .then(|| rule.weight_unit.to_string());
    let quantity_unit = (args.quantity.is_some()
        || (category_changed && current.quantity.is_some()))
    .then(|| rule.quantity_unit.to_string());

    ProductPatch {
        name: args.name,
        description: args.description,
        seller_price: args.seller_price,
        mrp: args.mrp,
        category: args.category,
        weight: args.weight,
        weight_unit,
        quantity: args.quantity,
        quantity_unit,
        image_url: args.image_url,
        in_stock: args.in_stock,
    }
}

fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file: {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(ImageUpload::new(file_name, media_type_for(path), bytes))
}

fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

fn show_product(product: &Product, ctx: &Context) {
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &format_price(product.seller_price));
    ctx.output.kv("MRP", &format_price(product.mrp));
    if let Some(discount) = product.discount_percentage() {
        ctx.output.kv("Discount", &format!("{:.0}% off", discount));
    }
    if let Some(weight) = product.weight_label() {
        ctx.output.kv("Weight", &weight);
    }
    if let Some(quantity) = product.quantity_label() {
        ctx.output.kv("Quantity", &quantity);
    }
    let image = if product.has_embedded_image() {
        "embedded upload".to_string()
    } else {
        product.image_url.clone()
    };
    ctx.output.kv("Image", &image);
    ctx.output.kv("Stock", &stock_badge(product.in_stock));
}
