//! CLI command implementations.

pub mod categories;
pub mod config;
pub mod forgot_password;
pub mod product;
pub mod vendor;

use clap::{Args, Subcommand};

/// Arguments for the vendor command.
#[derive(Args)]
pub struct VendorArgs {
    #[command(subcommand)]
    pub command: VendorCommand,
}

#[derive(Subcommand)]
pub enum VendorCommand {
    /// Create a vendor account and sign in
    Register {
        /// Registered business name.
        #[arg(long)]
        business_name: String,

        /// Login email.
        #[arg(long)]
        email: String,

        /// Password (8+ chars with upper, lower, digit and special character).
        #[arg(long)]
        password: String,

        /// Contact person.
        #[arg(long)]
        contact_person: String,

        /// Phone number.
        #[arg(long)]
        phone: String,

        /// Business address.
        #[arg(long)]
        address: String,
    },

    /// Sign in to an existing account
    SignIn {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out of the active session
    SignOut,

    /// Show the signed-in vendor
    Whoami,
}

/// Arguments for the forgot-password command.
#[derive(Args)]
pub struct ForgotPasswordArgs {
    /// Account email to send the reset link to.
    #[arg(long)]
    pub email: String,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Show a single category.
    pub name: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// List a new product
    Add(AddProductArgs),

    /// List the signed-in vendor's products
    List,

    /// Flip a product between in stock and out of stock
    ToggleStock {
        /// Product ID.
        id: String,
    },

    /// Change fields of a product
    Update(UpdateProductArgs),

    /// Delete a product
    Delete {
        /// Product ID.
        id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for `product add`.
#[derive(Args)]
pub struct AddProductArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Price you sell at.
    #[arg(long, default_value = "")]
    pub seller_price: String,

    /// Maximum retail price.
    #[arg(long, default_value = "")]
    pub mrp: String,

    /// Category name (see `bazaar categories`).
    #[arg(long, default_value = "")]
    pub category: String,

    /// Weight in the category's unit.
    #[arg(long)]
    pub weight: Option<String>,

    /// Quantity in the category's unit.
    #[arg(long)]
    pub quantity: Option<String>,

    /// Link to a product image.
    #[arg(long, conflicts_with = "image_file")]
    pub image_url: Option<String>,

    /// Image file to embed.
    #[arg(long)]
    pub image_file: Option<String>,

    /// List the product as out of stock.
    #[arg(long)]
    pub out_of_stock: bool,
}

/// Arguments for `product update`.
#[derive(Args)]
pub struct UpdateProductArgs {
    /// Product ID.
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub seller_price: Option<f64>,

    #[arg(long)]
    pub mrp: Option<f64>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub weight: Option<f64>,

    #[arg(long)]
    pub quantity: Option<u32>,

    #[arg(long)]
    pub image_url: Option<String>,

    /// Set the stock flag.
    #[arg(long)]
    pub in_stock: Option<bool>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Create a default bazaar.toml
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
