//! Bazaar CLI - Command line vendor portal for SacredBazaar.
//!
//! Commands:
//! - `bazaar vendor` - Register, sign in and out, show the active vendor
//! - `bazaar forgot-password` - Request a password reset link
//! - `bazaar categories` - Show product categories and their limits
//! - `bazaar product` - Add, list, update and delete listings
//! - `bazaar config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CategoriesArgs, ConfigArgs, ForgotPasswordArgs, ProductArgs, VendorArgs};

/// Bazaar CLI - Manage your SacredBazaar vendor account and listings
#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage your vendor account
    Vendor(VendorArgs),

    /// Request a password reset link
    ForgotPassword(ForgotPasswordArgs),

    /// Show product categories
    Categories(CategoriesArgs),

    /// Manage your product listings
    Product(ProductArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, cli.data_dir, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Vendor(args) => commands::vendor::run(args, &ctx).await,
        Commands::ForgotPassword(args) => commands::forgot_password::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
