//! CLI configuration.

use anyhow::{Context, Result};
use bazaar_catalog::catalog::MAX_IMAGE_BYTES;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["bazaar.toml", ".bazaar.toml", "bazaar.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where portal data lives.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Account settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Listing settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory, relative to the working directory unless absolute.
    /// Defaults to `.bazaar`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

/// Account configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Simulated wait before a reset email is reported sent.
    #[serde(default = "default_reset_delay")]
    pub password_reset_delay_ms: u64,
}

fn default_reset_delay() -> u64 {
    2000
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_reset_delay_ms: default_reset_delay(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Largest image file accepted by `product add --image-file`.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

fn default_max_image_bytes() -> u64 {
    MAX_IMAGE_BYTES
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

/// Generate a default bazaar.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# SacredBazaar vendor portal configuration

[storage]
# Directory holding vendors.json, currentVendor.json and products.json
data_dir = ".bazaar"

[auth]
password_reset_delay_ms = {delay}

[catalog]
max_image_bytes = {max}
"#,
        delay = default_reset_delay(),
        max = MAX_IMAGE_BYTES,
    )
}
