//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use bazaar_auth::{CredentialStore, Vendor};
use bazaar_catalog::catalog::CatalogStore;
use bazaar_store::Store;
use tracing::debug;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file in use, if one was found.
    pub config_path: Option<PathBuf>,
    data_dir_override: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, data_dir: Option<String>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        debug!(config = ?config_path, "configuration loaded");

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            data_dir_override: data_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Data directory: `--data-dir`, then the config file, then `.bazaar`.
    pub fn data_dir(&self) -> PathBuf {
        let configured = self
            .data_dir_override
            .as_deref()
            .or(self.config.storage.data_dir.as_deref())
            .unwrap_or(".bazaar");
        self.resolve_path(configured)
    }

    /// Open the file-backed store in the data directory.
    pub fn open_store(&self) -> Result<Store> {
        let dir = self.data_dir();
        self.output.debug(&format!("Data directory: {}", dir.display()));
        Store::open(&dir).with_context(|| format!("Failed to open data directory {}", dir.display()))
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        Ok(CredentialStore::open(self.open_store()?))
    }

    pub fn catalog(&self) -> Result<CatalogStore> {
        Ok(CatalogStore::open(self.open_store()?))
    }

    /// The signed-in vendor, or an error telling the user to sign in.
    pub fn require_vendor(&self) -> Result<Vendor> {
        match self.credentials()?.current_vendor() {
            Some(vendor) => Ok(vendor.clone()),
            None => bail!("Not signed in. Run `bazaar vendor sign-in` first."),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
