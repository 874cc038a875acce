//
//  azure-devops-rest
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Client settings are stored as TOML in a platform-specific directory and
//! can be overridden from the environment.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/azdo/config.toml`
//! - **macOS**: `~/Library/Application Support/com.azdo.azdo/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\azdo\azdo\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! organization_url = "https://dev.azure.com/fabrikam"
//! api_version = "7.1"
//! api_version_mode = "header"
//! timeout_secs = 30
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `AZDO_ORG_URL` | `organization_url` |
//! | `AZDO_API_VERSION` | `api_version` |
//! | `AZDO_TOKEN` | credential (see [`crate::auth`]) |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use azure_devops_rest::config::ClientConfig;
//!
//! let config = ClientConfig::load()?.with_env_overrides();
//! if let Some(url) = &config.organization_url {
//!     println!("Using organization: {}", url);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

mod organization;

pub use organization::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::request::ApiVersionMode;

/// Environment variable overriding the organization URL.
pub const ORG_URL_ENV: &str = "AZDO_ORG_URL";

/// Environment variable overriding the default API version.
pub const API_VERSION_ENV: &str = "AZDO_API_VERSION";

/// API version used when neither the caller nor the config names one.
pub const DEFAULT_API_VERSION: &str = "7.1";

/// Keys accepted by [`ClientConfig::get`] and [`ClientConfig::set`].
pub const VALID_KEYS: &[&str] = &[
    "organization_url",
    "api_version",
    "api_version_mode",
    "timeout_secs",
    "user_agent",
];

/// Client configuration.
///
/// # Examples
///
/// ```rust
/// use azure_devops_rest::config::ClientConfig;
///
/// let config: ClientConfig = toml::from_str(r#"
///     organization_url = "https://dev.azure.com/fabrikam"
///     api_version_mode = "query"
/// "#).unwrap();
///
/// assert_eq!(config.api_version(), "7.1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Organization (collection) URL requests are resolved against.
    #[serde(default)]
    pub organization_url: Option<String>,

    /// Default API version for ad-hoc requests. Resource bindings pin their own.
    #[serde(default)]
    pub api_version: Option<String>,

    /// Where the API version goes: `Accept` header or query string.
    #[serde(default)]
    pub api_version_mode: ApiVersionMode,

    /// Transport timeout. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Overrides the `User-Agent` header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Loads the configuration from the default location, or defaults if the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the configuration, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "azdo", "azdo")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies `AZDO_ORG_URL` and `AZDO_API_VERSION` when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ORG_URL_ENV).ok(),
            std::env::var(API_VERSION_ENV).ok(),
        )
    }

    /// Applies explicit overrides; empty strings are ignored.
    pub fn with_overrides(
        mut self,
        organization_url: Option<String>,
        api_version: Option<String>,
    ) -> Self {
        if let Some(url) = organization_url.filter(|u| !u.trim().is_empty()) {
            self.organization_url = Some(url);
        }
        if let Some(version) = api_version.filter(|v| !v.trim().is_empty()) {
            self.api_version = Some(version);
        }
        self
    }

    pub fn api_version(&self) -> &str {
        self.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "organization_url" => self.organization_url.clone(),
            "api_version" => Some(self.api_version().to_string()),
            "api_version_mode" => Some(
                match self.api_version_mode {
                    ApiVersionMode::Header => "header",
                    ApiVersionMode::Query => "query",
                }
                .to_string(),
            ),
            "timeout_secs" => self.timeout_secs.map(|t| t.to_string()),
            "user_agent" => self.user_agent.clone(),
            _ => None,
        }
    }

    /// Sets a value by key.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "organization_url" => {
                self.organization_url = Some(normalize_organization_url(value)?);
            }
            "api_version" => self.api_version = Some(value.to_string()),
            "api_version_mode" => {
                self.api_version_mode = value.parse().map_err(anyhow::Error::msg)?;
            }
            "timeout_secs" => {
                self.timeout_secs = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid timeout '{}'", value))?,
                );
            }
            "user_agent" => self.user_agent = Some(value.to_string()),
            _ => anyhow::bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Resets a key to its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "organization_url" => self.organization_url = None,
            "api_version" => self.api_version = None,
            "api_version_mode" => self.api_version_mode = ApiVersionMode::default(),
            "timeout_secs" => self.timeout_secs = None,
            "user_agent" => self.user_agent = None,
            _ => anyhow::bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}
