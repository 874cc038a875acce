//
//  azure-devops-rest
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Azure DevOps REST Library
//!
//! A typed client for the Azure DevOps Services REST API and the core of the
//! `azdo` command-line tool.
//!
//! ## Overview
//!
//! The platform exposes dozens of resource areas (projects, dashboards,
//! policies, work items, ...) that all share one request contract: a route
//! template expanded with route values, a query string, an API version, a JSON
//! body, and a JSON response. This library implements that contract once in
//! [`api::DevOpsClient`] and layers typed per-area bindings on top of it.
//!
//! ## Features
//!
//! - **Route templates**: `{name}` and `{*name}` tokens with empty-segment collapse
//! - **API versions**: sent in the `Accept` header or the query string
//! - **Date normalization**: `/Date(ms)/` sentinels become RFC 3339 at any depth
//! - **Continuation tokens**: read from `x-ms-continuationtoken`, followed on demand
//! - **Single dispatch**: one transport call per request, no hidden retries
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: Dispatch contract and resource bindings
//! - [`auth`]: Credentials and the `Authorization` header
//! - [`config`]: Configuration file and environment overrides
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use azure_devops_rest::api::DevOpsClient;
//! use azure_devops_rest::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DevOpsClient::new("https://dev.azure.com/fabrikam")?
//!     .with_auth(AuthCredential::pat("my-pat"));
//!
//! let project = client.core().get_project("Fabrikam-Fiber", false).await?;
//! println!("{} ({})", project.reference.name, project.reference.id);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains the `azdo` commands and arguments defined using the clap derive API.
pub mod cli;

/// REST dispatch contract and typed resource bindings.
///
/// Route templating, request building, the transport seam, response decoding
/// and the dispatcher, plus per-area bindings built on them.
pub mod api;

/// Credential handling.
///
/// Personal access tokens, bearer tokens and basic credentials, turned into
/// the `Authorization` header of each request.
pub mod auth;

/// Configuration file management.
///
/// Manages the client's configuration stored in platform-specific locations:
/// - Linux: `~/.config/azdo/config.toml`
/// - macOS: `~/Library/Application Support/com.azdo.azdo/config.toml`
/// - Windows: `%APPDATA%\azdo\azdo\config\config.toml`
pub mod config;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use azure_devops_rest::Cli;
///
/// let cli = Cli::parse();
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
///
/// # Example
///
/// ```rust,no_run
/// use azure_devops_rest::ClientConfig;
///
/// let config = ClientConfig::load().expect("Failed to load config");
/// if let Some(url) = &config.organization_url {
///     println!("Organization: {}", url);
/// }
/// ```
pub use config::ClientConfig;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
///
/// # Value
///
/// `"azdo"`
pub const APP_NAME: &str = "azdo";

/// Application version constant.
///
/// Derived from Cargo.toml at compile time. Also sent in the default
/// `User-Agent` header.
///
/// # Example
///
/// ```rust
/// use azure_devops_rest::VERSION;
///
/// println!("azdo version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    ///
    /// Argument parsing failed, or a route template or route value could
    /// not be rendered.
    ///
    /// # Value
    ///
    /// `2`
    pub const USAGE: i32 = 2;

    /// Authentication required or failed.
    ///
    /// The service answered 401 or 403. The token is missing or lacks the
    /// required scope.
    ///
    /// # Value
    ///
    /// `4`
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The requested resource does not exist or the user does not have
    /// permission to see it.
    ///
    /// # Value
    ///
    /// `8`
    pub const NOT_FOUND: i32 = 8;

    /// Request throttled.
    ///
    /// The service answered 429. Wait before retrying.
    ///
    /// # Value
    ///
    /// `32`
    pub const RATE_LIMIT: i32 = 32;
}
