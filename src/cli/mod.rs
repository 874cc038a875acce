//
//  azure-devops-rest
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod config;

pub use api::ApiCommand;
pub use config::ConfigCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::DevOpsClient;
use crate::auth::AuthCredential;
use crate::config::ClientConfig;

/// azdo - Call the Azure DevOps REST API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "azdo",
    version,
    about = "Call the Azure DevOps REST API from the command line",
    long_about = "azdo sends requests to an Azure DevOps organization.\n\n\
                  Routes are templates such as '{project}/_apis/wit/classificationnodes/{*path}' \
                  expanded with -p name=value pairs.",
    propagate_version = true,
    after_help = "Use 'azdo <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Organization URL or name (e.g. https://dev.azure.com/fabrikam or fabrikam)
    #[arg(long = "org", global = true, env = "AZDO_ORG_URL")]
    pub organization: Option<String>,

    /// Personal access token (defaults to AZDO_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Loads the configuration with environment and flag overrides applied.
    pub fn load_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::load()?.with_env_overrides();
        let organization = self
            .organization
            .as_deref()
            .map(crate::config::normalize_organization_url)
            .transpose()?;
        Ok(config.with_overrides(organization, None))
    }

    /// Builds an authenticated client from configuration and flags.
    pub fn client(&self, config: &ClientConfig) -> Result<DevOpsClient> {
        let client = DevOpsClient::from_config(config)?;
        let credential = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(AuthCredential::pat)
            .or_else(AuthCredential::from_env);

        Ok(match credential {
            Some(credential) => client.with_auth(credential),
            None => {
                tracing::debug!("no token configured, sending anonymous requests");
                client
            }
        })
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Make API requests
    Api(ApiCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}
