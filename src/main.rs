//
//  azure-devops-rest
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use reqwest::StatusCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use azure_devops_rest::api::ApiError;
use azure_devops_rest::cli::{Cli, Commands};
use azure_devops_rest::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("AZDO_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Api(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("azdo version {}", azure_devops_rest::VERSION);
            Ok(())
        }
    }
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    let Some(api_error) = error.downcast_ref::<ApiError>() else {
        return exit_codes::ERROR;
    };
    if matches!(api_error, ApiError::Template(_)) {
        return exit_codes::USAGE;
    }
    match api_error.status() {
        Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => exit_codes::AUTH_ERROR,
        Some(StatusCode::NOT_FOUND) => exit_codes::NOT_FOUND,
        Some(StatusCode::TOO_MANY_REQUESTS) => exit_codes::RATE_LIMIT,
        _ => exit_codes::ERROR,
    }
}
