// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::path::{Path, PathBuf};

use versioned_api_server::api::build_versioned_api;
use versioned_api_server::{ensure_config_file, init_logging, load_config_file, Server};

#[derive(Parser)]
#[command(name = "versioned-api-server")]
#[command(about = "Web API server with header, query, media type and URL segment versioning")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config/server.yaml", global = true)]
    config: PathBuf,

    /// Override the server port
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server (default if no subcommand specified)
    Run,

    /// Validate a configuration file without starting the server
    Validate {
        /// Show resolved configuration with environment variables expanded
        #[arg(long)]
        show_resolved: bool,
    },

    /// List the versioned routes the configuration would serve
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let env_file_loaded = load_env_file(&cli.config);

    match cli.command {
        Some(Commands::Validate { show_resolved }) => validate_config(&cli.config, show_resolved),
        Some(Commands::Routes) => list_routes(&cli.config),
        Some(Commands::Run) | None => run_server(cli.config, cli.port, env_file_loaded).await,
    }
}

/// Load `.env` from the config file's directory, if present.
fn load_env_file(config_path: &Path) -> bool {
    let Some(env_file) = config_path.parent().map(|dir| dir.join(".env")) else {
        return false;
    };
    if !env_file.exists() {
        return false;
    }
    match dotenvy::from_path(&env_file) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Warning: Failed to load .env file: {e}");
            false
        }
    }
}

async fn run_server(
    config_path: PathBuf,
    port_override: Option<u16>,
    env_file_loaded: bool,
) -> Result<()> {
    let created = ensure_config_file(&config_path)?;
    let mut config = load_config_file(&config_path)?;
    init_logging(&config.log_level);

    info!("Starting versioned API server");
    if created {
        info!(
            "Default configuration created at: {}",
            config_path.display()
        );
    }
    if env_file_loaded {
        info!("Loaded environment variables from .env file");
    }
    info!("Config file: {}", config_path.display());

    if let Some(port) = port_override {
        info!("Using command line port {port}");
        config.port = port;
    }
    debug!("Server configuration: {config:?}");

    Server::new(config).run().await
}

fn validate_config(config_path: &Path, show_resolved: bool) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[ERROR] Configuration file not found: {}",
            config_path.display()
        );
        std::process::exit(1);
    }

    match load_config_file(config_path) {
        Ok(config) => {
            println!("[OK] Configuration file is valid");
            println!();

            let versioning = &config.versioning;
            println!("Summary:");
            println!("  Address: {}:{}", config.host, config.port);
            println!("  Docs: {}", if config.enable_docs { "enabled" } else { "disabled" });
            println!("  Default version: {}", versioning.default_version);
            println!(
                "  Assume default when unspecified: {}",
                versioning.assume_default_when_unspecified
            );
            println!("  Version readers: {}", versioning.readers.len());
            for reader in &versioning.readers {
                println!("    - {} '{}'", reader.source(), reader.name());
            }

            if show_resolved {
                println!();
                println!("Resolved configuration:");
                print!("{}", serde_yaml::to_string(&config)?);
            }

            Ok(())
        }
        Err(e) => {
            println!("[ERROR] Configuration is invalid:");
            println!("  {e}");
            std::process::exit(1);
        }
    }
}

fn list_routes(config_path: &Path) -> Result<()> {
    let config = load_config_file(config_path)?;
    let api = build_versioned_api(&config.versioning)?;

    println!("{:<6} {:<40} {:<10} STATUS", "METHOD", "PATH", "VERSION");
    for registration in api.registry().registrations() {
        let status = if registration.is_deprecated() {
            match &registration.sunset {
                Some(sunset) => format!("deprecated (sunset {sunset})"),
                None => "deprecated".to_string(),
            }
        } else {
            "active".to_string()
        };
        println!(
            "{:<6} {:<40} {:<10} {status}",
            registration.handler.method().as_str(),
            api.path_for(&registration.route_template),
            registration.version.to_string(),
        );
    }

    Ok(())
}
