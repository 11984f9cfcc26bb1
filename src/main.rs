// Copyright 2025 The Nekor Authors.
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
use env_logger::Env;
use log::info;
use std::path::{Path, PathBuf};

use nekor_server::config::{load_config, load_dotenv, NekorServerConfig};
use nekor_server::NekorServer;

#[derive(Parser)]
#[command(name = "nekor-server")]
#[command(about = "REST backend for nekor pilgrimage routes")]
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

    /// Validate the configuration without starting the server
    Validate {
        /// Show resolved configuration with environment variables expanded
        #[arg(long)]
        show_resolved: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate { show_resolved }) => validate_config(&cli.config, show_resolved),
        Some(Commands::Run) | None => run_server(&cli.config, cli.port).await,
    }
}

async fn run_server(config_path: &Path, port_override: Option<u16>) -> Result<()> {
    load_dotenv(config_path);

    let mut config = load_config(config_path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or(&config.log_level)).init();

    if let Some(port) = port_override {
        info!("Using command line port {port}");
        config.port = port;
        config.validate()?;
    }

    info!("Starting Nekor backend");
    NekorServer::new(&config).await?.run().await
}

fn validate_config(config_path: &Path, show_resolved: bool) -> Result<()> {
    load_dotenv(config_path);

    if config_path.exists() {
        println!("Validating configuration: {}", config_path.display());
    } else {
        println!(
            "Configuration file {} not found, validating environment configuration",
            config_path.display()
        );
    }
    println!();

    match load_config(config_path) {
        Ok(config) => {
            println!("[OK] Configuration is valid");
            if show_resolved {
                print_resolved(&config)?;
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

fn print_resolved(config: &NekorServerConfig) -> Result<()> {
    println!();
    println!("Resolved configuration:");
    print!("{}", serde_yaml::to_string(&config.redacted())?);
    Ok(())
}
