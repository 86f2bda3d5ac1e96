// ABOUTME: Server binary exposing store activation, deactivation, and status over HTTP
// ABOUTME: Loads environment configuration, starts platform clients, and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Delivery Control Server Binary
//!
//! Starts the HTTP API in front of every supported delivery platform.

use anyhow::Result;
use clap::Parser;
use delivery_control::{config::ServerConfig, gateway::PlatformGateway, logging, server};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "delivery-control-server")]
#[command(about = "Delivery Control - store activation and status across delivery platforms")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Seed the environment before logging reads LOG_FORMAT and RUST_LOG
    let _ = dotenvy::dotenv();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    info!("{}", config.summary());

    let gateway = Arc::new(PlatformGateway::from_config(&config));

    if let Err(e) = server::serve(&config, gateway).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
