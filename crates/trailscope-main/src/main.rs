// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Trailscope.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use trailscope_client::{GeocodeClient, TrackerClient};
use trailscope_core::{ReadingRegistry, RefreshContext, default_readings, spawn_reading_poller};
use trailscope_types::AppConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Handle command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                println!("Trailscope - location tracker readings");
                println!("Version: {VERSION}");
                println!();
                println!("Usage: trailscope [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help    Print this help message");
                println!("  -v, --version Print version");
                return Ok(());
            }
            "--version" | "-v" => {
                println!("{VERSION}");
                return Ok(());
            }
            _ => {}
        }
    }

    // Initialize tracing with env filter support
    // Respects RUST_LOG environment variable
    let config = AppConfig::load()?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.system.log_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber")?;

    info!("🚀 Starting Trailscope v{VERSION}");
    info!("📋 Configuration Summary:");
    info!("   Tracker API: {}", config.tracker.api_url);
    info!("   Verify SSL: {}", config.tracker.verify_ssl);
    info!("   Geocode URL: {}", config.geocode.url);
    info!("   Poll interval: {}s", config.system.poll_interval_secs);
    info!(
        "   Refresh interval: {}s",
        config.system.refresh_interval_secs
    );
    info!("   Media dir: {}", config.system.media_dir.display());
    info!("   Web port: {}", config.system.http_port);

    std::fs::create_dir_all(&config.system.media_dir).with_context(|| {
        format!(
            "creating media directory {}",
            config.system.media_dir.display()
        )
    })?;

    let tracker = Arc::new(TrackerClient::from_config(&config.tracker)?);
    let geocode = Arc::new(GeocodeClient::new(config.geocode.url.clone())?);
    let ctx = RefreshContext {
        tracker,
        geocode,
        media_dir: config.system.media_dir.clone(),
    };

    let registry = ReadingRegistry::new();

    let readings = default_readings();
    info!("📊 Spawning {} reading pollers", readings.len());
    for def in readings {
        spawn_reading_poller(
            def,
            ctx.clone(),
            registry.clone(),
            config.poll_interval(),
            config.refresh_interval(),
        );
    }

    let web_registry = registry.clone();
    let media_dir = config.system.media_dir.clone();
    let port = config.system.http_port;
    tokio::spawn(async move {
        if let Err(e) = trailscope_web::start_web_server(web_registry, media_dir, port).await {
            error!("❌ Web server failed: {e}");
        }
    });

    info!("✅ Trailscope running, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    info!("👋 Shutting down");

    Ok(())
}
