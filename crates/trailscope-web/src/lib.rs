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

//! HTTP surface: reading snapshots as JSON plus the rendered heatmap images
//! under `/local/`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use std::path::PathBuf;
use tower_http::services::ServeDir;
use tracing::{debug, info};
use trailscope_core::ReadingRegistry;

/// Application state for web handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: ReadingRegistry,
}

pub fn build_router(registry: ReadingRegistry, media_dir: PathBuf) -> Router {
    let state = AppState { registry };
    Router::new()
        .route("/api/readings", get(readings_handler))
        .route("/api/readings/{name}", get(reading_handler))
        .route("/health", get(health_handler))
        .nest_service("/local", ServeDir::new(media_dir))
        .with_state(state)
}

/// Start the web server.
///
/// # Errors
/// Returns error if server fails to bind or serve
pub async fn start_web_server(
    registry: ReadingRegistry,
    media_dir: PathBuf,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(registry, media_dir);

    let addr = format!("0.0.0.0:{port}");
    info!("🌐 Starting web server on {addr}");
    info!("📊 Readings: http://localhost:{port}/api/readings");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// All reading snapshots, ordered by name
async fn readings_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshots = state.registry.snapshot_all().await;
    debug!("Serving {} reading snapshots", snapshots.len());
    Json(snapshots)
}

/// One reading snapshot by name
async fn reading_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.registry.get(&name).await {
        Some(snapshot) => Json(snapshot).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": format!("unknown reading '{name}'")})),
        )
            .into_response(),
    }
}

/// Health check endpoint
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
