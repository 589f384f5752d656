//! # HTTP Server for Price Tag Generation
//!
//! Serves a minimal upload form and a generation endpoint that turns a
//! CSV of product rows into a downloadable PDF.
//!
//! ## Usage
//!
//! ```bash
//! etiqueta serve --listen 0.0.0.0:8080 --assets ./assets
//! ```
//!
//! Then open http://localhost:8080 in a browser to upload a CSV.

mod handlers;
mod state;

pub use state::ServerConfig;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;

use crate::error::EtiquetaError;
use state::AppState;

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use etiqueta::layout::LayoutParams;
/// use etiqueta::server::{ServerConfig, serve};
///
/// # async fn example() -> Result<(), etiqueta::error::EtiquetaError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     assets_dir: "./assets".into(),
///     layout: LayoutParams::default(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), EtiquetaError> {
    let app_state = Arc::new(AppState::new(&config));

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/api/layout", get(handlers::layout))
        // 10MB limit covers any realistic product table
        .route(
            "/api/tags/generate",
            post(handlers::generate).layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
        )
        .with_state(app_state);

    println!("Etiqueta HTTP server starting...");
    println!("Listening on: {}", config.listen_addr);
    println!("Assets directory: {}", config.assets_dir.display());
    println!();
    println!(
        "Open http://{}/ in your browser to generate tags",
        config.listen_addr
    );
    println!();

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            EtiquetaError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| EtiquetaError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
