//! Server state and configuration.

use std::path::PathBuf;

use crate::context::RenderingContext;
use crate::layout::LayoutParams;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Directory holding fonts/ and logos/ resources
    pub assets_dir: PathBuf,
    /// Sheet and cell geometry used for every generated document
    pub layout: LayoutParams,
}

/// Application state shared across handlers. Resources are loaded once
/// at startup; every request reads them immutably.
pub struct AppState {
    pub ctx: RenderingContext,
    pub layout: LayoutParams,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            ctx: RenderingContext::load(&config.assets_dir),
            layout: config.layout,
        }
    }
}
