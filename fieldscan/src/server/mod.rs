//! HTTP server
//!
//! Axum-based server exposing one HTML report per configured report
//! definition under `/reports/:name`.

mod handlers;
mod routes;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::net::TcpListener;

use fieldscan_core::{RegexEngine, ScanConfig};

use crate::store::FileStore;

pub use handlers::ServerError;
pub use routes::create_router;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ScanConfig>,
    pub store: Arc<FileStore>,
    /// One compiled engine per report, built at startup.
    pub engines: Arc<HashMap<String, RegexEngine>>,
}

impl AppState {
    /// Compiles every report's patterns up front so a bad pattern fails at
    /// startup instead of on the first request.
    pub fn new(config: ScanConfig, store: FileStore) -> Result<Self> {
        let mut engines = HashMap::new();
        for report in &config.reports {
            let engine = RegexEngine::new(&config.rules_for(report))
                .with_context(|| format!("Failed to build engine for report '{}'", report.name))?;
            engines.insert(report.name.clone(), engine);
        }
        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
            engines: Arc::new(engines),
        })
    }
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .context("Failed to bind HTTP server")?;

    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("HTTP server shutting down");
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
