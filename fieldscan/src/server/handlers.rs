//! Request handlers: health, report index, and the reports themselves.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use log::{error, info};
use serde::Serialize;
use thiserror::Error;

use fieldscan_core::ReportGenerator;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub name: String,
    pub title: String,
    pub content_type: String,
    pub path: String,
}

/// Errors a report request can end in.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("no report named '{0}'")]
    UnknownReport(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::UnknownReport(name) => {
                info!("Request for unknown report '{}'", name);
                (StatusCode::NOT_FOUND, Html("<h1>Report not found</h1>".to_string())).into_response()
            }
            ServerError::Internal(e) => {
                error!("Report generation failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Internal Server Error</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Lists the configured reports.
pub async fn list_reports(State(state): State<AppState>) -> impl IntoResponse {
    let reports: Vec<ReportSummary> = state
        .config
        .reports
        .iter()
        .map(|r| ReportSummary {
            name: r.name.clone(),
            title: r.title.clone(),
            content_type: r.content_type.clone(),
            path: format!("/reports/{}", r.name),
        })
        .collect();
    Json(reports)
}

/// Renders one report. The scan itself is synchronous and runs to completion
/// inside this call.
pub async fn report(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, ServerError> {
    let definition = state
        .config
        .report(&name)
        .ok_or_else(|| ServerError::UnknownReport(name.clone()))?;
    let engine = state
        .engines
        .get(&name)
        .ok_or_else(|| ServerError::UnknownReport(name.clone()))?;

    let store = state.store.as_ref();
    let generator = ReportGenerator::new(store, store, store);
    let body = generator.render(definition, engine)?;
    Ok(Html(body))
}
