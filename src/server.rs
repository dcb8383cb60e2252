//! HTTP boundary: `GET /api/pdf?id=<id>` returns the rendered protocol as
//! an attachment, or a JSON `{"error": ...}` body on failure.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::pdf::{RenderOptions, RenderedPdf, render};
use crate::store::MeetingStore;

/// Shared, read-only handler state. The store is injected by the caller.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MeetingStore>,
    pub options: Arc<RenderOptions>,
}

impl AppState {
    pub fn new(store: impl MeetingStore + 'static, options: RenderOptions) -> Self {
        Self {
            store: Arc::new(store),
            options: Arc::new(options),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Ingen mötes-ID angiven")]
    Validation,
    #[error("Möte ej hittat")]
    NotFound,
    #[error("Fel vid PDF-generering")]
    Internal(#[from] Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref e) = self {
            log::error!("PDF export failed: {e}");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/pdf", get(export_pdf))
        .with_state(state)
}

pub async fn serve(addr: &str, state: AppState) -> Result<(), std::io::Error> {
    log::info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, build_router(state)).await
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn export_pdf(State(state): State<AppState>, Query(query): Query<ExportQuery>) -> Response {
    match export(state, query.id).await {
        Ok(pdf) => pdf_response(pdf),
        Err(e) => e.into_response(),
    }
}

/// Look the record up, then render it. Both steps block, so they run on
/// the blocking pool, lookup strictly first.
async fn export(state: AppState, id: Option<String>) -> Result<RenderedPdf, ApiError> {
    let id = id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::Validation)?;

    tokio::task::spawn_blocking(move || -> Result<RenderedPdf, ApiError> {
        let record = state.store.find(&id)?.ok_or(ApiError::NotFound)?;
        let pdf = render(&record, &state.options)?;
        log::info!("exported meeting {id}: {} pages", pdf.page_count());
        Ok(pdf)
    })
    .await
    .map_err(|e| ApiError::Internal(Error::Render(format!("render task failed: {e}"))))?
}

fn pdf_response(pdf: RenderedPdf) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", pdf.filename);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf.bytes,
    )
        .into_response()
}
