//! Finbaba web server
//!
//! Axum REST API behind the dashboard: statement upload, per-user data,
//! savings goals and a health probe. Static dashboard files are served as
//! the fallback when a directory is configured.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use finbaba_ingest::IngestError;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config::ServerSection;

mod handlers;
pub mod store;

pub use store::UserStore;

/// Headroom for multipart framing on top of the file size limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared application state
pub struct AppState {
    pub store: UserStore,
    pub max_upload_bytes: usize,
    /// Where uploads are staged while they are ingested
    pub staging_dir: PathBuf,
}

impl AppState {
    pub fn new(max_upload_bytes: usize) -> Self {
        Self {
            store: UserStore::new(),
            max_upload_bytes,
            staging_dir: std::env::temp_dir(),
        }
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let body_limit = state.max_upload_bytes + MULTIPART_OVERHEAD;

    let api_routes = Router::new()
        .route("/upload", post(handlers::upload_statement))
        .route("/financial-data/:user_id", get(handlers::get_financial_data))
        .route("/savings-goal", post(handlers::create_savings_goal))
        .route("/savings-goal/:goal_id", put(handlers::update_savings_goal))
        .route("/health", get(handlers::health));

    let mut app = Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    if let Some(dir) = static_dir {
        if dir.is_dir() {
            app = app.fallback_service(ServeDir::new(dir));
        } else {
            warn!("Static directory {} not found, dashboard disabled", dir.display());
        }
    }

    app
}

/// Bind and serve until the process is stopped
pub async fn serve(server: &ServerSection) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", server.host, server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", server.host, server.port))?;

    let state = Arc::new(AppState::new(server.max_upload_bytes));
    let app = create_router(state, server.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;

    info!("Finbaba server running on http://{}", addr);
    info!("Upload endpoint: http://{}/api/upload", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    details: Option<String>,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            details: None,
            internal: None,
        }
    }

    pub fn payload_too_large(msg: &str) -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: msg.to_string(),
            details: None,
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            details: None,
            internal: None,
        }
    }

    /// The statement could not be ingested; nothing was stored
    pub fn ingest(err: IngestError) -> Self {
        let status = match &err {
            IngestError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            IngestError::UnreadableInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            message: "Error processing file".to_string(),
            details: Some(err.to_string()),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = match self.details {
            Some(details) => serde_json::json!({ "error": self.message, "details": details }),
            None => serde_json::json!({ "error": self.message }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred".to_string(),
            details: None,
            internal: Some(err.into()),
        }
    }
}
