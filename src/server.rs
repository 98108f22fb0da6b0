use crate::storage::{CaseFilter, CaseStats, CaseStore, ResolutionTimes, TypeBreakdown};
use axum::{
    extract::Query,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Extension, Router,
};
use hyper::Server;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Shared request context. Only the storage location is shared; every
/// request opens and closes its own connection.
#[derive(Clone)]
pub struct AppState {
    pub db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new<P: Into<PathBuf>>(db_path: P) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "caselytics",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Uniform error boundary: any failure becomes a 500 with an error payload.
fn error_response(err: crate::error::PipelineError) -> Response {
    error!("Request failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}

fn fetch_stats(state: &AppState, filter: &CaseFilter) -> crate::error::Result<CaseStats> {
    CaseStore::open(state.db_path.as_ref())?.stats(filter)
}

fn fetch_by_type(state: &AppState, filter: &CaseFilter) -> crate::error::Result<Vec<TypeBreakdown>> {
    CaseStore::open(state.db_path.as_ref())?.cases_by_type(filter)
}

fn fetch_resolution_times(
    state: &AppState,
    filter: &CaseFilter,
) -> crate::error::Result<Vec<ResolutionTimes>> {
    CaseStore::open(state.db_path.as_ref())?.resolution_times(filter)
}

async fn case_stats(
    Extension(state): Extension<AppState>,
    Query(filter): Query<CaseFilter>,
) -> Response {
    match fetch_stats(&state, &filter) {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => error_response(err),
    }
}

async fn cases_by_type(
    Extension(state): Extension<AppState>,
    Query(filter): Query<CaseFilter>,
) -> Response {
    match fetch_by_type(&state, &filter) {
        Ok(breakdown) => Json(breakdown).into_response(),
        Err(err) => error_response(err),
    }
}

async fn resolution_times(
    Extension(state): Extension<AppState>,
    Query(filter): Query<CaseFilter>,
) -> Response {
    match fetch_resolution_times(&state, &filter) {
        Ok(times) => Json(times).into_response(),
        Err(err) => error_response(err),
    }
}

/// Create the HTTP server with all routes
pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/cases/stats", get(case_stats))
        .route("/api/cases/by-type", get(cases_by_type))
        .route("/api/cases/resolution-times", get(resolution_times))
        .layer(Extension(state))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_server(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    println!("🚀 HTTP server running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/health");
    println!("📊 Case stats:   http://localhost:{port}/api/cases/stats");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
