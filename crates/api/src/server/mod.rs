//! HTTP surface
//!
//! - `POST /analyze`: `{"meeting_notes": "...", "auto_sync": true}` runs
//!   the pipeline and returns the analysis and, when synced, the report
//! - `POST /check/llm`: sends a short sample through the analysis service
//! - `POST /check/scheduler`: lists the scheduling service's event types
//! - `GET /health`: credential presence flags

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use minutesync_domain::{AnalysisRecord, MinuteSyncError, SyncReport};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::context::AppContext;
use crate::utils::health::HealthReport;
use crate::utils::logging::error_label;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub meeting_notes: String,
    #[serde(default = "default_auto_sync")]
    pub auto_sync: bool,
}

fn default_auto_sync() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: AnalysisRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_results: Option<SyncReport>,
    pub auto_sync_enabled: bool,
}

/// Error body: `{"success": false, "error": "..."}`.
#[derive(Debug)]
pub struct ApiError(MinuteSyncError);

impl From<MinuteSyncError> for ApiError {
    fn from(err: MinuteSyncError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MinuteSyncError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            MinuteSyncError::Network(_)
            | MinuteSyncError::Auth(_)
            | MinuteSyncError::RateLimited(_)
            | MinuteSyncError::MalformedOutput(_)
            | MinuteSyncError::ResourceUnavailable(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, kind = error_label(&self.0), "request failed");
        } else if status == StatusCode::BAD_GATEWAY {
            warn!(error = %self.0, kind = error_label(&self.0), "upstream service failed");
        }
        (status, Json(json!({"success": false, "error": self.0.to_string()}))).into_response()
    }
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/check/llm", post(check_llm))
        .route("/check/scheduler", post(check_scheduler))
        .route("/health", get(health))
        .with_state(ctx)
}

async fn analyze(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    if request.meeting_notes.trim().is_empty() {
        return Err(MinuteSyncError::InvalidInput("meeting_notes must not be empty".into()).into());
    }

    let outcome = ctx.process(&request.meeting_notes, request.auto_sync).await?;
    Ok(Json(AnalyzeResponse {
        success: true,
        analysis: outcome.analysis,
        sync_results: outcome.sync_report,
        auto_sync_enabled: ctx.pipeline.sync_enabled(),
    }))
}

async fn check_llm(State(ctx): State<Arc<AppContext>>) -> Result<Json<Value>, ApiError> {
    let analysis = ctx.pipeline.check_analyzer().await?;
    Ok(Json(json!({"success": true, "message": "LLM connection ok", "analysis": analysis})))
}

async fn check_scheduler(State(ctx): State<Arc<AppContext>>) -> Result<Json<Value>, ApiError> {
    let event_types = ctx.pipeline.check_scheduler().await.ok_or_else(|| {
        MinuteSyncError::InvalidInput("no scheduling service configured".into())
    })??;
    Ok(Json(json!({"success": true, "count": event_types.len(), "event_types": event_types})))
}

async fn health(State(ctx): State<Arc<AppContext>>) -> Json<HealthReport> {
    Json(ctx.health())
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(ctx: Arc<AppContext>) -> anyhow::Result<()> {
    let addr: SocketAddr =
        format!("{}:{}", ctx.config.server.host, ctx.config.server.port).parse()?;
    let app = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
