use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use gist_engine::{ParagraphExport, SalienceRequest};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

/// Export plus request metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct SalienceResponse {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub export: ParagraphExport,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn salience_routes() -> Router<AppState> {
    Router::new().route("/api/v1/salience", post(salience))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.uptime_secs(),
    }))
}

async fn salience(
    State(state): State<AppState>,
    payload: Result<Json<SalienceRequest>, JsonRejection>,
) -> Result<Json<SalienceResponse>, ApiError> {
    let Json(request) = payload?;
    let request_id = Uuid::new_v4();
    info!(%request_id, bytes = request.content.len(), k = ?request.k, "salience request");

    let export = state.engine.salience(&request).await?;
    info!(%request_id, sentences = export.entries.len(), max_level = export.max_level, "salience computed");
    Ok(Json(SalienceResponse { request_id, generated_at: Utc::now(), export }))
}
