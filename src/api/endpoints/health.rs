//! Health check and initial page state.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Turn};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app: &'static str,
    pub version: &'static str,
    pub voice_supported: bool,
}

/// `GET /api/health` — connection check.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let voice_supported = ctx.core.read(|p| p.voice_supported())?;

    Ok(Json(HealthResponse {
        status: "ok",
        app: crate::config::APP_NAME,
        version: crate::config::APP_VERSION,
        voice_supported,
    }))
}

/// `GET /api/state` — every stored section rendered, as on page load.
pub async fn state(State(ctx): State<ApiContext>) -> Result<Json<Turn<()>>, ApiError> {
    ctx.turn(|p| p.load())
}
