//! Voice command session.
//!
//! Recognition runs in the page. These routes mirror the session state and
//! take finalized transcripts for routing.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Turn};
use crate::intent::VoiceAction;

#[derive(Serialize)]
pub struct VoiceResponse {
    pub supported: bool,
    pub active: bool,
    pub status: String,
}

/// `GET /api/voice`
pub async fn status(State(ctx): State<ApiContext>) -> Result<Json<VoiceResponse>, ApiError> {
    let response = ctx.core.read(|p| VoiceResponse {
        supported: p.voice_supported(),
        active: p.voice_active(),
        status: p.voice_status().label(),
    })?;
    Ok(Json(response))
}

/// `POST /api/voice/start`
pub async fn start(State(ctx): State<ApiContext>) -> Result<Json<Turn<()>>, ApiError> {
    ctx.turn(|p| p.start_voice())
}

/// `POST /api/voice/stop`
pub async fn stop(State(ctx): State<ApiContext>) -> Result<Json<Turn<()>>, ApiError> {
    ctx.turn(|p| p.stop_voice())
}

#[derive(Deserialize)]
pub struct VoiceResultRequest {
    #[serde(default)]
    pub transcripts: Vec<String>,
}

/// `POST /api/voice/result` — `result` is the routed action, or null when
/// no session is listening.
pub async fn result(
    State(ctx): State<ApiContext>,
    Json(req): Json<VoiceResultRequest>,
) -> Result<Json<Turn<Option<VoiceAction>>>, ApiError> {
    ctx.turn(|p| p.voice_results(&req.transcripts))
}
