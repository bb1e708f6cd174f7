//! Medical history notes.

use axum::extract::State;
use axum::{Form, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{filled, ApiContext, FormPairs, Turn};
use crate::capture;
use crate::views;

#[derive(Serialize)]
pub struct HistoryResponse {
    /// Stored text, pretty-printed, or the empty-state message.
    pub text: String,
    pub saved: bool,
}

/// `GET /api/history`
pub async fn show(State(ctx): State<ApiContext>) -> Result<Json<HistoryResponse>, ApiError> {
    let raw = ctx.core.read(|p| p.history_text())?;
    let saved = raw.is_some();
    Ok(Json(HistoryResponse {
        text: views::history_text(raw.as_deref()),
        saved,
    }))
}

/// `POST /api/history` — replaces whatever was saved before.
pub async fn save(
    State(ctx): State<ApiContext>,
    Form(pairs): Form<FormPairs>,
) -> Result<Json<Turn<()>>, ApiError> {
    let form = filled(capture::Form::history(), &pairs);
    ctx.turn(|p| p.save_history(&form))
}
