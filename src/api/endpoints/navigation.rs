//! Quick-action navigation.
//!
//! - `POST /api/navigate` — `{ "section": "symptoms" }`

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Turn};
use crate::render::Section;

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub section: Section,
}

/// `POST /api/navigate`
pub async fn navigate(
    State(ctx): State<ApiContext>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<Turn<()>>, ApiError> {
    ctx.turn(|p| p.open_section(req.section))
}
