//! Symptom checker.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::symptoms::{self, AreaAdvice};

#[derive(Serialize)]
pub struct AreasResponse {
    pub areas: Vec<&'static str>,
}

/// `GET /api/symptoms` — selectable body areas.
pub async fn areas() -> Json<AreasResponse> {
    Json(AreasResponse {
        areas: symptoms::areas(),
    })
}

/// `GET /api/symptoms/:area` — common symptoms and advice for one area.
pub async fn area(
    State(ctx): State<ApiContext>,
    Path(area): Path<String>,
) -> Result<Json<AreaAdvice>, ApiError> {
    ctx.core
        .read(|p| p.symptom_area(&area))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown body area: {area}")))
}
