//! Hospital review endpoints.

use axum::extract::State;
use axum::{Form, Json};

use crate::api::error::ApiError;
use crate::api::types::{filled, ApiContext, FormPairs, Turn};
use crate::capture;
use crate::models::Review;

/// `GET /api/reviews` — newest first.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(ctx.core.read(|p| p.reviews())?))
}

/// `POST /api/reviews`
pub async fn submit(
    State(ctx): State<ApiContext>,
    Form(pairs): Form<FormPairs>,
) -> Result<Json<Turn<()>>, ApiError> {
    let mut form = filled(capture::Form::review(), &pairs);
    ctx.turn(|p| p.submit_review(&mut form))
}
