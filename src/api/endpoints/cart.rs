//! Medicine cart endpoints.
//!
//! - `GET /api/cart`
//! - `POST /api/cart` — add the delivery form as one line
//! - `POST /api/cart/pick` — medicine pill pressed
//! - `DELETE /api/cart/:index` — remove by rendered position
//! - `POST /api/cart/checkout`

use axum::extract::{Path, State};
use axum::{Form, Json};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{filled, ApiContext, FormPairs, Turn};
use crate::capture;
use crate::models::CartItem;

/// `GET /api/cart`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<CartItem>>, ApiError> {
    Ok(Json(ctx.core.read(|p| p.cart())?))
}

/// `POST /api/cart`
pub async fn add(
    State(ctx): State<ApiContext>,
    Form(pairs): Form<FormPairs>,
) -> Result<Json<Turn<()>>, ApiError> {
    let mut form = filled(capture::Form::delivery(), &pairs);
    ctx.turn(|p| p.add_to_cart(&mut form))
}

#[derive(Deserialize)]
pub struct PickRequest {
    pub medicine: String,
}

/// `POST /api/cart/pick` — prefill the delivery form's medicine field.
pub async fn pick(
    State(ctx): State<ApiContext>,
    Json(req): Json<PickRequest>,
) -> Result<Json<Turn<()>>, ApiError> {
    ctx.turn(|p| p.pick_medicine(&req.medicine))
}

/// `DELETE /api/cart/:index` — `result` tells whether a line was removed.
/// An out-of-range index leaves the cart as it was.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(index): Path<String>,
) -> Result<Json<Turn<bool>>, ApiError> {
    let index: usize = index
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid cart index: {index}")))?;
    ctx.turn(|p| p.remove_from_cart(index))
}

/// `POST /api/cart/checkout` — `result` tells whether an order was placed.
pub async fn checkout(State(ctx): State<ApiContext>) -> Result<Json<Turn<bool>>, ApiError> {
    ctx.turn(|p| p.checkout())
}
