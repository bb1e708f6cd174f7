//! Doctor directory endpoints.
//!
//! - `GET /api/doctors` — grid cards, booking options, vet list
//! - `POST /api/doctors/book` — "Book" pressed on a card

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Turn};
use crate::directory;
use crate::portal::DirectoryView;

/// `GET /api/doctors`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<DirectoryView>, ApiError> {
    Ok(Json(ctx.core.read(|p| p.directory())?))
}

#[derive(Deserialize)]
pub struct BookRequest {
    pub name: String,
}

/// `POST /api/doctors/book` — preselect the doctor in the booking form.
pub async fn book(
    State(ctx): State<ApiContext>,
    Json(req): Json<BookRequest>,
) -> Result<Json<Turn<()>>, ApiError> {
    if directory::find(&req.name).is_none() {
        return Err(ApiError::NotFound(format!("Unknown doctor: {}", req.name)));
    }
    ctx.turn(|p| p.book_doctor(&req.name))
}
