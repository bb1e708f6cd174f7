//! Appointment endpoints.
//!
//! - `GET /api/appointments` — stored bookings in booking order
//! - `POST /api/appointments` — submit the booking form

use axum::extract::State;
use axum::{Form, Json};

use crate::api::error::ApiError;
use crate::api::types::{filled, ApiContext, FormPairs, Turn};
use crate::capture;
use crate::models::Appointment;

/// `GET /api/appointments`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Appointment>>, ApiError> {
    Ok(Json(ctx.core.read(|p| p.appointments())?))
}

/// `POST /api/appointments` — fields are stored as submitted.
pub async fn submit(
    State(ctx): State<ApiContext>,
    Form(pairs): Form<FormPairs>,
) -> Result<Json<Turn<()>>, ApiError> {
    let mut form = filled(capture::Form::appointment(), &pairs);
    ctx.turn(|p| p.submit_appointment(&mut form))
}
