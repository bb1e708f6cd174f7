//! Nearby hospitals map.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Turn};
use crate::hospitals::{Coordinates, LocationProvider, MapView, ReportedPosition};

/// What the page's geolocation produced. Both fields absent means the
/// page has no geolocation at all.
#[derive(Debug, Default, Deserialize)]
pub struct LocateRequest {
    #[serde(default)]
    pub position: Option<Coordinates>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LocateRequest {
    fn provider(self) -> Option<ReportedPosition> {
        match (self.position, self.error) {
            (Some(pos), _) => Some(ReportedPosition(Ok(pos))),
            (None, Some(message)) => Some(ReportedPosition(Err(message))),
            (None, None) => None,
        }
    }
}

/// `POST /api/hospitals/locate` — `result` is the map, or null with an
/// alert among the notices.
pub async fn locate(
    State(ctx): State<ApiContext>,
    Json(req): Json<LocateRequest>,
) -> Result<Json<Turn<Option<MapView>>>, ApiError> {
    let provider = req.provider();
    ctx.turn(|p| p.locate(provider.as_ref().map(|r| r as &dyn LocationProvider)))
}
