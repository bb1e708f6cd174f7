//! Nearby hospitals: turn the user's position into an embedded map view.

use serde::{Deserialize, Serialize};

use crate::config::{MAP_BBOX_OFFSET, MAP_EMBED_BASE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation not supported")]
    Unsupported,
    #[error("Unable to get location: {0}")]
    Provider(String),
}

/// One-shot current position.
pub trait LocationProvider {
    fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position already resolved by the page, or the page's failure message.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedPosition(pub Result<Coordinates, String>);

impl LocationProvider for ReportedPosition {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.0.clone().map_err(LocationError::Provider)
    }
}

/// What the map viewer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// `[west, south, east, north]`
    pub bbox: [f64; 4],
    pub marker: Coordinates,
    pub embed_url: String,
}

impl MapView {
    pub fn around(pos: Coordinates) -> Self {
        let d = MAP_BBOX_OFFSET;
        let bbox = [
            pos.longitude - d,
            pos.latitude - d,
            pos.longitude + d,
            pos.latitude + d,
        ];
        let bbox_param = bbox
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join("%2C");
        let embed_url = format!(
            "{MAP_EMBED_BASE}?bbox={bbox_param}&layer=mapnik&marker={}%2C{}",
            pos.latitude, pos.longitude
        );
        Self {
            bbox,
            marker: pos,
            embed_url,
        }
    }
}

/// Resolve the map for whatever provider is available.
///
/// A missing provider and a provider error both come back as errors whose
/// text is shown to the user as-is.
pub fn locate(provider: Option<&dyn LocationProvider>) -> Result<MapView, LocationError> {
    let provider = provider.ok_or(LocationError::Unsupported)?;
    let pos = provider.current_position()?;
    tracing::debug!(lat = pos.latitude, lon = pos.longitude, "Map centred on position");
    Ok(MapView::around(pos))
}
