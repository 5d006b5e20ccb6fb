use axum::{extract::State, Extension, Json};
use geojson::FeatureCollection;
use serde::Deserialize;

use isoreach_core::{IsochroneRequest, Location, TravelMode};

use crate::middleware::RequestId;

use super::{map_provider_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct TransitBody {
    lat: f64,
    lng: f64,
    time: u32,
}

/// `POST /public-transit` — transit isochrones. The provider's response is
/// normalized before it leaves this server: every feature carries
/// `{ contour: time, color }` properties whatever the upstream sent.
pub(super) async fn fetch_transit_isochrone(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<TransitBody>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let request = IsochroneRequest {
        location: Location::new(body.lat, body.lng),
        time_minutes: body.time,
        mode: TravelMode::Transit,
    };
    request
        .validate()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let collection = state
        .transit
        .fetch_isochrone(&request.location, request.time_minutes)
        .await
        .map_err(|e| map_provider_error(req_id.0, &e))?;

    Ok(Json(collection))
}
